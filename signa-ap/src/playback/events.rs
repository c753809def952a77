//! Internal engine messages (not exposed via SSE)
//!
//! Everything that can advance the scheduler arrives on one channel, so the
//! engine task handles inputs strictly one at a time. For client-visible
//! events see `signa_common::events::SignaEvent`.

use super::types::LoadTicket;
use crate::assets::{AnimationAsset, AssetError};
use signa_common::GlossSequence;
use uuid::Uuid;

#[derive(Debug)]
pub enum EngineMessage {
    /// Replace pending cues with a new utterance
    Submit {
        sequence_id: Uuid,
        speech: String,
        sequence: GlossSequence,
    },

    /// A spawned asset load finished
    AssetLoaded {
        ticket: LoadTicket,
        result: Result<AnimationAsset, AssetError>,
    },

    /// Stop the engine task
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKey;

    #[test]
    fn test_message_debug() {
        let msg = EngineMessage::AssetLoaded {
            ticket: LoadTicket(7),
            result: Err(AssetError::NotFound(AssetKey::Letter("Q".into()))),
        };

        let debug_str = format!("{:?}", msg);
        assert!(debug_str.contains("AssetLoaded"));
        assert!(debug_str.contains("7"));
    }
}
