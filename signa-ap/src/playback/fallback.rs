//! Asset fallback chain
//!
//! Per token, the asset keys to try in order. The inert placeholder is the
//! implicit last step and cannot fail, so every chain terminates in
//! something displayable.
//!
//! - Word: named sign → letter of the label's first character → placeholder
//! - Letter: letter → placeholder

use crate::assets::AssetKey;
use signa_common::GlossToken;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    remaining: VecDeque<AssetKey>,
}

impl FallbackChain {
    pub fn for_token(token: &GlossToken) -> Self {
        let mut remaining = VecDeque::with_capacity(2);

        match token {
            GlossToken::Word { label } => {
                remaining.push_back(AssetKey::Sign(label.clone()));
                if let Some(first) = label.chars().find(|c| !c.is_whitespace()) {
                    remaining.push_back(AssetKey::Letter(first.to_uppercase().collect()));
                }
            }
            GlossToken::Letter { letter } => {
                remaining.push_back(AssetKey::Letter(letter.clone()));
            }
            // Markers never reach asset resolution
            GlossToken::Marker { .. } => {}
        }

        Self { remaining }
    }

    /// Next key to try; `None` means fall back to the placeholder
    pub fn next_key(&mut self) -> Option<AssetKey> {
        self.remaining.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}
