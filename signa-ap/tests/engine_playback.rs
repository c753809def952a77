//! Playback engine tests on tokio's paused clock
//!
//! Loads are served from an in-memory asset table with a configurable
//! latency, so ordering between loads, completions and resubmits is exact.

use async_trait::async_trait;
use signa_ap::assets::{AnimationAsset, AssetError, AssetKey, AssetResolver};
use signa_ap::playback::{PlaybackEngine, SchedulerConfig};
use signa_ap::SharedState;
use signa_common::events::SignaEvent;
use signa_common::{GlossSequence, GlossToken, Marker};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

struct TableAssets {
    durations: HashMap<AssetKey, u64>,
    latency: Duration,
}

impl TableAssets {
    fn new(entries: &[(AssetKey, u64)], latency_ms: u64) -> Self {
        Self {
            durations: entries.iter().cloned().collect(),
            latency: Duration::from_millis(latency_ms),
        }
    }
}

#[async_trait]
impl AssetResolver for TableAssets {
    async fn load(&self, key: &AssetKey) -> Result<AnimationAsset, AssetError> {
        tokio::time::sleep(self.latency).await;
        match self.durations.get(key) {
            Some(ms) => Ok(AnimationAsset {
                key: key.clone(),
                path: key.relative_path("glb"),
                duration: Duration::from_millis(*ms),
            }),
            None => Err(AssetError::NotFound(key.clone())),
        }
    }
}

fn sign(name: &str) -> AssetKey {
    AssetKey::Sign(name.to_string())
}

fn start(assets: TableAssets) -> (PlaybackEngine, broadcast::Receiver<SignaEvent>) {
    let state = Arc::new(SharedState::new());
    let events = state.subscribe_events();
    let engine = PlaybackEngine::start(
        SchedulerConfig::default(),
        Duration::from_millis(16),
        Arc::new(assets),
        state,
    );
    (engine, events)
}

/// Collect event type names (with labels) until the queue drains
async fn until_drained(events: &mut broadcast::Receiver<SignaEvent>) -> Vec<String> {
    let mut log = Vec::new();
    loop {
        let event = events.recv().await.unwrap();
        let entry = match &event {
            SignaEvent::CueStarted { label, source, .. } => format!("start {} {}", label, source),
            SignaEvent::CueCompleted { label, .. } => format!("done {}", label),
            SignaEvent::AssetFallback { missing, .. } => format!("fallback {}", missing),
            SignaEvent::SequenceSubmitted { gloss, .. } => format!("submit {}", gloss.join(" ")),
            SignaEvent::QueueDrained { .. } => break,
        };
        log.push(entry);
    }
    log
}

#[tokio::test(start_paused = true)]
async fn test_resubmit_waits_for_active_cue() {
    let assets = TableAssets::new(&[(sign("HELLO"), 1000), (sign("BYE"), 500)], 5);
    let (engine, mut events) = start(assets);

    engine
        .submit(
            "hello thanks",
            GlossSequence::new(vec![GlossToken::word("HELLO"), GlossToken::word("THANKS")]),
        )
        .unwrap();

    // Wait until HELLO is on screen, then replace the rest of the utterance
    loop {
        if let SignaEvent::CueStarted { label, .. } = events.recv().await.unwrap() {
            assert_eq!(label, "HELLO");
            break;
        }
    }
    tokio::time::sleep(Duration::from_millis(200)).await;
    engine
        .submit("bye", GlossSequence::new(vec![GlossToken::word("BYE")]))
        .unwrap();

    let log = until_drained(&mut events).await;
    assert_eq!(
        log,
        vec![
            "submit BYE".to_string(),
            "done HELLO".to_string(),
            "start BYE sign".to_string(),
            "done BYE".to_string(),
        ]
    );

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_finger_spelling_with_missing_letters() {
    let assets = TableAssets::new(&[(AssetKey::Letter("O".into()), 300)], 1);
    let (engine, mut events) = start(assets);

    engine
        .submit(
            "ok",
            GlossSequence::new(vec![
                GlossToken::letter('o'),
                GlossToken::letter('k'),
                GlossToken::marker(Marker::Maintain),
            ]),
        )
        .unwrap();

    let log = until_drained(&mut events).await;
    assert_eq!(
        log,
        vec![
            "submit O K MAINTAIN".to_string(),
            "start O letter".to_string(),
            "done O".to_string(),
            "fallback letters/K".to_string(),
            "start K placeholder".to_string(),
            "done K".to_string(),
        ]
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    let status = engine.status().await;
    assert!(status.current.is_none());
    assert_eq!(status.queue_length, 0);

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_word_falls_back_to_first_letter() {
    let assets = TableAssets::new(&[(AssetKey::Letter("T".into()), 400)], 1);
    let (engine, mut events) = start(assets);

    engine
        .submit("table", GlossSequence::new(vec![GlossToken::word("TABLE")]))
        .unwrap();

    let log = until_drained(&mut events).await;
    assert_eq!(
        log,
        vec![
            "submit TABLE".to_string(),
            "fallback signs/TABLE".to_string(),
            "start TABLE letter".to_string(),
            "done TABLE".to_string(),
        ]
    );

    engine.shutdown().await;
}
