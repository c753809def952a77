//! Avatar Player (signa-ap) - Main entry point
//!
//! Loads the gloss dictionary and animation assets, starts the playback
//! engine and serves the HTTP/SSE interface.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signa_ap::api::{self, AppContext};
use signa_ap::assets::FsAssetResolver;
use signa_ap::playback::{PlaybackEngine, SchedulerConfig};
use signa_ap::transcribe::{CommandTranscriber, Transcriber};
use signa_ap::SharedState;
use signa_common::config::{self, TomlConfig};
use signa_common::gloss::{GlossResolver, TextNormalizer};
use signa_common::{GlossDictionary, GlossTranslator};

/// Command-line arguments for signa-ap
#[derive(Parser, Debug)]
#[command(name = "signa-ap")]
#[command(about = "Speech-to-sign avatar player for Signa")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "SIGNA_PORT")]
    port: Option<u16>,

    /// Configuration file
    #[arg(short, long, env = "SIGNA_CONFIG")]
    config: Option<PathBuf>,

    /// Gloss dictionary (JSON object of word or phrase to gloss label)
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Directory containing signs/ and letters/ animation assets
    #[arg(short, long)]
    assets_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_file = config::resolve_config_file(args.config.as_deref());
    let toml_config = TomlConfig::load_or_default(config_file.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing; RUST_LOG wins over the config file
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(&toml_config.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Signa Avatar Player (signa-ap) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_file {
        Some(path) => info!("Configuration: {}", path.display()),
        None => info!("Configuration: built-in defaults"),
    }

    let port = args.port.unwrap_or(toml_config.port);
    let dictionary_path = config::resolve_path(
        args.dictionary.as_deref(),
        "SIGNA_DICTIONARY",
        toml_config.dictionary_path.as_deref(),
        config::default_dictionary_path,
    );
    let assets_dir = config::resolve_path(
        args.assets_dir.as_deref(),
        "SIGNA_ASSETS_DIR",
        toml_config.assets_dir.as_deref(),
        config::default_assets_dir,
    );

    // Translation cannot run without its dictionary
    let dictionary = Arc::new(GlossDictionary::load(&dictionary_path).with_context(|| {
        format!("Failed to load gloss dictionary {}", dictionary_path.display())
    })?);
    let translator = Arc::new(GlossTranslator::new(
        TextNormalizer::new(&toml_config.translation.fillers),
        GlossResolver::with_max_phrase_words(
            dictionary,
            toml_config.translation.max_phrase_words,
        ),
    ));

    let playback = &toml_config.playback;
    let resolver = FsAssetResolver::new(
        &assets_dir,
        playback.asset_extension.clone(),
        playback.default_asset_duration(),
    )
    .context("Failed to initialize asset resolver")?;

    let state = Arc::new(SharedState::new());
    let engine = Arc::new(PlaybackEngine::start(
        SchedulerConfig::from(playback),
        playback.tick_interval(),
        Arc::new(resolver),
        Arc::clone(&state),
    ));

    let transcriber = CommandTranscriber::from_config(&toml_config.transcriber)
        .map(|t| {
            info!("Transcriber: {}", t.program());
            Arc::new(t) as Arc<dyn Transcriber>
        });
    if transcriber.is_none() {
        info!("No transcriber configured; /listen is disabled, use POST /translate");
    }

    let ctx = AppContext {
        state,
        engine: Arc::clone(&engine),
        translator,
        transcriber,
    };

    api::run(port, ctx, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    engine.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Expand a bare level into per-crate directives; full directives pass through
fn default_filter(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("signa_ap={level},signa_common={level},tower_http={level}")
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
