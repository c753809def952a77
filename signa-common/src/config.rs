//! Configuration loading and path resolution
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Compiled defaults
//!
//! A missing configuration file is not fatal: a warning is logged and the
//! compiled defaults are used.

use crate::gloss::normalizer::DEFAULT_FILLERS;
use crate::gloss::resolver::DEFAULT_MAX_PHRASE_WORDS;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SIGNA_CONFIG";

/// Configuration file name searched in the platform config directories
pub const CONFIG_FILE_NAME: &str = "signa.toml";

/// Bootstrap configuration loaded from TOML
///
/// Read once at startup; the service must restart to pick up changes.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Gloss dictionary JSON file
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,

    /// Directory holding `signs/` and `letters/` animation assets
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub transcriber: TranscriberConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            dictionary_path: None,
            assets_dir: None,
            logging: LoggingConfig::default(),
            translation: TranslationConfig::default(),
            playback: PlaybackConfig::default(),
            transcriber: TranscriberConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Gloss translation settings
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    /// Whole-word fillers stripped from transcripts
    #[serde(default = "default_fillers")]
    pub fillers: Vec<String>,

    /// Longest dictionary phrase tried before single-word lookup
    #[serde(default = "default_max_phrase_words")]
    pub max_phrase_words: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            fillers: default_fillers(),
            max_phrase_words: default_max_phrase_words(),
        }
    }
}

/// Playback scheduler timing, all in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Slack allowed when deciding an animation has reached its duration
    pub completion_tolerance_ms: u64,
    /// Blend window between two cues
    pub transition_cooldown_ms: u64,
    /// How long the inert placeholder is shown
    pub placeholder_duration_ms: u64,
    /// How long a SILENCE rest is shown
    pub silence_duration_ms: u64,
    /// Extra hold after a finger-spelled word (MAINTAIN)
    pub sustain_hold_ms: u64,
    /// Frame tick used for completion checks
    pub tick_interval_ms: u64,
    /// Duration assumed for assets missing from the duration manifest
    pub default_asset_duration_ms: u64,
    /// File extension of animation assets
    pub asset_extension: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            completion_tolerance_ms: 50,
            transition_cooldown_ms: 150,
            placeholder_duration_ms: 800,
            silence_duration_ms: 1000,
            sustain_hold_ms: 400,
            tick_interval_ms: 16,
            default_asset_duration_ms: 1500,
            asset_extension: "glb".to_string(),
        }
    }
}

impl PlaybackConfig {
    pub fn completion_tolerance(&self) -> Duration {
        Duration::from_millis(self.completion_tolerance_ms)
    }

    pub fn transition_cooldown(&self) -> Duration {
        Duration::from_millis(self.transition_cooldown_ms)
    }

    pub fn placeholder_duration(&self) -> Duration {
        Duration::from_millis(self.placeholder_duration_ms)
    }

    pub fn silence_duration(&self) -> Duration {
        Duration::from_millis(self.silence_duration_ms)
    }

    pub fn sustain_hold(&self) -> Duration {
        Duration::from_millis(self.sustain_hold_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn default_asset_duration(&self) -> Duration {
        Duration::from_millis(self.default_asset_duration_ms)
    }
}

/// External capture + speech-to-text command
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriberConfig {
    /// Program and arguments; empty disables `/listen`
    #[serde(default)]
    pub command: Vec<String>,

    /// Kill the command if it runs longer than this
    #[serde(default = "default_transcriber_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            timeout_ms: default_transcriber_timeout_ms(),
        }
    }
}

fn default_port() -> u16 {
    5750
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fillers() -> Vec<String> {
    DEFAULT_FILLERS.iter().map(|f| f.to_string()).collect()
}

fn default_max_phrase_words() -> usize {
    DEFAULT_MAX_PHRASE_WORDS
}

fn default_transcriber_timeout_ms() -> u64 {
    30_000
}

impl TomlConfig {
    /// Parse configuration text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the given file, or fall back to defaults when there is none
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                warn!(
                    "Configuration file {} not found, using built-in defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => {
                warn!("No configuration file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the scheduler or translator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.translation.max_phrase_words == 0 {
            return Err(Error::Config(
                "translation.max_phrase_words must be at least 1".to_string(),
            ));
        }
        if self.playback.tick_interval_ms == 0 {
            return Err(Error::Config(
                "playback.tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.playback.placeholder_duration_ms == 0 {
            return Err(Error::Config(
                "playback.placeholder_duration_ms must be greater than 0".to_string(),
            ));
        }
        if self.playback.asset_extension.trim().is_empty() {
            return Err(Error::Config(
                "playback.asset_extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Locate the configuration file
///
/// Explicit path (CLI) first, then `SIGNA_CONFIG`, then the user config
/// directory, then `/etc/signa` on Linux. Returns `None` when no file exists.
pub fn resolve_config_file(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let user_config = dirs::config_dir().map(|d| d.join("signa").join(CONFIG_FILE_NAME));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/signa").join(CONFIG_FILE_NAME);
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolve a path setting following the priority order
pub fn resolve_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_value: Option<&Path>,
    default: impl FnOnce() -> PathBuf,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = toml_value {
        return path.to_path_buf();
    }

    // Priority 4: Compiled default
    default()
}

/// OS-dependent data folder for dictionary and assets
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("signa"))
        .unwrap_or_else(|| PathBuf::from("./signa_data"))
}

pub fn default_dictionary_path() -> PathBuf {
    default_data_folder().join("isl_gloss.json")
}

pub fn default_assets_dir() -> PathBuf {
    default_data_folder().join("animations")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 5750);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.translation.max_phrase_words, 3);
        assert!(config.translation.fillers.contains(&"you know".to_string()));
        assert!(config.transcriber.command.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.port, 5750);
        assert_eq!(config.playback, PlaybackConfig::default());
    }

    #[test]
    fn test_partial_playback_section() {
        let config = TomlConfig::from_toml_str(
            r#"
            port = 6000

            [playback]
            completion_tolerance_ms = 120
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 6000);
        assert_eq!(config.playback.completion_tolerance(), Duration::from_millis(120));
        // Unspecified fields keep their defaults
        assert_eq!(config.playback.transition_cooldown_ms, 150);
        assert_eq!(config.playback.asset_extension, "glb");
    }

    #[test]
    fn test_validation_rejects_zero_phrase_words() {
        let err = TomlConfig::from_toml_str("[translation]\nmax_phrase_words = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_phrase_words"));
    }

    #[test]
    fn test_validation_rejects_zero_tick() {
        assert!(TomlConfig::from_toml_str("[playback]\ntick_interval_ms = 0\n").is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(TomlConfig::from_toml_str("port = \"not a number\"").is_err());
    }
}
