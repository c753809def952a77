//! Speech capture and transcription
//!
//! Capture and speech-to-text live outside this service. A [`Transcriber`]
//! hands back one transcript per call; [`CommandTranscriber`] obtains it
//! from an external program's stdout.

use crate::error::{Error, Result};
use async_trait::async_trait;
use signa_common::config::TranscriberConfig;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Source of transcribed speech
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Capture one utterance and return its transcript (may be empty)
    async fn transcribe(&self) -> Result<String>;
}

/// Runs an external capture/recognition command per request
#[derive(Debug, Clone)]
pub struct CommandTranscriber {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandTranscriber {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Build from the `[transcriber]` config section
    ///
    /// Returns `None` when no command is configured.
    pub fn from_config(config: &TranscriberConfig) -> Option<Self> {
        let (program, args) = config.command.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self::new(
            program.clone(),
            args.to_vec(),
            Duration::from_millis(config.timeout_ms),
        ))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Transcriber for CommandTranscriber {
    async fn transcribe(&self) -> Result<String> {
        debug!(program = %self.program, "Running transcriber");

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                Error::Transcription(format!("Failed to start {}: {}", self.program, e))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                Error::Transcription(format!(
                    "{} timed out after {} ms",
                    self.program,
                    self.timeout.as_millis()
                ))
            })?
            .map_err(|e| Error::Transcription(format!("{} failed: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(program = %self.program, "Transcriber exited with {:?}", output.status.code());
            return Err(Error::Transcription(format!(
                "Exit code: {:?}, stderr: {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Transcript: {:?}", transcript);
        Ok(transcript)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_unset() {
        assert!(CommandTranscriber::from_config(&TranscriberConfig::default()).is_none());
    }

    #[test]
    fn test_from_config_splits_program() {
        let config = TranscriberConfig {
            command: vec!["capture".into(), "--seconds".into(), "5".into()],
            timeout_ms: 1000,
        };
        let t = CommandTranscriber::from_config(&config).unwrap();
        assert_eq!(t.program(), "capture");
        assert_eq!(t.args, vec!["--seconds", "5"]);
    }

    #[tokio::test]
    async fn test_stdout_is_trimmed() {
        let t = CommandTranscriber::new("echo", vec!["  um hello world  ".into()], Duration::from_secs(5));
        assert_eq!(t.transcribe().await.unwrap(), "um hello world");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let t = CommandTranscriber::new("false", vec![], Duration::from_secs(5));
        assert!(matches!(t.transcribe().await, Err(Error::Transcription(_))));
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let t = CommandTranscriber::new("signa-no-such-program", vec![], Duration::from_secs(5));
        assert!(t.transcribe().await.is_err());
    }

    #[tokio::test]
    async fn test_timeout() {
        let t = CommandTranscriber::new("sleep", vec!["5".into()], Duration::from_millis(50));
        let err = t.transcribe().await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
