use super::SpeechFallback;
use crate::resource::{MediaOrigin, MediaResource};
use crate::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// espeak-ng's default speed is 175 words per minute; speak slightly slower for learners.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 166;

const VOICE: &str = "bn";

/// Bengali speech through the `espeak-ng` command line synthesizer.
///
/// The word is written to the engine's stdin, never passed as an argument.
pub struct EspeakSpeech {
    bin: String,
    words_per_minute: u32,
}

impl EspeakSpeech {
    pub fn new(bin: String) -> Self {
        Self {
            bin,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }

    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("-v")
            .arg(VOICE)
            .arg("-s")
            .arg(self.words_per_minute.to_string())
            .arg("--stdout")
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

#[async_trait]
impl SpeechFallback for EspeakSpeech {
    async fn synthesize(&self, text: &str) -> Result<MediaResource> {
        tracing::info!("Synthesizing speech locally with {}", self.bin);

        let mut child = self.command().spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::SpeechUnavailable(format!("{} is not installed", self.bin))
            } else {
                Error::Speech(format!("Failed to run {}: {}", self.bin, e))
            }
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| Error::Speech(format!("Failed to send text to {}: {}", self.bin, e)))?;
            // Dropping stdin closes it so the engine sees end of input.
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::Speech(format!("Failed to run {}: {}", self.bin, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Speech(format!(
                "{} exited with {}: {}",
                self.bin,
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(Error::Speech(format!("{} produced no audio", self.bin)));
        }

        Ok(MediaResource::new(
            output.stdout,
            "audio/wav",
            MediaOrigin::SpeechFallback,
        ))
    }
}
