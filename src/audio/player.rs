use super::AudioPlayer;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Plays audio files through an external command line player (`aplay`, `afplay`, ...).
pub struct CommandPlayer {
    bin: String,
}

impl CommandPlayer {
    pub fn new(bin: String) -> Self {
        Self { bin }
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, path: &Path) -> Result<()> {
        tracing::debug!("Playing {} with {}", path.display(), self.bin);

        let output = Command::new(&self.bin)
            .arg(path)
            .output()
            .await
            .map_err(|e| Error::Playback(format!("Failed to run {}: {}", self.bin, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Playback(format!(
                "{} exited with {}: {}",
                self.bin,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
