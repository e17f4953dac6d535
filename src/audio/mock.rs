use super::AudioPlayer;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Records what it was asked to play and whether the file existed at that moment.
#[derive(Clone)]
pub struct MockAudioPlayer {
    played: Arc<Mutex<Vec<(PathBuf, bool)>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAudioPlayer {
    pub fn new() -> Self {
        Self {
            played: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_played(&self) -> Vec<(PathBuf, bool)> {
        self.played.lock().unwrap().clone()
    }
}

impl Default for MockAudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPlayer for MockAudioPlayer {
    async fn play(&self, path: &Path) -> Result<()> {
        self.played
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Playback("Mock failure".to_string()));
        }
        Ok(())
    }
}
