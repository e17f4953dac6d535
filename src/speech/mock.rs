use super::SpeechFallback;
use crate::resource::{MediaOrigin, MediaResource};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockSpeech {
    spoken: Arc<Mutex<Vec<String>>>,
    available: Arc<Mutex<bool>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
            available: Arc::new(Mutex::new(true)),
        }
    }

    pub fn unavailable(self) -> Self {
        *self.available.lock().unwrap() = false;
        self
    }

    pub fn get_spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Default for MockSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechFallback for MockSpeech {
    async fn synthesize(&self, text: &str) -> Result<MediaResource> {
        self.spoken.lock().unwrap().push(text.to_string());

        if !*self.available.lock().unwrap() {
            return Err(Error::SpeechUnavailable("mock engine disabled".to_string()));
        }

        let wav = crate::audio::wav::pcm16_mono_to_wav(&[0, 0, 0, 0], 16_000)?;
        Ok(MediaResource::new(wav, "audio/wav", MediaOrigin::SpeechFallback))
    }
}
