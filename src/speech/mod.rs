//! Local speech synthesis used when Gemini speech is not available.

pub mod espeak;
pub mod mock;

pub use espeak::EspeakSpeech;
pub use mock::MockSpeech;

use crate::resource::MediaResource;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SpeechFallback: Send + Sync {
    /// Synthesizes `text` without the remote service.
    ///
    /// Returns [`crate::Error::SpeechUnavailable`] when no local engine exists.
    async fn synthesize(&self, text: &str) -> Result<MediaResource>;
}
