//! Audio containers and playback
//!
//! Turns decoded speech payloads into something a standard decoder can play
//! and hands them to a local player.

pub mod mime;
pub mod mock;
pub mod player;
pub mod wav;

pub use mock::MockAudioPlayer;
pub use player::CommandPlayer;

use crate::Result;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Plays the file at `path`, resolving once playback has finished.
    async fn play(&self, path: &Path) -> Result<()>;
}

/// Wraps raw PCM in a WAV container when `mime_type` says so; other audio is
/// passed through untouched. Returns the bytes and the MIME type to play them as.
pub fn containerize(bytes: Vec<u8>, mime_type: &str) -> Result<(Vec<u8>, String)> {
    match mime::pcm_sample_rate(mime_type) {
        Some(sample_rate) => {
            tracing::debug!(
                "Wrapping {} bytes of PCM ({}) at {} Hz",
                bytes.len(),
                mime_type,
                sample_rate
            );
            Ok((wav::pcm16_mono_to_wav(&bytes, sample_rate)?, "audio/wav".to_string()))
        }
        None => Ok((bytes, mime_type.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containerize_pcm_uses_rate_from_mime() {
        let (wav, mime) = containerize(vec![0; 4], "audio/L16;rate=16000").unwrap();
        assert_eq!(mime, "audio/wav");
        assert_eq!(wav.len(), wav::WAV_HEADER_SIZE + 4);
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 16_000);
    }

    #[test]
    fn test_containerize_pcm_defaults_to_24k() {
        let (wav, _) = containerize(vec![0; 2], "audio/pcm").unwrap();
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 24_000);
    }

    #[test]
    fn test_containerize_passes_mpeg_through() {
        let (bytes, mime) = containerize(vec![0xFF, 0xFB], "audio/mpeg").unwrap();
        assert_eq!(bytes, vec![0xFF, 0xFB]);
        assert_eq!(mime, "audio/mpeg");
    }
}
