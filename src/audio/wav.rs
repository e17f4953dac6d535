use crate::{Error, Result};

pub const WAV_HEADER_SIZE: usize = 44;
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Wraps little-endian signed 16-bit mono PCM in a minimal RIFF/WAVE container.
pub fn pcm16_mono_to_wav(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>> {
    let data_size = u32::try_from(pcm.len())
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or_else(|| Error::Invariant(format!("PCM too large for WAV: {} bytes", pcm.len())))?;

    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| Error::Invariant(format!("Sample rate out of range: {}", sample_rate)))?;

    let mut wav = Vec::with_capacity(WAV_HEADER_SIZE + pcm.len());

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);

    Ok(wav)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_header_fields() {
        let pcm = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let wav = pcm16_mono_to_wav(&pcm, 16_000).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 1);
        assert_eq!(u32_at(&wav, 24), 16_000);
        assert_eq!(u32_at(&wav, 28), 32_000);
        assert_eq!(u16_at(&wav, 32), 2);
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 6);
        assert_eq!(&wav[44..], &pcm[..]);
    }

    #[test]
    fn test_length_tracks_pcm_length() {
        for len in [0usize, 1, 2, 480, 48_000] {
            let wav = pcm16_mono_to_wav(&vec![0u8; len], DEFAULT_SAMPLE_RATE).unwrap();
            assert_eq!(wav.len(), WAV_HEADER_SIZE + len);
            assert_eq!(u32_at(&wav, 4) as usize, 36 + len);
            assert_eq!(u32_at(&wav, 40) as usize, len);
            assert_eq!(u32_at(&wav, 28), DEFAULT_SAMPLE_RATE * 2);
        }
    }

    #[test]
    fn test_rejects_overflowing_sample_rate() {
        let err = pcm16_mono_to_wav(&[0, 0], u32::MAX).unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }
}
