use super::wav::DEFAULT_SAMPLE_RATE;
use regex::Regex;
use std::sync::LazyLock;

static PCM_MIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)audio/(L16|pcm)").expect("valid PCM mime regex"));
static RATE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rate=(\d{3,6})").expect("valid rate regex"));

/// Returns the sample rate to use when `mime_type` names raw PCM
/// (`audio/L16`, `audio/pcm`), or `None` for already-containerized audio.
pub fn pcm_sample_rate(mime_type: &str) -> Option<u32> {
    if !PCM_MIME.is_match(mime_type) {
        return None;
    }

    let rate = RATE_PARAM
        .captures(mime_type)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|rate| *rate > 0)
        .unwrap_or(DEFAULT_SAMPLE_RATE);

    Some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l16_with_rate() {
        assert_eq!(pcm_sample_rate("audio/L16;rate=16000"), Some(16_000));
    }

    #[test]
    fn test_l16_with_codec_and_rate() {
        assert_eq!(
            pcm_sample_rate("audio/L16;codec=pcm;rate=24000"),
            Some(24_000)
        );
    }

    #[test]
    fn test_pcm_without_rate_uses_default() {
        assert_eq!(pcm_sample_rate("audio/pcm"), Some(DEFAULT_SAMPLE_RATE));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(pcm_sample_rate("AUDIO/l16; RATE=22050"), Some(22_050));
    }

    #[test]
    fn test_containerized_audio_is_not_pcm() {
        assert_eq!(pcm_sample_rate("audio/mpeg"), None);
        assert_eq!(pcm_sample_rate("audio/wav"), None);
        assert_eq!(pcm_sample_rate("image/png"), None);
    }
}
