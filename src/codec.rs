//! Base64 <-> bytes conversion for inline media payloads.

use crate::Result;
use base64::Engine as _;

/// Decode a base64 payload, ignoring embedded ASCII whitespace.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(compact)?)
}

pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, encode_base64(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64() {
        assert_eq!(decode_base64("QQ==").unwrap(), b"A");
    }

    #[test]
    fn test_decode_tolerates_line_breaks() {
        assert_eq!(decode_base64("SGVs\nbG8=\r\n").unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_rejects_invalid() {
        assert!(matches!(
            decode_base64("!!!invalid-base64!!!"),
            Err(crate::Error::Decode(_))
        ));
    }

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"A"), "data:image/png;base64,QQ==");
    }
}
