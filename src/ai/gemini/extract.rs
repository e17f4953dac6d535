//! Locates inline base64 media inside Gemini responses of any known shape.
//!
//! Gemini answers in several envelopes depending on endpoint and mode
//! (`generateContent`, `streamGenerateContent` arrays, SSE/NDJSON chunks,
//! Live API `serverContent`). Each envelope is described by an
//! [`EnvelopeShape`]; every shape yields a list of `parts`, and every part with
//! `inlineData.data` becomes an [`InlineFragment`]. Fragments are folded into a
//! [`PayloadScan`] with last-wins semantics.

use crate::models::{Modality, RawPayload};
use serde_json::Value;

/// Inline media carried by a single response part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFragment {
    pub data: String,
    pub mime_type: Option<String>,
}

impl InlineFragment {
    /// Parts without non-empty `inlineData.data` carry nothing, even if they name a mime type.
    fn from_part(part: &Value) -> Option<Self> {
        let inline = part.get("inlineData")?;
        let data = inline
            .get("data")
            .and_then(Value::as_str)
            .filter(|data| !data.is_empty())?;
        let mime_type = inline
            .get("mimeType")
            .and_then(Value::as_str)
            .filter(|mime| !mime.is_empty())
            .map(str::to_string);

        Some(Self {
            data: data.to_string(),
            mime_type,
        })
    }
}

/// Running result of scanning one or more envelopes.
///
/// Data is replaced by every new fragment; the mime type is replaced only by
/// fragments that name one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadScan {
    data: Option<String>,
    mime_type: Option<String>,
}

impl PayloadScan {
    pub fn absorb(mut self, fragment: InlineFragment) -> Self {
        self.data = Some(fragment.data);
        if fragment.mime_type.is_some() {
            self.mime_type = fragment.mime_type;
        }
        self
    }

    /// Folds a scan of later input over this one.
    pub fn merge(mut self, later: PayloadScan) -> Self {
        if later.data.is_some() {
            self.data = later.data;
        }
        if later.mime_type.is_some() {
            self.mime_type = later.mime_type;
        }
        self
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn into_payload(self, modality: Modality) -> Option<RawPayload> {
        let base64_data = self.data?;
        Some(RawPayload {
            base64_data,
            mime_type: self
                .mime_type
                .unwrap_or_else(|| modality.default_mime().to_string()),
        })
    }
}

/// Known response envelopes, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// `{"contents": [{"parts": [...]}, ...]}`, every turn is scanned.
    TurnList,
    /// `{"candidates": [{"content": {"parts": [...]}}]}`, first candidate only.
    Candidate,
    /// `{"serverContent": {"modelTurn": {"parts": [...]}}}`; only consulted
    /// when the envelope has no candidate parts array.
    ServerContent,
}

impl EnvelopeShape {
    fn parts(self, envelope: &Value) -> Option<Vec<&Value>> {
        match self {
            EnvelopeShape::TurnList => {
                let turns = envelope.get("contents")?.as_array()?;
                Some(
                    turns
                        .iter()
                        .filter_map(|turn| turn.get("parts").and_then(Value::as_array))
                        .flatten()
                        .collect(),
                )
            }
            EnvelopeShape::Candidate => envelope
                .get("candidates")?
                .get(0)?
                .get("content")?
                .get("parts")?
                .as_array()
                .map(|parts| parts.iter().collect()),
            EnvelopeShape::ServerContent => envelope
                .get("serverContent")?
                .get("modelTurn")?
                .get("parts")?
                .as_array()
                .map(|parts| parts.iter().collect()),
        }
    }
}

fn scan_parts(parts: Vec<&Value>) -> PayloadScan {
    parts
        .into_iter()
        .filter_map(InlineFragment::from_part)
        .fold(PayloadScan::default(), PayloadScan::absorb)
}

fn scan_envelope(envelope: &Value) -> PayloadScan {
    let turn_list = EnvelopeShape::TurnList
        .parts(envelope)
        .map(scan_parts)
        .unwrap_or_default();

    let model_turn = [EnvelopeShape::Candidate, EnvelopeShape::ServerContent]
        .into_iter()
        .find_map(|shape| shape.parts(envelope))
        .map(scan_parts)
        .unwrap_or_default();

    turn_list.merge(model_turn)
}

/// Scans an arbitrary JSON value; arrays are treated as a sequence of envelopes.
pub fn scan(value: &Value) -> PayloadScan {
    match value {
        Value::Array(envelopes) => envelopes
            .iter()
            .map(scan_envelope)
            .fold(PayloadScan::default(), PayloadScan::merge),
        Value::Object(_) => scan_envelope(value),
        _ => PayloadScan::default(),
    }
}

pub fn extract(value: &Value, modality: Modality) -> Option<RawPayload> {
    scan(value).into_payload(modality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload(data: &str, mime: &str) -> Option<RawPayload> {
        Some(RawPayload {
            base64_data: data.to_string(),
            mime_type: mime.to_string(),
        })
    }

    fn candidate(parts: Value) -> Value {
        json!({ "candidates": [{ "content": { "parts": parts } }] })
    }

    #[test]
    fn test_single_candidate_fragment_is_returned_unchanged() {
        let value = candidate(json!([{ "inlineData": { "data": "QQ==", "mimeType": "image/jpeg" } }]));
        assert_eq!(extract(&value, Modality::Image), payload("QQ==", "image/jpeg"));
    }

    #[test]
    fn test_turn_list_shape() {
        let value = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "বই" }] },
                { "role": "model", "parts": [{ "inlineData": { "data": "Qg==", "mimeType": "image/webp" } }] }
            ]
        });
        assert_eq!(extract(&value, Modality::Image), payload("Qg==", "image/webp"));
    }

    #[test]
    fn test_server_content_shape() {
        let value = json!({
            "serverContent": { "modelTurn": { "parts": [
                { "inlineData": { "data": "AAAA", "mimeType": "audio/pcm;rate=24000" } }
            ] } }
        });
        assert_eq!(
            extract(&value, Modality::Audio),
            payload("AAAA", "audio/pcm;rate=24000")
        );
    }

    #[test]
    fn test_candidate_parts_shadow_server_content() {
        let value = json!({
            "candidates": [{ "content": { "parts": [] } }],
            "serverContent": { "modelTurn": { "parts": [{ "inlineData": { "data": "QQ==" } }] } }
        });
        assert_eq!(extract(&value, Modality::Image), None);
    }

    #[test]
    fn test_only_first_candidate_is_scanned() {
        let value = json!({ "candidates": [
            { "content": { "parts": [{ "text": "no image" }] } },
            { "content": { "parts": [{ "inlineData": { "data": "QQ==" } }] } }
        ] });
        assert_eq!(extract(&value, Modality::Image), None);
    }

    #[test]
    fn test_candidate_wins_over_turn_list() {
        let value = json!({
            "contents": [{ "parts": [{ "inlineData": { "data": "VFVSTg==", "mimeType": "image/gif" } }] }],
            "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "Q0FORA==" } }] } }]
        });
        // Data comes from the candidate; its missing mime keeps the turn list's.
        assert_eq!(extract(&value, Modality::Image), payload("Q0FORA==", "image/gif"));
    }

    #[test]
    fn test_array_of_envelopes_is_last_wins() {
        let value = json!([
            candidate(json!([{ "inlineData": { "data": "Rmlyc3Q=", "mimeType": "audio/L16;rate=16000" } }])),
            candidate(json!([{ "text": "between" }])),
            candidate(json!([{ "inlineData": { "data": "TGFzdA==" } }]))
        ]);
        assert_eq!(
            extract(&value, Modality::Audio),
            payload("TGFzdA==", "audio/L16;rate=16000")
        );
    }

    #[test]
    fn test_missing_mime_uses_modality_default() {
        let value = candidate(json!([{ "inlineData": { "data": "QQ==" } }]));
        assert_eq!(extract(&value, Modality::Image), payload("QQ==", "image/png"));
        assert_eq!(extract(&value, Modality::Audio), payload("QQ==", "audio/mpeg"));
    }

    #[test]
    fn test_mime_without_data_is_ignored() {
        let value = candidate(json!([
            { "inlineData": { "data": "QQ==", "mimeType": "image/png" } },
            { "inlineData": { "mimeType": "image/jpeg" } },
            { "inlineData": { "data": "", "mimeType": "image/webp" } }
        ]));
        assert_eq!(extract(&value, Modality::Image), payload("QQ==", "image/png"));
    }

    #[test]
    fn test_empty_documents_yield_none() {
        assert_eq!(extract(&json!({}), Modality::Image), None);
        assert_eq!(extract(&json!([]), Modality::Image), None);
        assert_eq!(extract(&json!(null), Modality::Audio), None);
        assert_eq!(extract(&json!("QQ=="), Modality::Audio), None);
    }

    #[test]
    fn test_malformed_shapes_yield_none() {
        let value = json!({
            "contents": "not a list",
            "candidates": [{ "content": { "parts": { "inlineData": { "data": "QQ==" } } } }]
        });
        assert_eq!(extract(&value, Modality::Image), None);

        let value = json!({ "contents": [{ "parts": null }, 42] });
        assert_eq!(extract(&value, Modality::Image), None);

        let value = candidate(json!([{ "inlineData": { "data": 12 } }]));
        assert_eq!(extract(&value, Modality::Image), None);
    }

    #[test]
    fn test_merge_keeps_mime_when_later_scan_has_none() {
        let first = PayloadScan::default().absorb(InlineFragment {
            data: "YQ==".to_string(),
            mime_type: Some("audio/L16;rate=8000".to_string()),
        });
        let second = PayloadScan::default().absorb(InlineFragment {
            data: "Yg==".to_string(),
            mime_type: None,
        });

        let merged = first.merge(second);
        assert!(merged.has_data());
        assert_eq!(
            merged.into_payload(Modality::Audio),
            payload("Yg==", "audio/L16;rate=8000")
        );
    }
}
