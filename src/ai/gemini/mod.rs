pub mod client;
pub mod extract;
pub mod media;
pub mod stream;
pub mod types;

pub use client::GeminiHttpClient;
pub use extract::{extract, scan, EnvelopeShape, InlineFragment, PayloadScan};
pub use media::GeminiMediaClient;
pub use stream::{read_body, read_stream, StreamReader};

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockBuilder};

    pub const STREAM_GENERATE_CONTENT_PATH_REGEX: &str =
        r"^/v1beta/models/[^/]+:streamGenerateContent$";

    pub fn post_path_regex(pattern: &str) -> MockBuilder {
        Mock::given(method("POST")).and(path_regex(pattern))
    }

    pub fn post_stream_path(model: &str) -> MockBuilder {
        Mock::given(method("POST")).and(path(format!(
            "/v1beta/models/{}:streamGenerateContent",
            model
        )))
    }

    pub fn candidate_body(data: &str, mime_type: Option<&str>) -> serde_json::Value {
        let mut inline = serde_json::json!({ "data": data });
        if let Some(mime_type) = mime_type {
            inline["mimeType"] = serde_json::Value::from(mime_type);
        }
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": inline }] } }]
        })
    }
}
