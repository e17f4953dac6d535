use crate::models::DEFAULT_GEMINI_BASE_URL;
use crate::{Error, Result};
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// Lightweight Gemini REST client shared by the image and speech requests.
pub struct GeminiHttpClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    timeout: Duration,
}

impl GeminiHttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self::new_with_client(timeout, Client::new())
    }

    pub fn new_with_client(timeout: Duration, client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Calls `streamGenerateContent` and returns the successful response with
    /// its body still unread.
    ///
    /// `model` may be given with or without the `models/` prefix.
    pub async fn stream_generate_content<Req: Serialize>(
        &self,
        model: &str,
        api_key: &str,
        request: &Req,
    ) -> Result<Response> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent",
            self.base_url, model
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(network_error(status, response.text().await));
        }

        Ok(response)
    }
}

/// A non-2xx answer is always `Network`, even when its body cannot be read.
fn network_error<E: std::fmt::Display>(status: u16, body: std::result::Result<String, E>) -> Error {
    let body = body.unwrap_or_else(|e| {
        tracing::warn!("Failed to read Gemini error body: {}", e);
        String::new()
    });
    tracing::error!("Gemini API error (status {}): {}", status, body);
    Error::Network { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(server: &MockServer) -> GeminiHttpClient {
        GeminiHttpClient::new(Duration::from_secs(5)).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_api_key_is_sent_as_query_parameter() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/some-model:streamGenerateContent"))
            .and(query_param("key", "secret key"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let response = make_client(&server)
            .stream_generate_content("some-model", "secret key", &serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_strips_models_prefix_from_model_id() {
        let server = MockServer::start().await;

        test_support::post_stream_path("gemini-2.5-flash-preview-tts")
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        make_client(&server)
            .stream_generate_content(
                "models/gemini-2.5-flash-preview-tts",
                "key",
                &serde_json::json!({}),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::STREAM_GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = make_client(&server)
            .stream_generate_content("m", "key", &serde_json::json!({}))
            .await
            .unwrap_err();

        match err {
            Error::Network { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_error_body_is_still_network_error() {
        let err = network_error(503, Err::<String, _>("connection reset"));
        match err {
            Error::Network { status, body } => {
                assert_eq!(status, 503);
                assert!(body.is_empty());
            }
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
