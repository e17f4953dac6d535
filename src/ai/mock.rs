use super::MediaGenerationService;
use crate::models::{GenerationRequest, RawPayload};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockResponse {
    Payload(RawPayload),
    /// Well-formed answer without inline data.
    Missing,
    /// Non-2xx HTTP status.
    Status(u16),
}

#[derive(Clone)]
pub struct MockMediaClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockMediaClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_payload(self, base64_data: &str, mime_type: &str) -> Self {
        self.with_response(MockResponse::Payload(RawPayload {
            base64_data: base64_data.to_string(),
            mime_type: mime_type.to_string(),
        }))
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockMediaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaGenerationService for MockMediaClient {
    async fn fetch_payload(&self, request: &GenerationRequest) -> Result<RawPayload> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::MissingPayload(request.modality));
        }

        match &responses[(call - 1) % responses.len()] {
            MockResponse::Payload(payload) => Ok(payload.clone()),
            MockResponse::Missing => Err(Error::MissingPayload(request.modality)),
            MockResponse::Status(status) => Err(Error::Network {
                status: *status,
                body: "mock error".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Modality;

    #[tokio::test]
    async fn test_mock_cycles_responses() {
        let client = MockMediaClient::new()
            .with_payload("QQ==", "image/png")
            .with_response(MockResponse::Status(500));
        let request = GenerationRequest::new("বই", Modality::Image, "key");

        assert!(client.fetch_payload(&request).await.is_ok());
        assert!(matches!(
            client.fetch_payload(&request).await,
            Err(Error::Network { status: 500, .. })
        ));
        assert!(client.fetch_payload(&request).await.is_ok());
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_without_responses_is_missing_payload() {
        let client = MockMediaClient::new();
        let request = GenerationRequest::new("মা", Modality::Audio, "key");

        let err = client.fetch_payload(&request).await.unwrap_err();
        assert!(matches!(err, Error::MissingPayload(Modality::Audio)));
        assert_eq!(client.get_requests()[0].prompt_text, "মা");
    }
}
