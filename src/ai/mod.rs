//! AI service integration for image and speech generation
//!
//! Provides the Gemini client plus the response parsing that turns Gemini's
//! streamed or single-document answers into inline media payloads.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiMediaClient;
pub use mock::{MockMediaClient, MockResponse};

use crate::models::{GenerationRequest, RawPayload};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MediaGenerationService: Send + Sync {
    /// Performs one generation request and returns the inline payload it produced.
    ///
    /// A non-2xx answer is [`crate::Error::Network`]; a well-formed answer
    /// without inline data is [`crate::Error::MissingPayload`].
    async fn fetch_payload(&self, request: &GenerationRequest) -> Result<RawPayload>;
}
