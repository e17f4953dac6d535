//! Local placeholder images
//!
//! When no image can be obtained from Gemini, the typed word is rendered onto
//! a gradient canvas so the learner still sees something for their word.

pub mod mock;
pub mod placeholder;

pub use mock::MockPlaceholderRenderer;
pub use placeholder::PlaceholderRenderer;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PlaceholderService: Send + Sync {
    /// Renders `text` and returns PNG bytes.
    async fn render(&self, text: &str, primary_color: &str) -> Result<Vec<u8>>;
}
