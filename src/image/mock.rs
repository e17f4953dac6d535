use super::PlaceholderService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Returns a fixed tiny PNG and records what it was asked to render.
#[derive(Clone)]
pub struct MockPlaceholderRenderer {
    rendered: Arc<Mutex<Vec<(String, String)>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockPlaceholderRenderer {
    pub fn new() -> Self {
        Self {
            rendered: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    /// `(text, primary_color)` pairs, in call order.
    pub fn get_rendered(&self) -> Vec<(String, String)> {
        self.rendered.lock().unwrap().clone()
    }
}

impl Default for MockPlaceholderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaceholderService for MockPlaceholderRenderer {
    async fn render(&self, text: &str, primary_color: &str) -> Result<Vec<u8>> {
        self.rendered
            .lock()
            .unwrap()
            .push((text.to_string(), primary_color.to_string()));

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Image(image::ImageError::IoError(
                std::io::Error::other("Mock failure"),
            )));
        }

        // PNG signature only
        Ok(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_placeholder() {
        let renderer = MockPlaceholderRenderer::new();
        let png = renderer.render("বই", "#7c4dff").await.unwrap();
        assert_eq!(&png[..4], &[0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(
            renderer.get_rendered(),
            vec![("বই".to_string(), "#7c4dff".to_string())]
        );
    }

    #[tokio::test]
    async fn test_mock_placeholder_failure() {
        let renderer = MockPlaceholderRenderer::new().with_failure(true);
        assert!(renderer.render("বই", "#7c4dff").await.is_err());
    }
}
