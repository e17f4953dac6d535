//! Locally persisted user settings
//!
//! A single JSON blob holding the theme colours, the glass blur amount and the
//! user's Gemini API key. The generation core only ever reads it.

pub mod file;
pub mod memory;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

use crate::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY: &str = "#7c4dff";
pub const DEFAULT_BACKGROUND: &str = "#0f1020";
pub const DEFAULT_BLUR: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Keys written by other versions are carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Settings {
    pub fn primary_color(&self) -> &str {
        self.primary.as_deref().unwrap_or(DEFAULT_PRIMARY)
    }

    pub fn background_color(&self) -> &str {
        self.bg.as_deref().unwrap_or(DEFAULT_BACKGROUND)
    }

    pub fn blur(&self) -> u32 {
        self.blur.unwrap_or(DEFAULT_BLUR)
    }

    /// The stored key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

pub trait SettingsStore: Send + Sync {
    /// Never fails: a missing or unreadable blob yields default settings.
    fn load(&self) -> Settings;

    fn save(&self, settings: &Settings) -> Result<()>;

    fn clear_api_key(&self) -> Result<()> {
        let mut settings = self.load();
        settings.api_key = None;
        self.save(&settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.primary_color(), "#7c4dff");
        assert_eq!(settings.background_color(), "#0f1020");
        assert_eq!(settings.blur(), 10);
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let settings = Settings {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.api_key(), None);

        let settings = Settings {
            api_key: Some(" abc \n".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.api_key(), Some("abc"));
    }

    #[test]
    fn test_blob_uses_camel_case_and_keeps_unknown_keys() {
        let json = r##"{"primary":"#ff0000","blur":4,"apiKey":"k","fontScale":1.5}"##;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.primary_color(), "#ff0000");
        assert_eq!(settings.blur(), 4);
        assert_eq!(settings.api_key(), Some("k"));

        let round_trip = serde_json::to_value(&settings).unwrap();
        assert_eq!(round_trip["apiKey"], "k");
        assert_eq!(round_trip["fontScale"], 1.5);
        assert!(round_trip.get("bg").is_none());
    }
}
