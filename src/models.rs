//! Data models and structures
//!
//! Defines the request/payload types that flow between the Gemini client,
//! the response parsers and the orchestrator, plus environment configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Image,
    Audio,
}

impl Modality {
    /// MIME type assumed when the response never names one.
    pub fn default_mime(self) -> &'static str {
        match self {
            Modality::Image => "image/png",
            Modality::Audio => "audio/mpeg",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Image => f.write_str("image"),
            Modality::Audio => f.write_str("audio"),
        }
    }
}

/// One user action's worth of generation input.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt_text: String,
    pub modality: Modality,
    pub api_key: String,
}

impl GenerationRequest {
    pub fn new(prompt_text: impl Into<String>, modality: Modality, api_key: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            modality,
            api_key: api_key.into(),
        }
    }
}

/// Base64 payload pulled out of a response, still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    pub base64_data: String,
    pub mime_type: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub image_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub settings_path: PathBuf,
    pub output_dir: PathBuf,
    pub placeholder_font: Option<PathBuf>,
    pub espeak_bin: String,
    pub audio_player: String,
    pub request_timeout: Duration,
}

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_TTS_VOICE: &str = "Zephyr";
pub const DEFAULT_SETTINGS_FILE: &str = "bn_app_settings.json";
pub const SETTINGS_DIR_NAME: &str = "bangla-speller";

#[cfg(target_os = "macos")]
const DEFAULT_AUDIO_PLAYER: &str = "afplay";
#[cfg(not(target_os = "macos"))]
const DEFAULT_AUDIO_PLAYER: &str = "aplay";

/// `<config dir>/bangla-speller/bn_app_settings.json`; the bare file name in
/// the working directory when the platform reports no config dir.
pub fn default_settings_path() -> PathBuf {
    settings_path_under(dirs::config_dir())
}

fn settings_path_under(config_dir: Option<PathBuf>) -> PathBuf {
    match config_dir {
        Some(dir) => dir.join(SETTINGS_DIR_NAME).join(DEFAULT_SETTINGS_FILE),
        None => PathBuf::from(DEFAULT_SETTINGS_FILE),
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                crate::Error::Settings(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => Duration::from_secs(120),
        };

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            image_model: std::env::var("IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            tts_model: std::env::var("TTS_MODEL").unwrap_or_else(|_| DEFAULT_TTS_MODEL.to_string()),
            tts_voice: std::env::var("TTS_VOICE").unwrap_or_else(|_| DEFAULT_TTS_VOICE.to_string()),
            settings_path: std::env::var("SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_settings_path()),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output")),
            placeholder_font: std::env::var("PLACEHOLDER_FONT").ok().map(PathBuf::from),
            espeak_bin: std::env::var("ESPEAK_BIN").unwrap_or_else(|_| "espeak-ng".to_string()),
            audio_player: std::env::var("AUDIO_PLAYER")
                .unwrap_or_else(|_| DEFAULT_AUDIO_PLAYER.to_string()),
            request_timeout,
        })
    }
}
