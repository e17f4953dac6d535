//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.
//! JSON parse failures inside response scanning are never surfaced; they are
//! skipped where they happen.

use crate::models::Modality;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error (status {status}): {body}")]
    Network { status: u16, body: String },

    #[error("No inline {0} data in response")]
    MissingPayload(Modality),

    #[error("Failed to decode base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Speech synthesis unavailable: {0}")]
    SpeechUnavailable(String),

    #[error("Audio playback error: {0}")]
    Playback(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
