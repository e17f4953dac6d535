//! Bengali spelling companion - pictures and pronunciation for typed words
//!
//! A learner composes a word on the Bengali keyboard; the app asks Gemini for
//! an illustration or a spoken rendition of it. When Gemini cannot deliver,
//! a locally rendered placeholder image or local speech synthesis takes over.

pub mod ai;
pub mod app;
pub mod audio;
pub mod codec;
pub mod error;
pub mod image;
pub mod keyboard;
pub mod models;
pub mod prompts;
pub mod resource;
pub mod settings;
pub mod speech;
pub mod status;

pub use error::{Error, Result};
