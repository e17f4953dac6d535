//! Playable/displayable media produced for the user.
//!
//! A [`MediaResource`] owns decoded bytes. It can be shown as a data URL,
//! saved next to other outputs, or persisted into a short-lived
//! [`ResourceHandle`] that is deleted once revoked.

use crate::codec;
use crate::models::{Modality, RawPayload};
use crate::{audio, Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOrigin {
    /// Decoded from the remote service's inline data.
    Remote,
    /// Rendered locally because no remote image could be obtained.
    Placeholder,
    /// Produced by the local speech synthesizer.
    SpeechFallback,
}

#[derive(Debug, Clone)]
pub struct MediaResource {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub origin: MediaOrigin,
}

impl MediaResource {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, origin: MediaOrigin) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            origin,
        }
    }

    /// Decodes an extracted payload into a resource for `modality`.
    ///
    /// Raw PCM speech (`audio/L16`, `audio/pcm`) is wrapped into WAV so that it
    /// plays with ordinary decoders.
    pub fn from_payload(payload: &RawPayload, modality: Modality) -> Result<Self> {
        let bytes = codec::decode_base64(&payload.base64_data)?;
        if bytes.is_empty() {
            return Err(Error::MissingPayload(modality));
        }

        let (bytes, mime_type) = match modality {
            Modality::Image => (bytes, payload.mime_type.clone()),
            Modality::Audio => audio::containerize(bytes, &payload.mime_type)?,
        };

        Ok(Self::new(bytes, mime_type, MediaOrigin::Remote))
    }

    pub fn to_data_url(&self) -> String {
        codec::data_url(&self.mime_type, &self.bytes)
    }

    pub fn file_extension(&self) -> &'static str {
        let essence = self
            .mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/ogg" | "audio/opus" => "ogg",
            _ => "bin",
        }
    }

    /// Writes the resource to `dir` as `<stem>_<uuid>.<ext>` and returns the path.
    pub fn save(&self, dir: &Path, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!(
            "{}_{}.{}",
            stem,
            Uuid::new_v4(),
            self.file_extension()
        ));
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }

    /// Writes the resource into a temporary file that lives as long as the handle.
    pub fn persist(&self, dir: &Path) -> Result<ResourceHandle> {
        let mut file = tempfile::Builder::new()
            .prefix("bangla-speller-")
            .suffix(&format!(".{}", self.file_extension()))
            .tempfile_in(dir)?;
        file.write_all(&self.bytes)?;
        file.flush()?;
        Ok(ResourceHandle { file })
    }
}

/// Locally addressable copy of a resource; the file is removed on [`revoke`](Self::revoke)
/// or when the handle is dropped.
#[derive(Debug)]
pub struct ResourceHandle {
    file: NamedTempFile,
}

impl ResourceHandle {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn revoke(self) -> Result<()> {
        self.file.close()?;
        Ok(())
    }
}
