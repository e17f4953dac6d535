//! Incremental parsing of `streamGenerateContent` bodies.
//!
//! Bodies arrive as arbitrarily sized chunks that do not respect UTF-8, line
//! or JSON boundaries. Chunks are decoded incrementally, split into lines
//! (NDJSON, optionally SSE `data:` prefixed) and each parseable line is fed to
//! the extractor. Unparseable lines are skipped.

use super::extract::{self, PayloadScan};
use crate::models::{Modality, RawPayload};
use crate::{Error, Result};
use futures_util::{Stream, StreamExt};
use serde_json::Value;

/// UTF-8 decoder that holds back a multi-byte sequence split across chunks.
#[derive(Debug, Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn decode_into(&mut self, chunk: &[u8], out: &mut String) {
        self.pending.extend_from_slice(chunk);
        let complete = complete_prefix_len(&self.pending);
        let tail = self.pending.split_off(complete);
        out.push_str(&String::from_utf8_lossy(&self.pending));
        self.pending = tail;
    }

    fn flush_into(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            out.push_str(&String::from_utf8_lossy(&self.pending));
            self.pending.clear();
        }
    }
}

/// Length of the prefix of `bytes` that does not end in an unfinished sequence.
/// Invalid sequences are included; they decode to U+FFFD.
fn complete_prefix_len(bytes: &[u8]) -> usize {
    let mut offset = 0;
    loop {
        match std::str::from_utf8(&bytes[offset..]) {
            Ok(_) => return bytes.len(),
            Err(err) => match err.error_len() {
                Some(invalid) => offset += err.valid_up_to() + invalid,
                None => return offset + err.valid_up_to(),
            },
        }
    }
}

fn parse_line(line: &str) -> Option<Value> {
    let trimmed = line.strip_prefix("data:").unwrap_or(line).trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!("Skipping unparseable stream line ({} bytes): {}", trimmed.len(), e);
            None
        }
    }
}

/// Push-based reader over a chunked response body.
#[derive(Debug)]
pub struct StreamReader {
    modality: Modality,
    decoder: Utf8Decoder,
    buffer: String,
    scan: PayloadScan,
}

impl StreamReader {
    pub fn new(modality: Modality) -> Self {
        Self {
            modality,
            decoder: Utf8Decoder::default(),
            buffer: String::new(),
            scan: PayloadScan::default(),
        }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        let searched = self.buffer.len();
        self.decoder.decode_into(chunk, &mut self.buffer);

        let Some(newline) = self.buffer[searched..].rfind('\n') else {
            return;
        };

        let rest = self.buffer.split_off(searched + newline + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);

        self.scan = complete
            .split('\n')
            .filter_map(parse_line)
            .map(|value| extract::scan(&value))
            .fold(std::mem::take(&mut self.scan), PayloadScan::merge);
    }

    /// Ends the stream. The trailing unterminated segment is only consulted
    /// when no line produced any data.
    pub fn finish(mut self) -> Option<RawPayload> {
        self.decoder.flush_into(&mut self.buffer);

        if !self.scan.has_data() {
            if let Some(value) = parse_line(&self.buffer) {
                self.scan = self.scan.merge(extract::scan(&value));
            }
        }

        self.scan.into_payload(self.modality)
    }
}

/// Drains `stream` through a [`StreamReader`].
pub async fn read_stream<S, B, E>(stream: S, modality: Modality) -> Result<Option<RawPayload>>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<Error>,
{
    let mut stream = std::pin::pin!(stream);
    let mut reader = StreamReader::new(modality);
    while let Some(chunk) = stream.next().await {
        reader.push(chunk.map_err(Into::into)?.as_ref());
    }
    Ok(reader.finish())
}

/// Reads a whole response body once, preferring a parse of the complete
/// document and falling back to the line-by-line result.
pub async fn read_body<S, B, E>(stream: S, modality: Modality) -> Result<Option<RawPayload>>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<Error>,
{
    let mut stream = std::pin::pin!(stream);
    let mut body = Vec::new();
    let mut reader = StreamReader::new(modality);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::into)?;
        body.extend_from_slice(chunk.as_ref());
        reader.push(chunk.as_ref());
    }

    match serde_json::from_slice::<Value>(&body) {
        Ok(document) => {
            if let Some(payload) = extract::extract(&document, modality) {
                tracing::debug!("Found inline {} data in full response document", modality);
                return Ok(Some(payload));
            }
        }
        Err(e) => {
            tracing::debug!("Response body is not a single JSON document ({}), using line scan", e);
        }
    }

    let payload = reader.finish();
    if payload.is_some() {
        tracing::debug!("Found inline {} data in streamed lines", modality);
    }
    Ok(payload)
}
