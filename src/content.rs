//! Content decoding and validation.
//!
//! Uploads arrive either as already-decoded text or as raw bytes. Decoding is
//! UTF-8 with tolerance for a single leading byte-order mark; the size bound
//! is enforced on the raw bytes before any decoding work. The decoded string
//! is the exact content the fingerprint is computed over.

use serde::{Deserialize, Serialize};

use crate::config::IngestConfig;
use crate::error::IngestError;

/// Raw document content as submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentContent {
    /// Already-decoded UTF-8 text.
    Text(String),
    /// Raw bytes expected to decode as UTF-8.
    Bytes(Vec<u8>),
}

impl DocumentContent {
    /// Raw byte length, before decoding.
    pub fn byte_len(&self) -> usize {
        match self {
            DocumentContent::Text(s) => s.len(),
            DocumentContent::Bytes(b) => b.len(),
        }
    }
}

/// Decode submitted content into the document body.
///
/// Enforces the configured size bound on the raw bytes, decodes as UTF-8,
/// strips one leading BOM if present, and rejects content that is empty after
/// decoding. Runs before any store interaction.
pub fn decode_content(content: DocumentContent, cfg: &IngestConfig) -> Result<String, IngestError> {
    if let Some(limit) = cfg.max_content_bytes {
        let len = content.byte_len();
        if len > limit {
            return Err(IngestError::ContentTooLarge(format!(
                "content size {len} exceeds limit of {limit}"
            )));
        }
    }

    let text = match content {
        DocumentContent::Text(text) => text,
        DocumentContent::Bytes(bytes) => String::from_utf8(bytes)
            .map_err(|err| IngestError::InvalidUtf8(err.to_string()))?,
    };

    let text = match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };

    if text.is_empty() {
        return Err(IngestError::EmptyContent);
    }
    Ok(text)
}
