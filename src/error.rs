//! Error types produced by the ingestion core.
//!
//! Errors fall into the three classes the flow distinguishes:
//!
//! | Class | Variants | Handling |
//! |-------|----------|----------|
//! | Validation | [`EmptyContent`](IngestError::EmptyContent), [`InvalidUtf8`](IngestError::InvalidUtf8), [`ContentTooLarge`](IngestError::ContentTooLarge) | Rejected before any store interaction |
//! | Integration | [`UnsupportedStore`](IngestError::UnsupportedStore) | Configuration problem, never retried |
//! | Backing store | [`Store`](IngestError::Store) | Propagated unchanged from the adapter |
//!
//! All variants are typed, cloneable, and comparable so callers can map them to
//! transport-level responses and tests can assert on exact outcomes.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while ingesting or retrieving a document.
///
/// The enum is marked `#[non_exhaustive]` to allow future additions without
/// breaking existing code. Callers should always include a catch-all arm when
/// matching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The document content was empty (or empty after BOM removal).
    ///
    /// Raised before the repository is touched; an empty upload never reaches
    /// the persistence layer.
    #[error("document content is empty")]
    EmptyContent,

    /// The content bytes were not valid UTF-8.
    #[error("invalid utf-8 content: {0}")]
    InvalidUtf8(String),

    /// The content exceeds the configured size limit.
    ///
    /// Maps to HTTP 413 at the transport edge.
    #[error("content exceeds size limit: {0}")]
    ContentTooLarge(String),

    /// No advertised store operation matched any probe candidate.
    ///
    /// This is an integration error: the configured store does not expose a
    /// create operation under any of the candidate names. It must not be
    /// retried; the attempted names are carried for operator diagnostics.
    #[error("document store exposes no compatible create operation (tried: {})", attempted.join(", "))]
    UnsupportedStore {
        /// Every candidate operation name the probe tried, in priority order.
        attempted: Vec<String>,
    },

    /// No document exists under the given identifier.
    #[error("document {id} not found")]
    NotFound {
        /// The identifier that was looked up.
        id: u64,
    },

    /// The invoked store operation itself failed.
    ///
    /// The core has no basis for judging whether the failure is transient, so
    /// the adapter error passes through unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IngestError {
    /// Returns true if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        self.http_status_code() < 500
    }

    /// Returns a suggested HTTP status code for this error.
    ///
    /// Convenience for transport layers; this crate itself never speaks HTTP.
    ///
    /// # Status Codes
    ///
    /// - `ContentTooLarge`: 413
    /// - `NotFound`: 404
    /// - `UnsupportedStore`: 501
    /// - `Store`: 500
    /// - All other validation errors: 400
    pub fn http_status_code(&self) -> u16 {
        match self {
            IngestError::ContentTooLarge(_) => 413,
            IngestError::NotFound { .. } => 404,
            IngestError::UnsupportedStore { .. } => 501,
            IngestError::Store(_) => 500,
            _ => 400,
        }
    }
}
