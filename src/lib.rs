//! Lexico ingestion core
//!
//! This is where text documents enter the system. We validate and decode the
//! submitted content, fingerprint it, resolve its language, assemble the
//! document entity, and persist it through whatever create operation the
//! configured store advertises.
//!
//! ## What we do here
//!
//! - **Decode and validate content** - UTF-8 with BOM tolerance, size bound,
//!   empty uploads rejected before the store is touched
//! - **Fingerprint** - SHA-256 over the exact decoded bytes, lowercase hex
//! - **Resolve language** - closed code-to-id mapping, unknown codes tolerated
//! - **Bind optional fields** - best-effort assignment of the size attribute
//!   across naming variants of the backing entity
//! - **Persist via capability probe** - first eligible advertised create
//!   operation wins; stores with none fail loud with full diagnostics
//! - **Log everything** - structured events via tracing
//!
//! ## Main entry points
//!
//! Call [`ingest`] with an [`IngestRequest`], a [`DocumentStore`], and an
//! [`IngestConfig`]; get back an [`IngestReceipt`]. [`retrieve`] is the
//! companion read path, a plain lookup with no probing.
//!
//! ## Example
//!
//! ```
//! use lexico::{ingest, DocumentContent, IngestConfig, IngestRequest, InMemoryStore};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let store = InMemoryStore::new();
//! let config = IngestConfig::default();
//! let request = IngestRequest {
//!     content: DocumentContent::Text("hola mundo".into()),
//!     uploader_id: 7,
//!     filename: "saludo.txt".into(),
//!     language_code: Some("es".into()),
//! };
//!
//! let receipt = ingest(request, &store, &config).await.unwrap();
//! assert_eq!(receipt.language, "es");
//! assert_eq!(receipt.content_hash.len(), 64);
//! # });
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn, Instrument, Level};

mod binder;
mod config;
mod content;
mod document;
mod error;
mod hash;
mod language;
mod probe;
mod store;

pub use crate::binder::bind_optional;
pub use crate::config::{
    ConfigError, IngestConfig, DEFAULT_CREATE_CANDIDATES, DEFAULT_SIZE_FIELD_SPELLINGS,
};
pub use crate::content::{decode_content, DocumentContent};
pub use crate::document::{Document, DocumentShape, FieldKind, FieldValue};
pub use crate::error::IngestError;
pub use crate::hash::content_hash;
pub use crate::language::{
    normalize_language_code, resolve_language_code, LANGUAGE_UNKNOWN,
};
pub use crate::probe::{persist_document, select_create_operation};
pub use crate::store::{
    DocumentStore, InMemoryStore, OperationDescriptor, OperationShape, StoreError,
};

/// One document upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestRequest {
    /// Submitted content, text or raw UTF-8 bytes.
    pub content: DocumentContent,
    /// Uploader identifier, opaque to this core.
    pub uploader_id: i64,
    /// Original filename, not validated for format.
    pub filename: String,
    /// Short language code; two letters expected but not enforced.
    pub language_code: Option<String>,
}

/// Outcome of a successful ingest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestReceipt {
    /// Confirmation message for the caller.
    pub message: String,
    /// Store-assigned document identifier.
    pub document_id: u64,
    /// Normalized (lowercased, trimmed) language code as submitted.
    pub language: String,
    /// SHA-256 fingerprint of the content, lowercase hex.
    pub content_hash: String,
}

/// Summary returned by the read path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Document identifier.
    pub id: u64,
    /// Original filename.
    pub filename: String,
    /// Uploader identifier.
    pub uploader_id: i64,
    /// Resolved language identifier; `0` means unknown.
    pub language_id: u32,
    /// Content length in characters.
    pub content_length: usize,
}

/// Ingest one document: validate, fingerprint, resolve language, assemble the
/// entity, and persist it through the store's advertised create operation.
///
/// Validation failures surface before any store interaction. A store with no
/// eligible create operation fails with [`IngestError::UnsupportedStore`];
/// errors from the invoked operation itself propagate unchanged. The store
/// call is the only suspension point.
pub async fn ingest(
    request: IngestRequest,
    store: &dyn DocumentStore,
    cfg: &IngestConfig,
) -> Result<IngestReceipt, IngestError> {
    let span = tracing::span!(
        Level::INFO,
        "lexico.ingest",
        uploader_id = request.uploader_id,
        filename = %request.filename
    );

    // The span is attached per poll; an enter guard must not be held across
    // the store await or it stays on the thread while the flow is suspended.
    async move {
        let start = Instant::now();
        match ingest_inner(request, store, cfg).await {
            Ok(receipt) => {
                let elapsed_micros = start.elapsed().as_micros();
                info!(
                    document_id = receipt.document_id,
                    language = %receipt.language,
                    elapsed_micros,
                    "ingest_success"
                );
                Ok(receipt)
            }
            Err(err) => {
                let elapsed_micros = start.elapsed().as_micros();
                warn!(error = %err, elapsed_micros, "ingest_failure");
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

/// Core ingest logic, separated so the wrapper owns logging uniformly.
async fn ingest_inner(
    request: IngestRequest,
    store: &dyn DocumentStore,
    cfg: &IngestConfig,
) -> Result<IngestReceipt, IngestError> {
    let IngestRequest {
        content,
        uploader_id,
        filename,
        language_code,
    } = request;

    let text = content::decode_content(content, cfg)?;
    let byte_len = text.len() as u64;

    let content_hash = hash::content_hash(&text);
    let language = language::normalize_language_code(language_code.as_deref());
    let language_id = language::resolve_language_code(language_code.as_deref());

    let mut document = Document::new(
        store.document_shape(),
        uploader_id,
        filename,
        text,
        language_id,
        content_hash.clone(),
    );

    // Speculative: the size slot may exist under any of the configured
    // spellings, or not at all. Binding failures are tolerated and logged.
    let spellings: Vec<&str> = cfg.size_field_spellings.iter().map(String::as_str).collect();
    let bound = binder::bind_optional(&mut document, &spellings, &FieldValue::UInt(byte_len));
    if bound == 0 {
        tracing::debug!("size_field_not_bound");
    }

    let document_id = probe::persist_document(store, document, &cfg.create_candidates).await?;

    Ok(IngestReceipt {
        message: "document stored".into(),
        document_id,
        language,
        content_hash,
    })
}

/// Retrieve a previously ingested document by identifier.
///
/// A plain lookup against the store; no probing on the read path. Unknown
/// identifiers yield [`IngestError::NotFound`]; store failures propagate
/// unchanged.
pub async fn retrieve(id: u64, store: &dyn DocumentStore) -> Result<DocumentSummary, IngestError> {
    let span = tracing::span!(Level::INFO, "lexico.retrieve", document_id = id);

    async move {
        let start = Instant::now();
        match retrieve_inner(id, store).await {
            Ok(summary) => {
                let elapsed_micros = start.elapsed().as_micros();
                info!(elapsed_micros, "retrieve_success");
                Ok(summary)
            }
            Err(err) => {
                let elapsed_micros = start.elapsed().as_micros();
                warn!(error = %err, elapsed_micros, "retrieve_failure");
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

async fn retrieve_inner(
    id: u64,
    store: &dyn DocumentStore,
) -> Result<DocumentSummary, IngestError> {
    match store.fetch(id).await? {
        Some(doc) => {
            let content_length = doc.content_chars();
            Ok(DocumentSummary {
                id: doc.id,
                filename: doc.filename,
                uploader_id: doc.uploader_id,
                language_id: doc.language_id,
                content_length,
            })
        }
        None => Err(IngestError::NotFound { id }),
    }
}
