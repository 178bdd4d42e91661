//! Capability probe over a store's advertised operation registry.
//!
//! A single ingest flow has to work against structurally different store
//! adapters without compile-time coupling to one method name. The probe holds
//! an ordered candidate list (priority order, owned by configuration), matches
//! it case-insensitively against the operations the store advertises, and
//! invokes the first eligible match. The search is bounded and observable:
//! the selected operation is logged, and a store with no eligible operation
//! fails with a diagnostic enumerating every candidate tried.

use tracing::{debug, warn};

use crate::document::Document;
use crate::error::IngestError;
use crate::store::{DocumentStore, OperationShape};

/// Select the first candidate the store advertises as an eligible create
/// operation.
///
/// Candidates are tried in order; a candidate matches when the store
/// advertises an operation under that name (case-insensitive) with shape
/// [`OperationShape::CreateDocument`]. Name matches with an incompatible
/// shape are ineligible and skipped. Returns the advertised name of the
/// winning operation, or `None` when nothing matches.
pub fn select_create_operation(store: &dyn DocumentStore, candidates: &[String]) -> Option<String> {
    candidates.iter().find_map(|candidate| {
        store
            .operations()
            .iter()
            .find(|op| {
                op.shape == OperationShape::CreateDocument
                    && op.name.eq_ignore_ascii_case(candidate)
            })
            .map(|op| op.name.clone())
    })
}

/// Persist a document through the first eligible advertised operation.
///
/// Selection completes before invocation: once an operation is chosen, no
/// further candidates are tried, and an error raised by the invocation itself
/// propagates unmodified. When no candidate is eligible the probe fails with
/// [`IngestError::UnsupportedStore`] carrying every name it attempted — an
/// integration error that must not be retried.
///
/// The store call is the only suspension point; cancelling the enclosing
/// future cancels the pending invocation without a retry.
pub async fn persist_document(
    store: &dyn DocumentStore,
    document: Document,
    candidates: &[String],
) -> Result<u64, IngestError> {
    match select_create_operation(store, candidates) {
        Some(operation) => {
            debug!(operation = %operation, "capability_probe_selected");
            let id = store.create(&operation, document).await?;
            Ok(id)
        }
        None => {
            warn!(attempted = ?candidates, "capability_probe_unsupported");
            Err(IngestError::UnsupportedStore {
                attempted: candidates.to_vec(),
            })
        }
    }
}
