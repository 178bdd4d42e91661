//! The document store contract and the in-memory reference adapter.
//!
//! Store adapters differ in which create operations they expose and under
//! which names. Rather than assuming a single method shape at compile time,
//! each adapter advertises a registry of [`OperationDescriptor`]s; the
//! capability probe ([`crate::persist_document`]) walks that registry against
//! its candidate list and invokes the first eligible match through
//! [`DocumentStore::create`].
//!
//! The adapter also owns the shape of its backing entity: which optional
//! fields exist and of what kind ([`DocumentStore::document_shape`]). The
//! store's internal concurrency safety is its own responsibility; this core
//! only requires `Send + Sync`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use crate::document::{Document, DocumentShape, FieldKind};

/// Declared call shape of an advertised store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationShape {
    /// Accepts one document and asynchronously yields the assigned
    /// identifier. The only shape the capability probe can invoke.
    CreateDocument,
    /// Exposed under some name but not invocable by the probe (wrong arity,
    /// argument type, or result type). Ineligible; the probe skips it.
    Other,
}

/// One operation a store advertises to the capability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Advertised operation name.
    pub name: String,
    /// Declared call shape.
    pub shape: OperationShape,
}

impl OperationDescriptor {
    /// Descriptor for an operation with the given name and shape.
    pub fn new(name: impl Into<String>, shape: OperationShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Descriptor for a probe-invocable create operation.
    pub fn create(name: impl Into<String>) -> Self {
        Self::new(name, OperationShape::CreateDocument)
    }
}

/// Errors surfaced by a store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// The underlying storage engine failed.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// [`DocumentStore::create`] was invoked with a name the store does not
    /// advertise as a create operation.
    #[error("store does not expose create operation '{name}'")]
    UnsupportedOperation {
        /// The operation name that was requested.
        name: String,
    },
}

impl StoreError {
    /// Backend failure with the given message.
    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}

/// A persistence adapter for document entities.
///
/// Implementations advertise their create operations through
/// [`operations`](DocumentStore::operations) and must reject invocations of
/// names they did not advertise. `create` is the only suspension point in the
/// ingest flow; a cancelled caller cancels the pending store call with it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The operations this store advertises, probed in the caller's
    /// candidate order.
    fn operations(&self) -> &[OperationDescriptor];

    /// The optional-field declaration of this store's backing entity.
    ///
    /// Default: no optional fields.
    fn document_shape(&self) -> DocumentShape {
        DocumentShape::new()
    }

    /// Invoke the named create operation, persisting the document and
    /// yielding the assigned identifier.
    async fn create(&self, operation: &str, document: Document) -> Result<u64, StoreError>;

    /// Look up a previously persisted document by identifier.
    async fn fetch(&self, id: u64) -> Result<Option<Document>, StoreError>;
}

/// An in-memory store over a `RwLock`ed map, for tests and embedded use.
///
/// Advertised operation names and the backing entity shape are configurable
/// so a single adapter can simulate structurally different stores.
///
/// # Example
///
/// ```rust
/// use lexico::{InMemoryStore, OperationDescriptor};
///
/// // Default adapter: advertises "create", declares a file_size field.
/// let store = InMemoryStore::new();
///
/// // Legacy adapter that only knows the domain-language verb.
/// let legacy = InMemoryStore::with_operations(vec![OperationDescriptor::create("guardar")]);
/// ```
pub struct InMemoryStore {
    operations: Vec<OperationDescriptor>,
    shape: DocumentShape,
    next_id: AtomicU64,
    records: RwLock<HashMap<u64, Document>>,
}

impl InMemoryStore {
    /// A store advertising a single `create` operation whose entity declares
    /// an unsigned `file_size` field.
    pub fn new() -> Self {
        Self::with_operations(vec![OperationDescriptor::create("create")])
    }

    /// A store advertising exactly the given operations.
    pub fn with_operations(operations: Vec<OperationDescriptor>) -> Self {
        Self {
            operations,
            shape: DocumentShape::new().field("file_size", FieldKind::UInt),
            next_id: AtomicU64::new(1),
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the backing entity shape.
    pub fn with_shape(mut self, shape: DocumentShape) -> Self {
        self.shape = shape;
        self
    }

    /// Number of persisted documents.
    pub fn len(&self) -> usize {
        self.records.read().map(|g| g.len()).unwrap_or(0)
    }

    /// True when nothing has been persisted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    fn document_shape(&self) -> DocumentShape {
        self.shape.clone()
    }

    async fn create(&self, operation: &str, mut document: Document) -> Result<u64, StoreError> {
        let advertised = self.operations.iter().any(|op| {
            op.shape == OperationShape::CreateDocument && op.name.eq_ignore_ascii_case(operation)
        });
        if !advertised {
            return Err(StoreError::UnsupportedOperation {
                name: operation.to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        document.id = id;
        self.records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(id, document);
        Ok(id)
    }

    async fn fetch(&self, id: u64) -> Result<Option<Document>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document(store: &InMemoryStore) -> Document {
        Document::new(store.document_shape(), 42, "a.txt", "hola", 1, "hash")
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let first = store
            .create("create", sample_document(&store))
            .await
            .expect("first create");
        let second = store
            .create("create", sample_document(&store))
            .await
            .expect("second create");
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn fetch_returns_persisted_document_with_assigned_id() {
        let store = InMemoryStore::new();
        let id = store
            .create("create", sample_document(&store))
            .await
            .expect("create");
        let doc = store.fetch(id).await.expect("fetch").expect("present");
        assert_eq!(doc.id, id);
        assert_eq!(doc.filename, "a.txt");
        assert!(store.fetch(id + 100).await.expect("fetch").is_none());
    }

    #[tokio::test]
    async fn unadvertised_operation_is_rejected() {
        let store = InMemoryStore::with_operations(vec![OperationDescriptor::create("guardar")]);
        let res = store.create("create", sample_document(&store)).await;
        assert_eq!(
            res,
            Err(StoreError::UnsupportedOperation {
                name: "create".into()
            })
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn advertised_name_matches_case_insensitively() {
        let store = InMemoryStore::with_operations(vec![OperationDescriptor::create("Guardar")]);
        let id = store
            .create("guardar", sample_document(&store))
            .await
            .expect("create");
        assert_eq!(id, 1);
    }
}
