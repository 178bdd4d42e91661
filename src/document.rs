//! The document entity and its declared optional fields.
//!
//! A [`Document`] is constructed fresh per request, mutated only during the
//! pre-persistence assembly phase (hash, language id, optional fields), passed
//! once to the store, and never updated or deleted by this core. Its
//! identifier stays at the `0` sentinel until the store assigns one.
//!
//! Backing stores differ in which optional attributes their entity carries and
//! under what names. Instead of guessing field names at runtime, a store
//! declares its optional attributes up front through a [`DocumentShape`]:
//! a typed list of named slots. Presence and kind of an optional field are
//! explicit facts the binder can check, not reflection results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The declared kind of an optional entity field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldKind {
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    UInt,
    /// UTF-8 text.
    Text,
}

/// A value assignable to an optional entity field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldValue {
    /// Signed 64-bit integer value.
    Int(i64),
    /// Unsigned 64-bit integer value.
    UInt(u64),
    /// Text value.
    Text(String),
}

impl FieldValue {
    /// The kind this value naturally carries.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::UInt(_) => FieldKind::UInt,
            FieldValue::Text(_) => FieldKind::Text,
        }
    }

    /// Coerce this value to the given slot kind.
    ///
    /// Exact kind matches pass through; numeric values convert across
    /// signedness when the conversion is lossless. Anything else yields
    /// `None` — the caller treats that as "not assignable", never an error.
    pub fn coerce_to(&self, kind: FieldKind) -> Option<FieldValue> {
        match (self, kind) {
            (FieldValue::Int(v), FieldKind::Int) => Some(FieldValue::Int(*v)),
            (FieldValue::UInt(v), FieldKind::UInt) => Some(FieldValue::UInt(*v)),
            (FieldValue::Text(v), FieldKind::Text) => Some(FieldValue::Text(v.clone())),
            (FieldValue::Int(v), FieldKind::UInt) => u64::try_from(*v).ok().map(FieldValue::UInt),
            (FieldValue::UInt(v), FieldKind::Int) => i64::try_from(*v).ok().map(FieldValue::Int),
            _ => None,
        }
    }
}

/// One declared optional field on a backing entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct FieldSlot {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) value: Option<FieldValue>,
}

/// Declaration of the optional fields a concrete backing entity exposes.
///
/// Built by the store adapter and consumed when constructing a [`Document`].
///
/// # Example
///
/// ```rust
/// use lexico::{DocumentShape, FieldKind};
///
/// let shape = DocumentShape::new().field("file_size", FieldKind::UInt);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentShape {
    fields: Vec<(String, FieldKind)>,
}

impl DocumentShape {
    /// A shape with no optional fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an optional field with the given name and kind.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push((name.into(), kind));
        self
    }

    /// Number of declared optional fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no optional fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One ingested text document, as assembled before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Store-assigned identifier; `0` until persistence succeeds. Assigned
    /// exclusively by the backing store, never by this core.
    pub id: u64,
    /// Caller-supplied uploader identifier, opaque to this core.
    pub uploader_id: i64,
    /// Caller-supplied filename, not validated for format.
    pub filename: String,
    /// Decoded document body.
    pub content: String,
    /// Resolved language identifier; `0` means unknown.
    pub language_id: u32,
    /// SHA-256 fingerprint of the decoded content, lowercase hex.
    pub content_hash: String,
    /// When this core received the document.
    pub received_at: DateTime<Utc>,
    /// Optional fields declared by the backing entity shape.
    extra: Vec<FieldSlot>,
}

impl Document {
    /// Construct a fresh entity over the given backing shape.
    ///
    /// The identifier starts at the `0` sentinel and `received_at` is stamped
    /// with the current UTC time.
    pub fn new(
        shape: DocumentShape,
        uploader_id: i64,
        filename: impl Into<String>,
        content: impl Into<String>,
        language_id: u32,
        content_hash: impl Into<String>,
    ) -> Self {
        let extra = shape
            .fields
            .into_iter()
            .map(|(name, kind)| FieldSlot {
                name,
                kind,
                value: None,
            })
            .collect();
        Self {
            id: 0,
            uploader_id,
            filename: filename.into(),
            content: content.into(),
            language_id,
            content_hash: content_hash.into(),
            received_at: Utc::now(),
            extra,
        }
    }

    /// Look up an optional field's bound value by name (case-insensitive).
    ///
    /// Returns `None` when the field is undeclared or unbound.
    pub fn optional_field(&self, name: &str) -> Option<&FieldValue> {
        let wanted = name.to_lowercase();
        self.extra
            .iter()
            .find(|slot| slot.name.to_lowercase() == wanted)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Content length in characters (not bytes).
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut FieldSlot> {
        let wanted = name.to_lowercase();
        self.extra
            .iter_mut()
            .find(|slot| slot.name.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(shape: DocumentShape) -> Document {
        Document::new(shape, 42, "notes.txt", "hola", 1, "abc")
    }

    #[test]
    fn shape_reports_declared_field_count() {
        let shape = DocumentShape::new();
        assert!(shape.is_empty());
        assert_eq!(shape.len(), 0);

        let shape = shape
            .field("file_size", FieldKind::UInt)
            .field("tamano_archivo", FieldKind::Int);
        assert!(!shape.is_empty());
        assert_eq!(shape.len(), 2);
    }

    #[test]
    fn new_document_starts_unpersisted() {
        let doc = entity(DocumentShape::new());
        assert_eq!(doc.id, 0);
        assert_eq!(doc.uploader_id, 42);
        assert!(doc.optional_field("file_size").is_none());
    }

    #[test]
    fn declared_slot_is_visible_case_insensitively() {
        let mut doc = entity(DocumentShape::new().field("File_Size", FieldKind::UInt));
        doc.slot_mut("file_size").unwrap().value = Some(FieldValue::UInt(9));
        assert_eq!(doc.optional_field("FILE_SIZE"), Some(&FieldValue::UInt(9)));
    }

    #[test]
    fn coercion_is_lossless_or_refused() {
        assert_eq!(
            FieldValue::UInt(5).coerce_to(FieldKind::Int),
            Some(FieldValue::Int(5))
        );
        assert_eq!(
            FieldValue::Int(5).coerce_to(FieldKind::UInt),
            Some(FieldValue::UInt(5))
        );
        // Negative cannot narrow into an unsigned slot.
        assert_eq!(FieldValue::Int(-1).coerce_to(FieldKind::UInt), None);
        // u64 values beyond i64::MAX cannot widen into a signed slot.
        assert_eq!(FieldValue::UInt(u64::MAX).coerce_to(FieldKind::Int), None);
        // No numeric-to-text conversion.
        assert_eq!(FieldValue::UInt(5).coerce_to(FieldKind::Text), None);
    }

    #[test]
    fn content_chars_counts_characters_not_bytes() {
        let doc = Document::new(DocumentShape::new(), 1, "a.txt", "año", 0, "h");
        assert_eq!(doc.content_chars(), 3);
        assert_eq!(doc.content.len(), 4);
    }
}
