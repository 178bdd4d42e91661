//! Best-effort binding of optional entity fields.
//!
//! Backing entity shapes vary across deployments: an optional attribute may be
//! declared under one of several spellings, with a different numeric kind, or
//! not at all. The binder assigns a value to every declared slot matching one
//! of the supplied spellings and silently does nothing for the rest.
//!
//! The tolerance is deliberate, but never invisible: every spelling that does
//! not bind emits a `tracing` event so a drifting entity schema shows up in
//! logs instead of silently dropping data.

use tracing::{debug, trace};

use crate::document::{Document, FieldValue};

/// Assign `value` to every declared optional field matching one of the given
/// spellings.
///
/// Each spelling is attempted independently (intentional redundancy across
/// naming variants of one logical attribute, not mutual exclusion). A spelling
/// binds when the document's shape declares a slot under that name
/// (case-insensitive) and the value coerces to the slot's kind; otherwise it
/// is skipped. Never errors, and repeating the same call leaves the document
/// in the same state.
///
/// Returns the number of slots bound.
///
/// # Examples
///
/// ```rust
/// use lexico::{bind_optional, Document, DocumentShape, FieldKind, FieldValue};
///
/// let shape = DocumentShape::new().field("file_size", FieldKind::UInt);
/// let mut doc = Document::new(shape, 1, "a.txt", "hola", 1, "hash");
///
/// let bound = bind_optional(&mut doc, &["file_size", "tamano_archivo"], &FieldValue::UInt(4));
/// assert_eq!(bound, 1);
/// assert_eq!(doc.optional_field("file_size"), Some(&FieldValue::UInt(4)));
/// ```
pub fn bind_optional(doc: &mut Document, spellings: &[&str], value: &FieldValue) -> usize {
    let mut bound = 0;
    for spelling in spellings {
        match doc.slot_mut(spelling) {
            Some(slot) => match value.coerce_to(slot.kind) {
                Some(coerced) => {
                    slot.value = Some(coerced);
                    bound += 1;
                    trace!(field = %slot.name, "optional_field_bound");
                }
                None => {
                    debug!(
                        field = %slot.name,
                        declared = ?slot.kind,
                        supplied = ?value.kind(),
                        "optional_field_skipped_incompatible"
                    );
                }
            },
            None => {
                debug!(spelling = %spelling, "optional_field_skipped_undeclared");
            }
        }
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentShape, FieldKind};

    fn doc_with(shape: DocumentShape) -> Document {
        Document::new(shape, 7, "doc.txt", "contenido", 1, "hash")
    }

    #[test]
    fn binds_matching_integer_field() {
        let mut doc = doc_with(DocumentShape::new().field("file_size", FieldKind::UInt));
        let bound = bind_optional(
            &mut doc,
            &["file_size", "tamano_archivo"],
            &FieldValue::UInt(128),
        );
        assert_eq!(bound, 1);
        assert_eq!(doc.optional_field("file_size"), Some(&FieldValue::UInt(128)));
    }

    #[test]
    fn no_matching_field_is_a_noop() {
        let mut doc = doc_with(DocumentShape::new());
        let before = doc.clone();
        let bound = bind_optional(
            &mut doc,
            &["file_size", "tamano_archivo"],
            &FieldValue::UInt(128),
        );
        assert_eq!(bound, 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn repeating_the_same_call_is_idempotent() {
        let mut doc = doc_with(DocumentShape::new().field("file_size", FieldKind::UInt));
        bind_optional(&mut doc, &["file_size"], &FieldValue::UInt(64));
        let after_first = doc.clone();
        bind_optional(&mut doc, &["file_size"], &FieldValue::UInt(64));
        assert_eq!(doc, after_first);
    }

    #[test]
    fn spellings_are_independent() {
        let shape = DocumentShape::new()
            .field("file_size", FieldKind::UInt)
            .field("tamano_archivo", FieldKind::Int);
        let mut doc = doc_with(shape);
        let bound = bind_optional(
            &mut doc,
            &["file_size", "tamano_archivo"],
            &FieldValue::UInt(32),
        );
        // Both spellings bind; the second through lossless UInt -> Int coercion.
        assert_eq!(bound, 2);
        assert_eq!(doc.optional_field("file_size"), Some(&FieldValue::UInt(32)));
        assert_eq!(
            doc.optional_field("tamano_archivo"),
            Some(&FieldValue::Int(32))
        );
    }

    #[test]
    fn incompatible_value_is_skipped_without_error() {
        let mut doc = doc_with(DocumentShape::new().field("file_size", FieldKind::UInt));
        let bound = bind_optional(&mut doc, &["file_size"], &FieldValue::Int(-5));
        assert_eq!(bound, 0);
        assert!(doc.optional_field("file_size").is_none());
    }

    #[test]
    fn matching_tolerates_locale_spellings() {
        // An entity declared with the eñe variant still matches the caller's
        // spelling of the same name, case-insensitively.
        let mut doc = doc_with(DocumentShape::new().field("Tamaño_Archivo", FieldKind::UInt));
        let bound = bind_optional(&mut doc, &["tamaño_archivo"], &FieldValue::UInt(16));
        assert_eq!(bound, 1);
        assert_eq!(
            doc.optional_field("tamaño_archivo"),
            Some(&FieldValue::UInt(16))
        );
    }
}
