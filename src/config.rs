//! Configuration for the ingestion core.
//!
//! [`IngestConfig`] controls the content size bound, the capability probe's
//! candidate operation names, and the optional-field spellings the binder
//! tries. It is cheap to clone and serializable, so deployments that carry
//! historical store naming conventions resolve them through configuration
//! rather than per-call discovery.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default candidate operation names, in priority order.
///
/// Generic English create verbs first, then the domain-language synonyms some
/// legacy store adapters advertise.
pub const DEFAULT_CREATE_CANDIDATES: [&str; 7] = [
    "create", "insert", "add", "save", "guardar", "cargar", "subir",
];

/// Default spellings for the optional size field on the backing entity.
pub const DEFAULT_SIZE_FIELD_SPELLINGS: [&str; 2] = ["file_size", "tamano_archivo"];

/// Runtime configuration for ingest behavior.
///
/// # Example
///
/// ```rust
/// use lexico::IngestConfig;
///
/// let config = IngestConfig {
///     max_content_bytes: Some(200_000_000),
///     ..Default::default()
/// };
/// config.validate().expect("invalid configuration");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Semantic version of the ingest configuration.
    ///
    /// Default: `1`
    pub version: u32,

    /// Maximum content byte length accepted, checked on the raw bytes before
    /// decoding. `None` means unlimited.
    ///
    /// Default: `None`
    #[serde(default)]
    pub max_content_bytes: Option<usize>,

    /// Candidate create-operation names the capability probe tries, in
    /// priority order. Matching against a store's advertised registry is
    /// case-insensitive.
    ///
    /// Default: [`DEFAULT_CREATE_CANDIDATES`]
    pub create_candidates: Vec<String>,

    /// Alternate spellings for the backing entity's optional size field.
    ///
    /// Each spelling is tried independently by the binder; at least two are
    /// kept by default to tolerate locale variation in entity field naming.
    ///
    /// Default: [`DEFAULT_SIZE_FIELD_SPELLINGS`]
    pub size_field_spellings: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_content_bytes: None,
            create_candidates: DEFAULT_CREATE_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            size_field_spellings: DEFAULT_SIZE_FIELD_SPELLINGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl IngestConfig {
    /// Validates internal consistency of this configuration.
    ///
    /// Intended to run at process start-up so misconfigurations surface
    /// before live traffic. In-memory checks only.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.create_candidates.is_empty() {
            return Err(ConfigError::NoCreateCandidates);
        }
        if self.size_field_spellings.is_empty() {
            return Err(ConfigError::NoSizeFieldSpellings);
        }
        if self.max_content_bytes == Some(0) {
            return Err(ConfigError::ZeroContentLimit);
        }
        Ok(())
    }
}

/// Errors that can occur when validating an [`IngestConfig`].
///
/// These are configuration-time issues, surfaced during service start-up
/// rather than at request time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The probe has no candidate operation names to try, so every ingest
    /// would fail as unsupported.
    #[error("create_candidates must not be empty")]
    NoCreateCandidates,

    /// The binder has no spellings to try for the optional size field.
    #[error("size_field_spellings must not be empty")]
    NoSizeFieldSpellings,

    /// A zero content limit rejects every upload.
    #[error("max_content_bytes must be non-zero when set")]
    ZeroContentLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = IngestConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.create_candidates.first().map(String::as_str), Some("create"));
        assert_eq!(cfg.create_candidates.len(), 7);
        assert_eq!(cfg.size_field_spellings.len(), 2);
    }

    #[test]
    fn empty_candidate_list_rejected() {
        let cfg = IngestConfig {
            create_candidates: vec![],
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoCreateCandidates));
    }

    #[test]
    fn empty_spellings_rejected() {
        let cfg = IngestConfig {
            size_field_spellings: vec![],
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoSizeFieldSpellings));
    }

    #[test]
    fn zero_content_limit_rejected() {
        let cfg = IngestConfig {
            max_content_bytes: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroContentLimit));
    }
}
