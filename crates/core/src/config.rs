//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::{IdCheckError, IdCheckResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    document_data_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `document_data_path` optionally overrides the embedded country/document
    /// reference table with an on-disk YAML file. When provided, the path must
    /// point at an existing file; validation happens here so that a bad
    /// override fails at startup rather than on the first lookup.
    pub fn new(document_data_path: Option<PathBuf>) -> IdCheckResult<Self> {
        if let Some(path) = &document_data_path {
            if !path.is_file() {
                return Err(IdCheckError::InvalidInput(format!(
                    "document data override is not a readable file: {}",
                    path.display()
                )));
            }
        }

        Ok(Self { document_data_path })
    }

    pub fn document_data_path(&self) -> Option<&Path> {
        self.document_data_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_no_override() {
        let cfg = CoreConfig::new(None).expect("no override should be valid");
        assert!(cfg.document_data_path().is_none());
    }

    #[test]
    fn test_new_rejects_missing_override_file() {
        let err = CoreConfig::new(Some(PathBuf::from("/nonexistent/documents.yaml")))
            .expect_err("should reject missing file");
        assert!(matches!(err, IdCheckError::InvalidInput(msg) if msg.contains("not a readable")));
    }

    #[test]
    fn test_new_accepts_existing_override_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("documents.yaml");
        std::fs::write(&path, "GBR: []\n").expect("should write file");

        let cfg = CoreConfig::new(Some(path.clone())).expect("existing file should be valid");
        assert_eq!(cfg.document_data_path(), Some(path.as_path()));
    }
}
