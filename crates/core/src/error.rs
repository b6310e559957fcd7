/// Errors returned by the identity-check core.
#[derive(Debug, thiserror::Error)]
pub enum IdCheckError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An LPA status value outside the known set. This indicates a contract
    /// break with the upstream data source and must be surfaced, not
    /// papered over.
    #[error("unrecognised LPA status: '{0}'")]
    UnknownLpaStatus(String),

    #[error("failed to read document reference data: {0}")]
    ReferenceDataRead(std::io::Error),

    #[error("invalid document reference data: {0}")]
    ReferenceDataParse(serde_yaml::Error),

    #[error("failed to deserialise LPA record: {0}")]
    RecordDeserialization(serde_json::Error),
}

/// Type alias for Results that can fail with an [`IdCheckError`].
pub type IdCheckResult<T> = std::result::Result<T, IdCheckError>;
