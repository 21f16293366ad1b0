use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a validation call outright. Data-level findings
/// (mismatches, parse failures, structural drift) are reported through
/// [`crate::ValidationReport`] instead, so a `Failed` verdict is still
/// an `Ok` return.
#[derive(Debug, Error)]
pub enum Error {
    /// Cursor metadata could not be read, or the columnar projection
    /// returned something that is not a JSON object per row.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// A collaborator query or connection failed. Propagated unmodified;
    /// any retry policy belongs to the collaborator.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
}

impl Error {
    pub fn metadata(msg: impl Into<String>) -> Self {
        Error::Metadata(msg.into())
    }

    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Error::SourceUnavailable(msg.into())
    }
}
