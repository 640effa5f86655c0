//! Pipeline error taxonomy
//!
//! Catalog-level failures abort the run before any aggregate exists.
//! Batch-level failures are caught at the batch boundary and recorded;
//! the run continues with the remaining batches.

#[derive(Debug)]
pub enum PipelineError {
    /// Catalog endpoint failed; fatal, there is nothing to aggregate
    CatalogFetch(String),
    /// A batch handed to the metadata step exceeds the 100-id limit.
    /// Programming-contract violation, fatal, never silently truncated.
    BatchSize { len: usize },
    /// One batch's metadata call failed; that batch's contribution is dropped
    MetadataFetch(String),
    /// Malformed raw metadata payload; that batch's contribution is dropped
    Normalization(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::CatalogFetch(e) => {
                write!(f, "Cannot get cryptocurrency ids: {}", e)
            }
            PipelineError::BatchSize { len } => {
                write!(f, "Cannot fetch more than 100 tokens at once (got {})", len)
            }
            PipelineError::MetadataFetch(e) => {
                write!(f, "Cannot get cryptocurrency metadata: {}", e)
            }
            PipelineError::Normalization(e) => {
                write!(f, "Malformed metadata payload: {}", e)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

impl PipelineError {
    /// Batch-level errors are isolated; anything else aborts the run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::CatalogFetch(_) | PipelineError::BatchSize { .. }
        )
    }
}
