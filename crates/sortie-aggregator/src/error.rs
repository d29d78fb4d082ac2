use thiserror::Error;

use sortie_sources::SourceError;

/// Errors from the aggregation pipeline, split by who is at fault.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The caller omitted the required coordinates.
    #[error("lat and lng are required")]
    MissingCoordinates,

    /// The caller asked for a category outside the supported set.
    #[error("category '{0}' not supported")]
    UnsupportedCategory(String),

    /// An upstream provider call failed; the whole aggregation aborts
    /// with no partial results.
    #[error("upstream source failure: {0}")]
    Source(#[from] SourceError),
}

impl AggregateError {
    /// Whether this is the caller's fault (HTTP 400 class) rather than an
    /// upstream failure (HTTP 500 class).
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AggregateError::MissingCoordinates | AggregateError::UnsupportedCategory(_)
        )
    }
}
