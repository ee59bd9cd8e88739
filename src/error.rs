use thiserror::Error;

/// Failures of the ranking and proximity pipeline.
///
/// Every variant is recoverable: the record store is untouched and the caller may
/// retry with different parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("no records match selector value {0:?}")]
    InvalidSelector(String),
    #[error("k must be a positive integer")]
    InvalidK,
    #[error("no time points available to build an axis")]
    EmptyTimeAxis,
    #[error("no series value is close to the query point")]
    NoProximityMatch,
}

pub type Result<T> = std::result::Result<T, RankError>;
