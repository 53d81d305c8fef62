use thiserror::Error;

/// Terminal failures of a statistics request. Each kind maps to exactly one
/// client-visible status at the HTTP layer; an empty range is not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("unknown period `{0}`, expected weekly, monthly or yearly")]
    InvalidPeriod(String),
    #[error("invalid period selector `{0}`")]
    InvalidSelector(String),
    #[error("not allowed to view another user's statistics")]
    Forbidden,
    #[error("target user not found")]
    NotFound,
}
