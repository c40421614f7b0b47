use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Bookkeeping produced an impossible value; always a bug
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}
