use context_ignore::IgnoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectorError>;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Ignore check failed: {0}")]
    Ignore(#[from] IgnoreError),
}
