use thiserror::Error;

pub type Result<T> = std::result::Result<T, IgnoreError>;

#[derive(Error, Debug)]
pub enum IgnoreError {
    /// Caller passed a path or URI the engine cannot reason about
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IgnoreError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
