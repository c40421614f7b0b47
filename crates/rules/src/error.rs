use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuleError>;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}
