use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("directory backend error: {0}")]
    Backend(String),

    #[error("invalid match pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for DirectoryError {
    fn from(e: regex::Error) -> Self {
        Self::Pattern(e.to_string())
    }
}
