use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid post path `{path}`: expected `<slug>/<id>`")]
    InvalidPostPath { path: String },
}

impl DomainError {
    pub fn invalid_post_path(path: impl Into<String>) -> Self {
        Self::InvalidPostPath { path: path.into() }
    }
}
