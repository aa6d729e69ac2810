use thiserror::Error;

use crate::application::{listing::ListingError, preview::PreviewError, repos::FetchError};
use crate::{domain::error::DomainError, infra::error::InfraError};

/// Top-level error for the command-line host.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<ListingError> for AppError {
    fn from(error: ListingError) -> Self {
        match error {
            ListingError::Fetch(err) => Self::Fetch(err),
            ListingError::Preview(err) => Self::Preview(err),
        }
    }
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Process exit code, loosely following `sysexits.h`.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Domain(_) | AppError::Validation(_) => 64,
            AppError::Configuration(_)
            | AppError::Preview(PreviewError::InvalidConfiguration { .. }) => 78,
            AppError::Fetch(FetchError::NotFound) => 66,
            AppError::Fetch(FetchError::InvalidRequest { .. }) => 64,
            AppError::Fetch(_) => 69,
            AppError::Infra(InfraError::Io(_)) => 74,
            AppError::Infra(_) | AppError::Unexpected(_) => 70,
        }
    }

    /// Short message suitable for people rather than logs.
    pub fn presentation_message(&self) -> &'static str {
        match self {
            AppError::Domain(_) | AppError::Validation(_) => "Request could not be processed",
            AppError::Configuration(_) => "Configuration is invalid",
            AppError::Preview(_) => "Preview is misconfigured",
            AppError::Fetch(FetchError::NotFound) => "Post not found",
            AppError::Fetch(_) => "Post API unavailable",
            AppError::Infra(InfraError::Io(_)) => "I/O failure",
            AppError::Infra(InfraError::Telemetry(_)) => "Logging subsystem could not start",
            AppError::Infra(InfraError::HttpClient { .. }) => "HTTP client could not start",
            AppError::Unexpected(_) => "Unexpected error occurred",
        }
    }
}
