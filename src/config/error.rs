//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Renewal check interval must be between 1 and 8760 hours")]
    InvalidInterval,

    #[error("Renewal horizon must be between 1 and 365 days, got {0}")]
    InvalidHorizon(u32),

    #[error("Snapshot file name must not be empty")]
    EmptyFileName,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
