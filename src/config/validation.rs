//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that source directories exist
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure apart from `stat` calls on configured directories

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field}: {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} {path:?} is not a directory")]
    NotADirectory { field: &'static str, path: PathBuf },

    #[error("archive_extension must be non-empty and given without a dot, got {0:?}")]
    InvalidExtension(String),

    #[error("not_found_page must be a file name under the root, got {0:?}")]
    InvalidNotFoundPage(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let site = &config.site;
    if !site.root.is_dir() {
        errors.push(ValidationError::NotADirectory {
            field: "site.root",
            path: site.root.clone(),
        });
    }

    for source in &site.sources {
        if !source.root.is_dir() {
            errors.push(ValidationError::NotADirectory {
                field: "site.sources.root",
                path: source.root.clone(),
            });
        }
    }

    let extension = &site.archive_extension;
    if extension.is_empty() || extension.contains('.') || extension.contains('/') {
        errors.push(ValidationError::InvalidExtension(extension.clone()));
    }

    let page = &site.not_found_page;
    if page.is_empty() || page.contains('/') || page.contains('\\') || page == ".." {
        errors.push(ValidationError::InvalidNotFoundPage(page.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
