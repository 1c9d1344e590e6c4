//! Unified error types for Longan library.
//!
//! This module provides a unified error type that wraps the errors raised while
//! loading markup and building the document model, presenting a consistent API
//! to users.
use thiserror::Error;

/// Main error type for Longan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid or malformed markup
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The build was abandoned by the caller
    #[error("Build cancelled")]
    Cancelled,
}

/// Result type for Longan operations.
pub type Result<T> = std::result::Result<T, Error>;
