//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.
use super::types::Error;
use crate::ooxml::OoxmlError;

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Xml(s) => Error::XmlError(s),
            OoxmlError::Cancelled => Error::Cancelled,
            OoxmlError::InvalidFormat(s) => Error::InvalidFormat(s),
            err @ (OoxmlError::InvalidValue { .. }
            | OoxmlError::DuplicateElement(_)
            | OoxmlError::DepthExceeded(_)) => Error::InvalidFormat(err.to_string()),
        }
    }
}
