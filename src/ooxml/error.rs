/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// [`OoxmlError::Xml`] and [`OoxmlError::InvalidFormat`] come from loading
/// markup, and [`OoxmlError::Cancelled`] from a cancelled build. The structural
/// variants are raised by element builders and absorbed at the body boundary.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// An attribute the model requires could not be interpreted
    #[error("Invalid value for {attribute}: {value:?}")]
    InvalidValue { attribute: String, value: String },

    /// A property element that may appear once appeared more than once
    #[error("Duplicate element: {0}")]
    DuplicateElement(String),

    /// Block nesting went deeper than the configured limit
    #[error("Nesting depth exceeded: {0}")]
    DepthExceeded(usize),

    /// The caller's cancellation check fired
    #[error("Build cancelled")]
    Cancelled,
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
