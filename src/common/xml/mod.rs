//! Markup tree types consumed by the document builders.

// Submodule declarations
pub mod attributes;
pub mod element;

// Re-exports
pub use attributes::{Attributes, local_name};
pub use element::{XmlElement, XmlNode};
