//! Common types, traits, and utilities shared across builders.
//!
//! This module provides the markup tree, concrete style values, diagnostics
//! and the unified error type used throughout the crate.

// Submodule declarations
pub mod diagnostics;
pub mod error;
pub mod style;
pub mod xml;

// Re-exports for convenience
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, TreePath};
pub use error::{Error, Result};
pub use style::RGBColor;
pub use xml::{XmlElement, XmlNode};
