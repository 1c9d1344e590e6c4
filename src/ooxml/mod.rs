//! Office Open XML (OOXML) format implementation.
//!
//! This module builds document models from the XML parts of Office Open XML
//! packages. Opening the package itself (ZIP, relationships) is left to the
//! caller, which hands over part contents as bytes or as an element tree.
//!
//! # Example: Building a Word document model
//!
//! ```rust
//! use longan::ooxml::docx::{DocumentBuilder, theme::ColorScheme};
//!
//! let theme = ColorScheme::office();
//! let output = DocumentBuilder::new(&theme).build_from_xml(b"<w:document><w:body/></w:document>")?;
//! assert!(output.document.body().is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;

// Re-export error types
pub use error::{OoxmlError, Result};
