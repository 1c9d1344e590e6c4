//! Longan - builds document models from WordprocessingML
//!
//! This library converts the markup of a Word document's main part into a
//! strongly-typed, immutable document model for layout and rendering.
//!
//! # Features
//!
//! - **Tolerant dispatch**: Unknown elements are skipped, and a malformed
//!   element costs only itself, never the whole document
//! - **Theme-aware colors**: Theme colors with shade and tint resolve to
//!   concrete RGB values through a single resolver
//! - **Explicit context**: The theme palette and the diagnostics sink are
//!   passed into every build; there is no global state
//! - **Parallel builds**: Independent documents can be built concurrently
//!
//! # Example
//!
//! ```rust
//! use longan::common::RGBColor;
//! use longan::ooxml::docx::{DocumentBuilder, theme::ColorScheme};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xml = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
//!   <w:background w:color="FF0000"/>
//!   <w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body>
//! </w:document>"#;
//!
//! let palette = ColorScheme::office();
//! let output = DocumentBuilder::new(&palette).build_from_xml(xml)?;
//!
//! assert_eq!(output.document.text(), "Hello");
//! assert_eq!(
//!     output.document.background().and_then(|b| b.color),
//!     Some(RGBColor::new(255, 0, 0))
//! );
//! for diagnostic in &output.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```

/// Common types shared by all builders
///
/// Markup tree, concrete colors, diagnostics and the unified error type.
pub mod common;

/// OOXML (Office Open XML) model builders
///
/// This module provides the WordprocessingML document builder.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Diagnostic, DiagnosticKind, Diagnostics, Error, RGBColor, Result, XmlElement};
pub use ooxml::docx::{Document, DocumentBuilder};
