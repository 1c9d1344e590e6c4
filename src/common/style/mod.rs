//! Common style and formatting types.
//!
//! This module provides the concrete style values shared by every builder.

// Submodule declarations
pub mod color;

// Re-exports
pub use color::RGBColor;
