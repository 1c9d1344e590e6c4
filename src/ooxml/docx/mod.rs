/// Word (.docx) document model building.
///
/// This module turns the main document part of a Word document
/// (`word/document.xml`) into an immutable document model.
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `DocumentBuilder`: Entry point; locates the body and background
/// - `Body`: Ordered block content, built through a tag registry
/// - `Background`: Page background descriptor
/// - `ColorResolver`: Turns direct and theme colors into concrete RGB values
/// - `ThemePalette`: Caller-supplied lookup from theme slot to base color
/// - `BuildContext`: Palette, diagnostics and options threaded through builders
///
/// # Example
///
/// ```rust
/// use longan::ooxml::docx::{BlockNode, DocumentBuilder, theme::ColorScheme};
///
/// let xml = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:body>
///     <w:p><w:r><w:rPr><w:color w:val="auto" w:themeColor="accent1"/></w:rPr><w:t>Hi</w:t></w:r></w:p>
///     <w:unknownThing/>
///   </w:body>
/// </w:document>"#;
///
/// let palette = ColorScheme::office();
/// let output = DocumentBuilder::new(&palette).build_from_xml(xml)?;
///
/// for block in output.document.body() {
///     if let BlockNode::Paragraph(para) = block {
///         for run in para.runs() {
///             println!("{} in {:?}", run.text(), run.color());
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod background;
pub mod body;
pub mod color;
pub mod context;
pub mod document;
pub mod enums;
pub mod options;
pub mod paragraph;
pub mod section;
pub mod table;
pub mod theme;
mod values;

pub use background::Background;
pub use body::{BlockNode, Body, ElementKind};
pub use color::{ColorResolver, ColorSpec, DirectColor};
pub use context::BuildContext;
pub use document::{BuildOutput, Document, DocumentBuilder};
pub use options::{BuildOptions, DegradePolicy};
pub use paragraph::{Paragraph, Run, RunProperties};
pub use section::Section;
pub use table::{Cell, Row, Table};
pub use theme::{ColorScheme, ThemeColor, ThemePalette};
