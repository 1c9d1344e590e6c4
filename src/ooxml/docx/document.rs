/// Document - the entry point that turns a document part into a model.
use crate::common::{DiagnosticKind, DiagnosticSink, Diagnostics, TreePath, XmlElement};
use crate::ooxml::docx::background::Background;
use crate::ooxml::docx::body::Body;
use crate::ooxml::docx::context::{BuildContext, CancelCheck};
use crate::ooxml::docx::options::BuildOptions;
use crate::ooxml::docx::theme::ThemePalette;
use crate::ooxml::error::Result;
use rayon::prelude::*;
use serde::Serialize;

/// A Word document model.
///
/// Built once from the `word/document.xml` part and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    body: Body,
    background: Option<Background>,
}

impl Document {
    /// The block content, in reading order. Empty if the part had no body.
    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The page background, if the part declared one.
    #[inline]
    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Text of the top-level paragraphs, one per line.
    pub fn text(&self) -> String {
        self.body
            .paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A built document together with the diagnostics recorded while building it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOutput {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

/// Builds [`Document`] models against a theme palette.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::{DocumentBuilder, theme::ColorScheme};
///
/// let xml = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:background w:themeColor="accent1" w:themeShade="BF"/>
///   <w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body>
/// </w:document>"#;
///
/// let palette = ColorScheme::office();
/// let output = DocumentBuilder::new(&palette).build_from_xml(xml)?;
/// assert_eq!(output.document.text(), "Hello");
/// assert!(output.document.background().unwrap().color.is_some());
/// assert!(output.diagnostics.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DocumentBuilder<'a> {
    palette: &'a dyn ThemePalette,
    options: BuildOptions,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(palette: &'a dyn ThemePalette) -> Self {
        Self {
            palette,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build a document from the root element of a document part.
    pub fn build(&self, root: &XmlElement) -> BuildOutput {
        let mut diagnostics = Diagnostics::new();
        let document = self.build_into(root, &mut diagnostics);
        BuildOutput {
            document,
            diagnostics,
        }
    }

    /// Build a document, sending diagnostics to a caller-owned sink.
    pub fn build_into(&self, root: &XmlElement, sink: &mut dyn DiagnosticSink) -> Document {
        let mut ctx = BuildContext::new(self.palette, sink, &self.options);
        // Without a cancellation check nothing can fail.
        build_document(root, &mut ctx).unwrap_or_default()
    }

    /// Build a document, polling `cancel` between sibling elements.
    ///
    /// Returns [`OoxmlError::Cancelled`](crate::ooxml::OoxmlError::Cancelled)
    /// once `cancel` returns `true`; the partial document is dropped.
    pub fn build_cancellable(&self, root: &XmlElement, cancel: CancelCheck<'_>) -> Result<BuildOutput> {
        let mut diagnostics = Diagnostics::new();
        let document = {
            let mut ctx =
                BuildContext::new(self.palette, &mut diagnostics, &self.options).with_cancel(cancel);
            build_document(root, &mut ctx)?
        };
        Ok(BuildOutput {
            document,
            diagnostics,
        })
    }

    /// Parse a document part and build it.
    ///
    /// Fails only if the bytes are not well-formed XML.
    pub fn build_from_xml(&self, xml: &[u8]) -> Result<BuildOutput> {
        let root = XmlElement::parse(xml)?;
        Ok(self.build(&root))
    }

    /// Build independent documents in parallel, one output per root, in
    /// input order.
    pub fn build_many(&self, roots: &[XmlElement]) -> Vec<BuildOutput> {
        roots.par_iter().map(|root| self.build(root)).collect()
    }
}

/// Locate `body` and `background` under `root` and build both.
fn build_document(root: &XmlElement, ctx: &mut BuildContext<'_>) -> Result<Document> {
    let root_path = TreePath::root(root.local_name());

    let background = root
        .find_first("background")
        .map(|el| Background::build(el, &root_path.element("background"), ctx));

    let body = match root.find_first("body") {
        Some(el) => Body::build(el, &root_path.element("body"), ctx)?,
        None => {
            ctx.diagnose(root_path, DiagnosticKind::MissingBody, None);
            Body::default()
        },
    };

    Ok(Document { body, background })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::ooxml::docx::body::BlockNode;
    use crate::ooxml::docx::theme::{ColorScheme, ThemeColor};
    use crate::ooxml::error::OoxmlError;
    use std::cell::Cell;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn part(inner: &str) -> Vec<u8> {
        format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:document {NS}>{inner}</w:document>"#)
            .into_bytes()
    }

    fn build(inner: &str) -> BuildOutput {
        let palette = ColorScheme::office();
        DocumentBuilder::new(&palette)
            .build_from_xml(&part(inner))
            .unwrap()
    }

    #[test]
    fn test_no_background() {
        let output = build("<w:body/>");
        assert_eq!(output.document.background(), None);
        assert!(output.document.body().is_empty());
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_background_is_attached() {
        let output = build(r#"<w:background w:color="FF0000"/><w:body/>"#);
        assert_eq!(
            output.document.background(),
            Some(&Background {
                color: Some(RGBColor::new(255, 0, 0)),
                theme_color: None,
                theme_shade: None,
                theme_tint: None,
            })
        );
    }

    #[test]
    fn test_background_without_attributes() {
        let output = build("<w:background/><w:body/>");
        assert_eq!(output.document.background(), Some(&Background::default()));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_body() {
        let output = build(r#"<w:background w:themeColor="accent2"/>"#);
        assert!(output.document.body().is_empty());
        assert_eq!(output.diagnostics.len(), 1);
        let d = output.diagnostics.iter().next().unwrap();
        assert_eq!(d.kind, DiagnosticKind::MissingBody);
        assert_eq!(d.location.to_string(), "/document");
        assert_eq!(
            output.document.background().unwrap().theme_color,
            Some(ThemeColor::Accent2)
        );
    }

    #[test]
    fn test_full_document() {
        let output = build(
            r#"<w:body>
                <w:p><w:r><w:t>Title</w:t></w:r></w:p>
                <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
                <w:p><w:pPr><w:pPr/></w:pPr></w:p>
                <w:p><w:pPr/><w:pPr/></w:p>
                <w:p><w:r><w:rPr><w:color w:val="0000FF"/></w:rPr><w:t xml:space="preserve"> end </w:t></w:r></w:p>
                <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
            </w:body>"#,
        );
        let body = output.document.body();
        assert_eq!(body.len(), 5);
        assert!(matches!(body.blocks()[1], BlockNode::Table(_)));
        assert!(matches!(body.blocks()[4], BlockNode::Section(_)));
        assert_eq!(output.document.text(), "Title\n\n end ");

        let last = body.paragraphs().last().unwrap();
        assert_eq!(last.runs[0].color(), Some(RGBColor::new(0, 0, 255)));
        assert_eq!(output.diagnostics.count(DiagnosticKind::ElementFailed), 1);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let palette = ColorScheme::office();
        let result = DocumentBuilder::new(&palette).build_from_xml(b"<w:document><w:body>");
        assert!(result.is_err());
    }

    #[test]
    fn test_build_cancellable() {
        let palette = ColorScheme::office();
        let root = XmlElement::parse(&part("<w:body><w:p/><w:p/></w:body>")).unwrap();
        let builder = DocumentBuilder::new(&palette);

        let never = || false;
        let output = builder.build_cancellable(&root, &never).unwrap();
        assert_eq!(output.document.body().len(), 2);

        let fired = Cell::new(false);
        let check = || fired.replace(true);
        assert!(matches!(
            builder.build_cancellable(&root, &check),
            Err(OoxmlError::Cancelled)
        ));
    }

    #[test]
    fn test_build_many_preserves_order() {
        let palette = ColorScheme::office();
        let roots: Vec<XmlElement> = (0..8)
            .map(|i| {
                XmlElement::parse(&part(&format!(
                    "<w:body><w:p><w:r><w:t>doc {i}</w:t></w:r></w:p></w:body>"
                )))
                .unwrap()
            })
            .collect();

        let outputs = DocumentBuilder::new(&palette).build_many(&roots);
        assert_eq!(outputs.len(), 8);
        for (i, output) in outputs.iter().enumerate() {
            assert_eq!(output.document.text(), format!("doc {i}"));
        }
    }

    #[test]
    fn test_builds_are_deterministic() {
        let palette = ColorScheme::office();
        let root = XmlElement::parse(&part(
            r#"<w:background w:color="nope"/><w:body><w:p><w:r><w:t>x</w:t></w:r></w:p><w:foo/></w:body>"#,
        ))
        .unwrap();
        let builder = DocumentBuilder::new(&palette);
        assert_eq!(builder.build(&root), builder.build(&root));
    }

    #[test]
    fn test_model_serializes() {
        let output = build(r#"<w:background w:color="00FF00"/><w:body><w:p/></w:body>"#);
        let json = serde_json::to_value(&output.document).unwrap();
        assert_eq!(json["background"]["color"]["g"], 255);
        assert_eq!(json["body"][0]["type"], "paragraph");
    }
}
