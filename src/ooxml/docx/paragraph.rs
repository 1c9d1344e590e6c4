/// Paragraph and Run structures for Word documents.
use crate::common::{DiagnosticKind, RGBColor, TreePath, XmlElement};
use crate::ooxml::docx::color::{FILL_KEYS, TEXT_KEYS};
use crate::ooxml::docx::context::BuildContext;
use crate::ooxml::docx::enums::Justification;
use crate::ooxml::docx::section::Section;
use crate::ooxml::docx::values::{ensure_once, optional_number, toggle};
use crate::ooxml::error::{OoxmlError, Result};
use serde::Serialize;

/// Run formatting (`w:rPr`).
///
/// Every field is optional: `None` means "not specified here", so the value
/// comes from whatever the run inherits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunProperties {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    /// Font size in half-points
    pub size: Option<u32>,
    /// `w:rFonts/@ascii`
    pub font: Option<String>,
    pub color: Option<RGBColor>,
    pub highlight: Option<RGBColor>,
}

impl RunProperties {
    /// Read a `w:rPr` element. Unknown children are ignored; unreadable
    /// values are reported and left unset.
    pub fn from_element(rpr: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Self {
        let mut props = Self::default();

        for child in rpr.children() {
            let name = child.local_name();
            let child_path = path.element(name);
            match name {
                "b" => props.bold = toggle(child, &child_path, ctx),
                "i" => props.italic = toggle(child, &child_path, ctx),
                "strike" => props.strikethrough = toggle(child, &child_path, ctx),
                "u" => props.underline = Some(child.attr("val") != Some("none")),
                "sz" => props.size = optional_number(child, "val", &child_path, ctx),
                "rFonts" => {
                    props.font = child
                        .attr("ascii")
                        .or_else(|| child.attr("hAnsi"))
                        .map(str::to_string);
                },
                "color" => props.color = ctx.resolve_color(child, &TEXT_KEYS, &child_path),
                "highlight" => {
                    props.highlight = match child.attr("val") {
                        None | Some("none") => None,
                        Some(value) => {
                            let color = RGBColor::from_name(value);
                            if color.is_none() {
                                ctx.diagnose(
                                    child_path.attribute("val"),
                                    DiagnosticKind::InvalidColor,
                                    Some(value.to_string()),
                                );
                            }
                            color
                        },
                    };
                },
                _ => {},
            }
        }

        props
    }

    /// Fill every unset field from `parent`.
    pub fn inherit(self, parent: &RunProperties) -> Self {
        Self {
            bold: self.bold.or(parent.bold),
            italic: self.italic.or(parent.italic),
            underline: self.underline.or(parent.underline),
            strikethrough: self.strikethrough.or(parent.strikethrough),
            size: self.size.or(parent.size),
            font: self.font.or_else(|| parent.font.clone()),
            color: self.color.or(parent.color),
            highlight: self.highlight.or(parent.highlight),
        }
    }
}

/// A text run (`w:r`) with its effective formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    /// Text content; tabs and breaks appear as `\t` and `\n`
    pub text: String,
    /// Run formatting merged over the inherited defaults
    pub properties: RunProperties,
}

impl Run {
    /// Build a run from a `w:r` element.
    pub fn build(r: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let mut text = String::new();
        let mut own = RunProperties::default();
        let mut seen_rpr = false;

        for child in r.children() {
            match child.local_name() {
                "rPr" => {
                    ensure_once(&mut seen_rpr, child)?;
                    own = RunProperties::from_element(child, &path.element("rPr"), ctx);
                },
                "t" => text.push_str(&child.text()),
                "tab" => text.push('\t'),
                "br" | "cr" => text.push('\n'),
                "noBreakHyphen" => text.push('\u{2011}'),
                "softHyphen" => text.push('\u{00AD}'),
                _ => {},
            }
        }

        Ok(Self {
            text,
            properties: own.inherit(ctx.inherited_run_properties()),
        })
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn bold(&self) -> Option<bool> {
        self.properties.bold
    }

    #[inline]
    pub fn italic(&self) -> Option<bool> {
        self.properties.italic
    }

    #[inline]
    pub fn color(&self) -> Option<RGBColor> {
        self.properties.color
    }
}

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element. Runs nested in hyperlinks, insertions,
/// smart tags, simple fields and inline content controls are flattened into
/// [`Paragraph::runs`] in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// `w:pStyle/@val`
    pub style_id: Option<String>,
    pub alignment: Option<Justification>,
    /// Resolved `w:shd` fill
    pub shading: Option<RGBColor>,
    /// Section properties ending at this paragraph, if it closes a section
    pub section_break: Option<Section>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Build a paragraph from a `w:p` element.
    ///
    /// Fails if `w:pPr` appears more than once, if a run cannot be built, or
    /// if inline wrappers nest deeper than the configured limit. A section
    /// break that cannot be built is reported and dropped; the runs are kept.
    pub fn build(p: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let mut para = Self::default();
        let mut seen_ppr = false;

        for (index, child) in p.children().enumerate() {
            if child.local_name() == "pPr" {
                ensure_once(&mut seen_ppr, child)?;
                para.apply_properties(child, &path.element("pPr"), ctx)?;
            } else {
                collect_runs(child, &path.child(child.local_name(), index), ctx, &mut para.runs)?;
            }
        }

        Ok(para)
    }

    fn apply_properties(
        &mut self,
        ppr: &XmlElement,
        path: &TreePath,
        ctx: &mut BuildContext<'_>,
    ) -> Result<()> {
        for child in ppr.children() {
            let name = child.local_name();
            match name {
                "pStyle" => self.style_id = child.attr("val").map(str::to_string),
                "jc" => {
                    self.alignment = child.attr("val").and_then(|value| {
                        let jc = Justification::from_xml(value);
                        if jc.is_none() {
                            ctx.diagnose(
                                path.element(name).attribute("val"),
                                DiagnosticKind::InvalidAttribute,
                                Some(value.to_string()),
                            );
                        }
                        jc
                    });
                },
                "shd" => self.shading = ctx.resolve_color(child, &FILL_KEYS, &path.element(name)),
                "sectPr" => {
                    let sect_path = path.element(name);
                    match Section::build(child, &sect_path, ctx) {
                        Ok(section) => self.section_break = Some(section),
                        Err(OoxmlError::Cancelled) => return Err(OoxmlError::Cancelled),
                        Err(err) => ctx.diagnose(
                            sect_path,
                            DiagnosticKind::ElementFailed,
                            Some(err.to_string()),
                        ),
                    }
                },
                _ => {},
            }
        }
        Ok(())
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// Append the runs found in `element`: a run itself, or the runs of an
/// inline container, one nesting level deeper. Anything else contributes
/// nothing.
fn collect_runs(
    element: &XmlElement,
    path: &TreePath,
    ctx: &mut BuildContext<'_>,
    runs: &mut Vec<Run>,
) -> Result<()> {
    match element.local_name() {
        "r" => runs.push(Run::build(element, path, ctx)?),
        "hyperlink" | "ins" | "smartTag" | "fldSimple" | "customXml" | "sdtContent" => {
            ctx.nested(|ctx| {
                for (index, child) in element.children().enumerate() {
                    collect_runs(child, &path.child(child.local_name(), index), ctx, runs)?;
                }
                Ok(())
            })?
        },
        "sdt" => {
            if let Some(content) = element.child("sdtContent") {
                collect_runs(content, &path.element("sdtContent"), ctx, runs)?;
            }
        },
        _ => {},
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Diagnostics;
    use crate::ooxml::docx::options::BuildOptions;
    use crate::ooxml::docx::theme::ColorScheme;

    fn build(p: &XmlElement, options: &BuildOptions) -> (Result<Paragraph>, Diagnostics) {
        let palette = ColorScheme::office();
        let mut sink = Diagnostics::new();
        let result = {
            let mut ctx = BuildContext::new(&palette, &mut sink, options);
            Paragraph::build(p, &TreePath::root("p"), &mut ctx)
        };
        (result, sink)
    }

    fn run(text: &str) -> XmlElement {
        XmlElement::new("w:r").with_child(XmlElement::new("w:t").with_text(text))
    }

    #[test]
    fn test_paragraph_text_and_properties() {
        let p = XmlElement::new("w:p")
            .with_child(
                XmlElement::new("w:pPr")
                    .with_child(XmlElement::new("w:pStyle").with_attr("w:val", "Heading1"))
                    .with_child(XmlElement::new("w:jc").with_attr("w:val", "center"))
                    .with_child(
                        XmlElement::new("w:shd")
                            .with_attr("w:val", "clear")
                            .with_attr("w:fill", "FFFF00"),
                    ),
            )
            .with_child(run("Hello, "))
            .with_child(
                XmlElement::new("w:hyperlink")
                    .with_attr("r:id", "rId4")
                    .with_child(run("world")),
            )
            .with_child(XmlElement::new("w:bookmarkStart"));

        let (para, diagnostics) = build(&p, &BuildOptions::default());
        let para = para.unwrap();
        assert_eq!(para.style_id.as_deref(), Some("Heading1"));
        assert_eq!(para.alignment, Some(Justification::Center));
        assert_eq!(para.shading, Some(RGBColor::new(255, 255, 0)));
        assert_eq!(para.runs().len(), 2);
        assert_eq!(para.text(), "Hello, world");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_run_properties_and_special_characters() {
        let r = XmlElement::new("w:r")
            .with_child(
                XmlElement::new("w:rPr")
                    .with_child(XmlElement::new("w:b"))
                    .with_child(XmlElement::new("w:i").with_attr("w:val", "0"))
                    .with_child(XmlElement::new("w:u").with_attr("w:val", "double"))
                    .with_child(XmlElement::new("w:sz").with_attr("w:val", "28"))
                    .with_child(XmlElement::new("w:rFonts").with_attr("w:ascii", "Calibri"))
                    .with_child(
                        XmlElement::new("w:color")
                            .with_attr("w:val", "auto")
                            .with_attr("w:themeColor", "accent1")
                            .with_attr("w:themeShade", "FF"),
                    )
                    .with_child(XmlElement::new("w:highlight").with_attr("w:val", "yellow")),
            )
            .with_child(XmlElement::new("w:t").with_text("a"))
            .with_child(XmlElement::new("w:tab"))
            .with_child(XmlElement::new("w:t").with_text("b"))
            .with_child(XmlElement::new("w:br"));
        let p = XmlElement::new("w:p").with_child(r);

        let (para, _) = build(&p, &BuildOptions::default());
        let para = para.unwrap();
        let run = &para.runs()[0];
        assert_eq!(run.text(), "a\tb\n");
        assert_eq!(run.bold(), Some(true));
        assert_eq!(run.italic(), Some(false));
        assert_eq!(run.properties.underline, Some(true));
        assert_eq!(run.properties.size, Some(28));
        assert_eq!(run.properties.font.as_deref(), Some("Calibri"));
        assert_eq!(run.color(), Some(RGBColor::new(0x44, 0x72, 0xC4)));
        assert_eq!(run.properties.highlight, Some(RGBColor::new(255, 255, 0)));
    }

    #[test]
    fn test_runs_inherit_defaults() {
        let defaults = RunProperties {
            size: Some(22),
            font: Some("Cambria".to_string()),
            bold: Some(false),
            ..RunProperties::default()
        };
        let options = BuildOptions::new().with_default_run_properties(defaults);
        let p = XmlElement::new("w:p").with_child(
            XmlElement::new("w:r")
                .with_child(XmlElement::new("w:rPr").with_child(XmlElement::new("w:b")))
                .with_child(XmlElement::new("w:t").with_text("x")),
        );

        let (para, _) = build(&p, &options);
        let props = &para.unwrap().runs[0].properties;
        assert_eq!(props.bold, Some(true));
        assert_eq!(props.size, Some(22));
        assert_eq!(props.font.as_deref(), Some("Cambria"));
    }

    #[test]
    fn test_bad_values_are_reported_not_fatal() {
        let p = XmlElement::new("w:p")
            .with_child(
                XmlElement::new("w:pPr")
                    .with_child(XmlElement::new("w:jc").with_attr("w:val", "sideways")),
            )
            .with_child(
                XmlElement::new("w:r").with_child(
                    XmlElement::new("w:rPr")
                        .with_child(XmlElement::new("w:b").with_attr("w:val", "perhaps"))
                        .with_child(XmlElement::new("w:sz").with_attr("w:val", "big"))
                        .with_child(XmlElement::new("w:color").with_attr("w:val", "XYZXYZ")),
                ),
            );

        let (para, diagnostics) = build(&p, &BuildOptions::default());
        let para = para.unwrap();
        assert_eq!(para.alignment, None);
        assert_eq!(para.runs[0].properties.bold, None);
        assert_eq!(diagnostics.count(DiagnosticKind::InvalidAttribute), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::InvalidColor), 1);
    }

    #[test]
    fn test_duplicate_ppr_fails() {
        let p = XmlElement::new("w:p")
            .with_child(XmlElement::new("w:pPr"))
            .with_child(XmlElement::new("w:pPr"));
        let (para, _) = build(&p, &BuildOptions::default());
        assert!(matches!(para, Err(OoxmlError::DuplicateElement(name)) if name == "pPr"));
    }

    #[test]
    fn test_inline_content_control_runs() {
        let p = XmlElement::new("w:p").with_child(
            XmlElement::new("w:sdt")
                .with_child(XmlElement::new("w:sdtPr"))
                .with_child(XmlElement::new("w:sdtContent").with_child(run("inside"))),
        );
        let (para, _) = build(&p, &BuildOptions::default());
        assert_eq!(para.unwrap().text(), "inside");
    }

    fn hyperlinks(levels: usize, inner: XmlElement) -> XmlElement {
        (0..levels).fold(inner, |el, _| XmlElement::new("w:hyperlink").with_child(el))
    }

    #[test]
    fn test_inline_nesting_is_bounded() {
        let options = BuildOptions::new().with_max_depth(2);

        let shallow = XmlElement::new("w:p").with_child(hyperlinks(2, run("ok")));
        let (para, _) = build(&shallow, &options);
        assert_eq!(para.unwrap().text(), "ok");

        let deep = XmlElement::new("w:p").with_child(hyperlinks(3, run("too deep")));
        let (para, _) = build(&deep, &options);
        assert!(matches!(para, Err(OoxmlError::DepthExceeded(2))));
    }

    #[test]
    fn test_broken_section_break_keeps_runs() {
        let p = XmlElement::new("w:p")
            .with_child(
                XmlElement::new("w:pPr").with_child(
                    XmlElement::new("w:sectPr")
                        .with_child(XmlElement::new("w:pgMar").with_attr("w:top", "1in"))
                        .with_child(XmlElement::new("w:pgMar")),
                ),
            )
            .with_child(run("kept text"));

        let (para, diagnostics) = build(&p, &BuildOptions::default());
        let para = para.unwrap();
        assert_eq!(para.text(), "kept text");
        assert_eq!(para.section_break, None);
        assert_eq!(diagnostics.count(DiagnosticKind::ElementFailed), 1);
    }

    #[test]
    fn test_section_break_with_universal_measure() {
        let p = XmlElement::new("w:p")
            .with_child(
                XmlElement::new("w:pPr").with_child(
                    XmlElement::new("w:sectPr")
                        .with_child(XmlElement::new("w:pgMar").with_attr("w:top", "1in")),
                ),
            )
            .with_child(run("text"));

        let (para, diagnostics) = build(&p, &BuildOptions::default());
        let para = para.unwrap();
        assert_eq!(para.text(), "text");
        assert_eq!(para.section_break.map(|s| s.margins.top), Some(Some(1440)));
        assert!(diagnostics.is_empty());
    }
}
