/// Section - document section with page setup and layout properties.
use crate::common::{DiagnosticKind, TreePath, XmlElement};
use crate::ooxml::docx::context::BuildContext;
use crate::ooxml::docx::enums::{Orientation, SectionStart};
use crate::ooxml::docx::values::{ensure_once, optional_twips};
use crate::ooxml::error::Result;
use serde::Serialize;

/// Twips per inch (1 twip = 1/20 of a point).
pub const TWIPS_PER_INCH: i64 = 1440;

/// Page margins for a section, in twips.
///
/// Top and bottom margins may be negative, meaning the text may overlap
/// the header or footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Margins {
    /// Top margin
    pub top: Option<i64>,
    /// Right margin
    pub right: Option<i64>,
    /// Bottom margin
    pub bottom: Option<i64>,
    /// Left margin
    pub left: Option<i64>,
    /// Header distance from top edge
    pub header: Option<i64>,
    /// Footer distance from bottom edge
    pub footer: Option<i64>,
    /// Gutter margin (for binding)
    pub gutter: Option<i64>,
}

/// Page size for a section, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PageSize {
    /// Page width
    pub width: Option<i64>,
    /// Page height
    pub height: Option<i64>,
    /// Page orientation
    pub orientation: Orientation,
}

/// A section in a Word document.
///
/// Represents a `<w:sectPr>` element, either the final one at the end of the
/// body or one closing a section inside a paragraph's properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Section {
    pub page_size: PageSize,
    pub margins: Margins,
    pub start_type: SectionStart,
}

impl Section {
    /// Build a section from a `w:sectPr` element.
    ///
    /// Measurements may be plain twips or universal measures (`1in`,
    /// `2.54cm`); unreadable ones are reported and left unset. Fails only if
    /// `w:pgSz` or `w:pgMar` repeat.
    pub fn build(sect_pr: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let mut section = Self::default();
        let mut seen_size = false;
        let mut seen_margins = false;

        for child in sect_pr.children() {
            match child.local_name() {
                "pgSz" => {
                    ensure_once(&mut seen_size, child)?;
                    let size_path = path.element("pgSz");
                    section.page_size.width = optional_twips(child, "w", &size_path, ctx);
                    section.page_size.height = optional_twips(child, "h", &size_path, ctx);
                    if let Some(value) = child.attr("orient") {
                        match Orientation::from_xml(value) {
                            Some(orientation) => section.page_size.orientation = orientation,
                            None => ctx.diagnose(
                                size_path.attribute("orient"),
                                DiagnosticKind::InvalidAttribute,
                                Some(value.to_string()),
                            ),
                        }
                    }
                },
                "pgMar" => {
                    ensure_once(&mut seen_margins, child)?;
                    let margin_path = path.element("pgMar");
                    let mut margin = |name: &str| optional_twips(child, name, &margin_path, ctx);
                    section.margins = Margins {
                        top: margin("top"),
                        right: margin("right"),
                        bottom: margin("bottom"),
                        left: margin("left"),
                        header: margin("header"),
                        footer: margin("footer"),
                        gutter: margin("gutter"),
                    };
                },
                "type" => {
                    if let Some(value) = child.attr("val") {
                        match SectionStart::from_xml(value) {
                            Some(start) => section.start_type = start,
                            None => ctx.diagnose(
                                path.element("type").attribute("val"),
                                DiagnosticKind::InvalidAttribute,
                                Some(value.to_string()),
                            ),
                        }
                    }
                },
                _ => {},
            }
        }

        Ok(section)
    }

    /// Page width in inches, if specified.
    pub fn page_width_inches(&self) -> Option<f64> {
        self.page_size
            .width
            .map(|w| w as f64 / TWIPS_PER_INCH as f64)
    }

    /// Page height in inches, if specified.
    pub fn page_height_inches(&self) -> Option<f64> {
        self.page_size
            .height
            .map(|h| h as f64 / TWIPS_PER_INCH as f64)
    }
}
