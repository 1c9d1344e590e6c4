/// Enumerations for Word document elements.
///
/// Each enumeration maps one WordprocessingML simple type to a closed set of
/// variants, with `from_xml`/`to_xml` for the attribute spelling.
use serde::Serialize;
use std::fmt;

/// Page orientation of a section, from `w:pgSz/@w:orient`
/// (`ST_PageOrientation`).
///
/// An absent attribute means portrait. Orientation only labels the page;
/// the width and height in `w:pgSz` are already swapped by the producer.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::enums::Orientation;
///
/// assert_eq!(Orientation::from_xml("landscape"), Some(Orientation::Landscape));
/// assert_eq!(Orientation::default().to_xml(), "portrait");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// The `ST_PageOrientation` spelling.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Parse an `ST_PageOrientation` value. Unknown spellings yield `None`.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// Where a section begins relative to the previous one, from
/// `w:sectPr/w:type/@w:val` (`ST_SectionMark`).
///
/// A section without `w:type` starts on a new page.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::enums::SectionStart;
///
/// assert_eq!(SectionStart::from_xml("oddPage"), Some(SectionStart::OddPage));
/// assert_eq!(SectionStart::default().to_xml(), "nextPage");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionStart {
    /// `continuous`: same page as the previous section
    Continuous,
    /// `nextColumn`
    NewColumn,
    /// `nextPage`
    #[default]
    NewPage,
    /// `evenPage`: next even-numbered page
    EvenPage,
    /// `oddPage`: next odd-numbered page
    OddPage,
}

impl SectionStart {
    /// The `ST_SectionMark` spelling.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::NewColumn => "nextColumn",
            Self::NewPage => "nextPage",
            Self::EvenPage => "evenPage",
            Self::OddPage => "oddPage",
        }
    }

    /// Parse an `ST_SectionMark` value. Unknown spellings yield `None`.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "continuous" => Some(Self::Continuous),
            "nextColumn" => Some(Self::NewColumn),
            "nextPage" => Some(Self::NewPage),
            "evenPage" => Some(Self::EvenPage),
            "oddPage" => Some(Self::OddPage),
            _ => None,
        }
    }
}

impl fmt::Display for SectionStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// Paragraph justification (`ST_Jc`).
///
/// The logical values `start` and `end` are folded into `Left` and `Right`;
/// bidirectional layout is the renderer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Justification {
    Left,
    Center,
    Right,
    /// Justified on both sides.
    Both,
    /// Justified with inter-character spacing.
    Distribute,
}

impl Justification {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Both => "both",
            Self::Distribute => "distribute",
        }
    }

    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" => Some(Self::Both),
            "distribute" => Some(Self::Distribute),
            _ => None,
        }
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}
