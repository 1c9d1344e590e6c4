/// Theme palette support for Word documents.
///
/// Document content refers to colors by theme slot (`accent1`, `text1`, ...)
/// instead of by value. The builders resolve those references through a
/// [`ThemePalette`], which is supplied by the caller and only ever read.
use crate::common::RGBColor;
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;
use std::fmt;

/// Theme color index (`ST_ThemeColor`).
///
/// The WordprocessingML aliases `text1`, `background1`, `text2` and
/// `background2` are distinct variants, mapped to palette slots by
/// [`ThemeColor::scheme_slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeColor {
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
    Text1,
    Background1,
    Text2,
    Background2,
    /// Explicitly no theme color.
    None,
}

impl ThemeColor {
    /// The twelve palette slots of a color scheme, in scheme order.
    pub const SLOTS: [ThemeColor; 12] = [
        Self::Dark1,
        Self::Light1,
        Self::Dark2,
        Self::Light2,
        Self::Accent1,
        Self::Accent2,
        Self::Accent3,
        Self::Accent4,
        Self::Accent5,
        Self::Accent6,
        Self::Hyperlink,
        Self::FollowedHyperlink,
    ];

    /// Parse a theme color from its XML attribute value.
    ///
    /// Accepts both the WordprocessingML names (`dark1`, `accent1`, `text1`)
    /// and the DrawingML scheme element names (`dk1`, `hlink`, `folHlink`).
    /// Returns `None` if the value is not recognized.
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "dark1" | "dk1" => Some(Self::Dark1),
            "light1" | "lt1" => Some(Self::Light1),
            "dark2" | "dk2" => Some(Self::Dark2),
            "light2" | "lt2" => Some(Self::Light2),
            "accent1" => Some(Self::Accent1),
            "accent2" => Some(Self::Accent2),
            "accent3" => Some(Self::Accent3),
            "accent4" => Some(Self::Accent4),
            "accent5" => Some(Self::Accent5),
            "accent6" => Some(Self::Accent6),
            "hyperlink" | "hlink" => Some(Self::Hyperlink),
            "followedHyperlink" | "folHlink" => Some(Self::FollowedHyperlink),
            "text1" | "tx1" => Some(Self::Text1),
            "background1" | "bg1" => Some(Self::Background1),
            "text2" | "tx2" => Some(Self::Text2),
            "background2" | "bg2" => Some(Self::Background2),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Convert to the WordprocessingML attribute value.
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Dark1 => "dark1",
            Self::Light1 => "light1",
            Self::Dark2 => "dark2",
            Self::Light2 => "light2",
            Self::Accent1 => "accent1",
            Self::Accent2 => "accent2",
            Self::Accent3 => "accent3",
            Self::Accent4 => "accent4",
            Self::Accent5 => "accent5",
            Self::Accent6 => "accent6",
            Self::Hyperlink => "hyperlink",
            Self::FollowedHyperlink => "followedHyperlink",
            Self::Text1 => "text1",
            Self::Background1 => "background1",
            Self::Text2 => "text2",
            Self::Background2 => "background2",
            Self::None => "none",
        }
    }

    /// The palette slot this color reads from, using the default color
    /// mapping (`bg1 = lt1`, `tx1 = dk1`, `bg2 = lt2`, `tx2 = dk2`).
    ///
    /// Returns `None` for [`ThemeColor::None`].
    pub const fn scheme_slot(self) -> Option<Self> {
        match self {
            Self::Text1 => Some(Self::Dark1),
            Self::Background1 => Some(Self::Light1),
            Self::Text2 => Some(Self::Dark2),
            Self::Background2 => Some(Self::Light2),
            Self::None => None,
            other => Some(other),
        }
    }

    /// Position of the slot in [`ThemeColor::SLOTS`].
    fn slot_index(self) -> Option<usize> {
        let slot = self.scheme_slot()?;
        Self::SLOTS.iter().position(|s| *s == slot)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// Read-only lookup from theme color to base color.
///
/// Implementations must be shareable across threads, since independent
/// documents may be built in parallel against the same palette.
pub trait ThemePalette: Send + Sync {
    /// Base color for a theme color, or `None` if the palette has no entry.
    fn color(&self, theme_color: ThemeColor) -> Option<RGBColor>;
}

/// A concrete color scheme (`a:clrScheme`) from a theme part.
///
/// # Examples
///
/// ```rust
/// use longan::common::RGBColor;
/// use longan::ooxml::docx::theme::{ColorScheme, ThemeColor, ThemePalette};
///
/// let scheme = ColorScheme::office();
/// assert_eq!(scheme.color(ThemeColor::Accent1), Some(RGBColor::new(0x44, 0x72, 0xC4)));
/// // `text1` reads the `dk1` slot
/// assert_eq!(scheme.color(ThemeColor::Text1), scheme.color(ThemeColor::Dark1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorScheme {
    /// Scheme name
    name: Option<String>,
    /// Slot colors, indexed like [`ThemeColor::SLOTS`]
    colors: [Option<RGBColor>; 12],
}

impl ColorScheme {
    /// Create an empty scheme with no colors.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default "Office" color scheme.
    pub fn office() -> Self {
        let colors = [
            0x000000, 0xFFFFFF, 0x44546A, 0xE7E6E6, 0x4472C4, 0xED7D31, 0xA5A5A5, 0xFFC000,
            0x5B9BD5, 0x70AD47, 0x0563C1, 0x954F72,
        ]
        .map(|rgb: u32| {
            let [_, r, g, b] = rgb.to_be_bytes();
            Some(RGBColor::new(r, g, b))
        });
        Self {
            name: Some("Office".to_string()),
            colors,
        }
    }

    /// Set the color of one slot (builder style). Aliases set the slot
    /// they map to; [`ThemeColor::None`] is ignored.
    pub fn with_color(mut self, theme_color: ThemeColor, color: RGBColor) -> Self {
        if let Some(index) = theme_color.slot_index() {
            self.colors[index] = Some(color);
        }
        self
    }

    /// Get the scheme name.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Extract the color scheme from a theme part's XML (`theme1.xml`).
    ///
    /// Each slot reads `a:srgbClr/@val`, or `a:sysClr/@lastClr` for system
    /// colors. Slots with neither stay empty.
    pub fn from_theme_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut scheme = Self::new();
        let mut in_color_scheme = false;
        let mut current_slot: Option<usize> = None;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let tag_name = e.local_name();
                    match tag_name.as_ref() {
                        b"clrScheme" => {
                            in_color_scheme = true;
                            for attr in e.attributes().flatten() {
                                if attr.key.local_name().as_ref() == b"name" {
                                    scheme.name =
                                        Some(String::from_utf8_lossy(&attr.value).into_owned());
                                }
                            }
                        },
                        b"srgbClr" | b"sysClr" if in_color_scheme => {
                            let wanted: &[u8] = if tag_name.as_ref() == b"srgbClr" {
                                b"val"
                            } else {
                                b"lastClr"
                            };
                            if let Some(index) = current_slot.take() {
                                for attr in e.attributes().flatten() {
                                    if attr.key.local_name().as_ref() == wanted {
                                        scheme.colors[index] = std::str::from_utf8(&attr.value)
                                            .ok()
                                            .and_then(RGBColor::from_hex);
                                    }
                                }
                            }
                        },
                        name if in_color_scheme => {
                            current_slot = std::str::from_utf8(name)
                                .ok()
                                .and_then(ThemeColor::from_xml)
                                .and_then(ThemeColor::slot_index);
                        },
                        _ => {},
                    }
                },
                Ok(Event::End(e)) => {
                    if e.local_name().as_ref() == b"clrScheme" {
                        in_color_scheme = false;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(scheme)
    }
}

impl ThemePalette for ColorScheme {
    fn color(&self, theme_color: ThemeColor) -> Option<RGBColor> {
        theme_color.slot_index().and_then(|index| self.colors[index])
    }
}
