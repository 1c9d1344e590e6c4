/// Color resolution for WordprocessingML color attributes.
///
/// A color in WordprocessingML is spread over up to four attributes: a direct
/// value, a theme color, and a shade and tint applied to the theme color.
/// [`ColorResolver`] is the single place where those are turned into a
/// concrete [`RGBColor`].
use crate::common::{Diagnostic, DiagnosticKind, DiagnosticSink, RGBColor, TreePath, XmlElement};
use crate::ooxml::docx::theme::{ThemeColor, ThemePalette};

/// Names of the four attributes that together describe one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorKeys {
    pub color: &'static str,
    pub theme_color: &'static str,
    pub theme_shade: &'static str,
    pub theme_tint: &'static str,
}

/// Keys used by `w:background`.
pub const BACKGROUND_KEYS: ColorKeys = ColorKeys {
    color: "color",
    theme_color: "themeColor",
    theme_shade: "themeShade",
    theme_tint: "themeTint",
};

/// Keys used by `w:color` inside run properties.
pub const TEXT_KEYS: ColorKeys = ColorKeys {
    color: "val",
    theme_color: "themeColor",
    theme_shade: "themeShade",
    theme_tint: "themeTint",
};

/// Keys used for the fill of `w:shd`.
pub const FILL_KEYS: ColorKeys = ColorKeys {
    color: "fill",
    theme_color: "themeFill",
    theme_shade: "themeFillShade",
    theme_tint: "themeFillTint",
};

/// A parsed direct color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectColor {
    /// `auto`: defer to the theme color, or to the consumer's default.
    Auto,
    Rgb(RGBColor),
}

impl DirectColor {
    /// Parse a direct color: six hex digits (optionally `#`-prefixed), a
    /// named color, or `auto`. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        RGBColor::from_hex(value)
            .or_else(|| RGBColor::from_name(value))
            .map(Self::Rgb)
    }
}

/// The attribute bag of one color, after each attribute has been parsed on
/// its own. Unparseable attributes are left as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorSpec {
    pub direct: Option<DirectColor>,
    pub theme_color: Option<ThemeColor>,
    pub theme_shade: Option<u8>,
    pub theme_tint: Option<u8>,
}

impl ColorSpec {
    /// Whether no attribute of interest survived parsing.
    pub fn is_empty(&self) -> bool {
        self.direct.is_none()
            && self.theme_color.is_none()
            && self.theme_shade.is_none()
            && self.theme_tint.is_none()
    }
}

/// Darken a color: each channel is scaled by `shade / 255`.
///
/// A shade of 255 leaves the color unchanged; 0 yields black.
#[inline]
pub fn apply_shade(color: RGBColor, shade: u8) -> RGBColor {
    let shade = u32::from(shade);
    color.map_channels(|c| ((u32::from(c) * shade + 127) / 255) as u8)
}

/// Lighten a color: each channel moves toward white by `tint / 255`.
///
/// A tint of 0 leaves the color unchanged; 255 yields white.
#[inline]
pub fn apply_tint(color: RGBColor, tint: u8) -> RGBColor {
    let tint = u32::from(tint);
    color.map_channels(|c| {
        let c = u32::from(c);
        (c + ((255 - c) * tint + 127) / 255) as u8
    })
}

/// Parse a shade or tint value (`ST_UcharHexNumber`, e.g. `BF`).
pub fn parse_modifier(value: &str) -> Option<u8> {
    let value = value.trim();
    if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(value, 16).ok()
}

/// Resolves color attribute bags against a theme palette.
#[derive(Clone, Copy)]
pub struct ColorResolver<'a> {
    palette: &'a dyn ThemePalette,
}

impl<'a> ColorResolver<'a> {
    pub fn new(palette: &'a dyn ThemePalette) -> Self {
        Self { palette }
    }

    #[inline]
    pub fn palette(&self) -> &'a dyn ThemePalette {
        self.palette
    }

    /// Parse a direct color attribute, reporting values that are not colors.
    pub fn parse_direct(
        &self,
        value: &str,
        location: &TreePath,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<DirectColor> {
        let parsed = DirectColor::parse(value);
        if parsed.is_none() {
            sink.report(Diagnostic::new(
                location.clone(),
                DiagnosticKind::InvalidColor,
                Some(value.to_string()),
            ));
        }
        parsed
    }

    /// Parse a theme color attribute, reporting unknown palette names.
    pub fn parse_theme_color(
        &self,
        value: &str,
        location: &TreePath,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<ThemeColor> {
        let parsed = ThemeColor::from_xml(value.trim());
        if parsed.is_none() {
            sink.report(Diagnostic::new(
                location.clone(),
                DiagnosticKind::UnknownThemeColor,
                Some(value.to_string()),
            ));
        }
        parsed
    }

    /// Parse a shade or tint attribute, reporting values that are not hex bytes.
    pub fn parse_modifier(
        &self,
        value: &str,
        location: &TreePath,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<u8> {
        let parsed = parse_modifier(value);
        if parsed.is_none() {
            sink.report(Diagnostic::new(
                location.clone(),
                DiagnosticKind::InvalidColorModifier,
                Some(value.to_string()),
            ));
        }
        parsed
    }

    /// Read the four attributes named by `keys` from `element`.
    pub fn spec_from_element(
        &self,
        element: &XmlElement,
        keys: &ColorKeys,
        location: &TreePath,
        sink: &mut dyn DiagnosticSink,
    ) -> ColorSpec {
        let mut spec = ColorSpec::default();
        if let Some(value) = element.attr(keys.color) {
            spec.direct = self.parse_direct(value, &location.attribute(keys.color), sink);
        }
        if let Some(value) = element.attr(keys.theme_color) {
            spec.theme_color =
                self.parse_theme_color(value, &location.attribute(keys.theme_color), sink);
        }
        if let Some(value) = element.attr(keys.theme_shade) {
            spec.theme_shade =
                self.parse_modifier(value, &location.attribute(keys.theme_shade), sink);
        }
        if let Some(value) = element.attr(keys.theme_tint) {
            spec.theme_tint =
                self.parse_modifier(value, &location.attribute(keys.theme_tint), sink);
        }
        spec
    }

    /// Resolve a parsed attribute bag to a concrete color.
    ///
    /// 1. A direct RGB value wins over everything else.
    /// 2. Otherwise the theme color is looked up in the palette.
    /// 3. Shade is applied to the theme color, then tint.
    ///
    /// Returns `None` when neither yields a base color, leaving the default
    /// to the caller.
    pub fn resolve(
        &self,
        spec: &ColorSpec,
        location: &TreePath,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<RGBColor> {
        if let Some(DirectColor::Rgb(color)) = spec.direct {
            return Some(color);
        }

        let theme_color = spec.theme_color?;
        theme_color.scheme_slot()?;
        let Some(mut color) = self.palette.color(theme_color) else {
            sink.report(Diagnostic::new(
                location.clone(),
                DiagnosticKind::MissingThemeColor,
                Some(theme_color.to_xml().to_string()),
            ));
            return None;
        };

        if let Some(shade) = spec.theme_shade {
            color = apply_shade(color, shade);
        }
        if let Some(tint) = spec.theme_tint {
            color = apply_tint(color, tint);
        }
        Some(color)
    }

    /// Parse and resolve the color described by `keys` on `element`.
    pub fn resolve_element(
        &self,
        element: &XmlElement,
        keys: &ColorKeys,
        location: &TreePath,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<RGBColor> {
        let spec = self.spec_from_element(element, keys, location, sink);
        self.resolve(&spec, location, sink)
    }
}
