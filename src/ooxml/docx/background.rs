/// Page background of a Word document (`w:background`).
use crate::common::{RGBColor, TreePath, XmlElement};
use crate::ooxml::docx::color::ColorSpec;
use crate::ooxml::docx::context::BuildContext;
use crate::ooxml::docx::theme::ThemeColor;
use serde::Serialize;

/// Document page background.
///
/// `color` is the concrete color a renderer should paint: the direct color
/// if one was given, otherwise the theme color with shade and tint applied.
/// The theme index and the raw modifiers are kept alongside so a consumer
/// can re-resolve against another theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub color: Option<RGBColor>,
    pub theme_color: Option<ThemeColor>,
    pub theme_shade: Option<u8>,
    pub theme_tint: Option<u8>,
}

impl Background {
    /// Build the background descriptor from a `w:background` element.
    ///
    /// Attributes are dispatched by name; unrecognized names (such as
    /// `w14:something` extensions) are ignored.
    pub fn build(element: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Self {
        let resolver = ctx.resolver();
        let mut spec = ColorSpec::default();

        for (name, value) in element.attributes().iter() {
            let attr_path = path.attribute(name);
            match name {
                "color" => spec.direct = resolver.parse_direct(value, &attr_path, ctx),
                "themeColor" => spec.theme_color = resolver.parse_theme_color(value, &attr_path, ctx),
                "themeShade" => spec.theme_shade = resolver.parse_modifier(value, &attr_path, ctx),
                "themeTint" => spec.theme_tint = resolver.parse_modifier(value, &attr_path, ctx),
                _ => {},
            }
        }

        Self {
            color: resolver.resolve(&spec, path, ctx),
            theme_color: spec.theme_color,
            theme_shade: spec.theme_shade,
            theme_tint: spec.theme_tint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{DiagnosticKind, Diagnostics};
    use crate::ooxml::docx::color::{apply_shade, apply_tint};
    use crate::ooxml::docx::options::BuildOptions;
    use crate::ooxml::docx::theme::ColorScheme;

    fn build(element: &XmlElement) -> (Background, Diagnostics) {
        let palette = ColorScheme::office();
        let options = BuildOptions::default();
        let mut sink = Diagnostics::new();
        let background = {
            let mut ctx = BuildContext::new(&palette, &mut sink, &options);
            Background::build(element, &TreePath::root("background"), &mut ctx)
        };
        (background, sink)
    }

    #[test]
    fn test_direct_color_only() {
        let el = XmlElement::new("w:background").with_attr("w:color", "FF0000");
        let (background, diagnostics) = build(&el);
        assert_eq!(
            background,
            Background {
                color: Some(RGBColor::new(255, 0, 0)),
                theme_color: None,
                theme_shade: None,
                theme_tint: None,
            }
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_theme_color_with_modifiers() {
        let el = XmlElement::new("w:background")
            .with_attr("w:themeTint", "33")
            .with_attr("w:themeColor", "accent1")
            .with_attr("w:themeShade", "BF");
        let (background, _) = build(&el);
        let base = RGBColor::new(0x44, 0x72, 0xC4);
        assert_eq!(background.theme_color, Some(ThemeColor::Accent1));
        assert_eq!(background.theme_shade, Some(0xBF));
        assert_eq!(background.theme_tint, Some(0x33));
        assert_eq!(background.color, Some(apply_tint(apply_shade(base, 0xBF), 0x33)));
    }

    #[test]
    fn test_unrecognized_attributes_are_ignored() {
        let el = XmlElement::new("w:background")
            .with_attr("w14:shadowColor", "garbage")
            .with_attr("w:color", "00FF00");
        let (background, diagnostics) = build(&el);
        assert_eq!(background.color, Some(RGBColor::new(0, 255, 0)));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_bad_values_are_reported() {
        let el = XmlElement::new("w:background")
            .with_attr("w:color", "red-ish")
            .with_attr("w:themeColor", "accent0")
            .with_attr("w:themeTint", "1234");
        let (background, diagnostics) = build(&el);
        assert_eq!(background, Background::default());
        assert_eq!(diagnostics.count(DiagnosticKind::InvalidColor), 1);
        assert_eq!(diagnostics.count(DiagnosticKind::UnknownThemeColor), 1);
        assert_eq!(diagnostics.count(DiagnosticKind::InvalidColorModifier), 1);
    }
}
