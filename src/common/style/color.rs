use phf::phf_map;
use serde::Serialize;
use std::fmt;

/// Named colors accepted where WordprocessingML allows a color keyword.
///
/// These are the `ST_HighlightColor` names, keyed in lowercase.
static NAMED_COLORS: phf::Map<&'static str, RGBColor> = phf_map! {
    "black" => RGBColor::new(0x00, 0x00, 0x00),
    "blue" => RGBColor::new(0x00, 0x00, 0xFF),
    "cyan" => RGBColor::new(0x00, 0xFF, 0xFF),
    "green" => RGBColor::new(0x00, 0xFF, 0x00),
    "magenta" => RGBColor::new(0xFF, 0x00, 0xFF),
    "red" => RGBColor::new(0xFF, 0x00, 0x00),
    "yellow" => RGBColor::new(0xFF, 0xFF, 0x00),
    "white" => RGBColor::new(0xFF, 0xFF, 0xFF),
    "darkblue" => RGBColor::new(0x00, 0x00, 0x8B),
    "darkcyan" => RGBColor::new(0x00, 0x8B, 0x8B),
    "darkgreen" => RGBColor::new(0x00, 0x64, 0x00),
    "darkmagenta" => RGBColor::new(0x80, 0x00, 0x80),
    "darkred" => RGBColor::new(0x8B, 0x00, 0x00),
    "darkyellow" => RGBColor::new(0x80, 0x80, 0x00),
    "darkgray" => RGBColor::new(0xA9, 0xA9, 0xA9),
    "lightgray" => RGBColor::new(0xD3, 0xD3, 0xD3),
};

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use longan::common::RGBColor;
///
/// // Create a red color
/// let red = RGBColor::new(255, 0, 0);
///
/// // Create from hex string
/// let blue = RGBColor::from_hex("0000FF").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// # Arguments
    ///
    /// * `hex` - Hex color string (e.g., "FF0000" or "#FF0000")
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::common::RGBColor;
    ///
    /// let red = RGBColor::from_hex("FF0000").unwrap();
    /// let blue = RGBColor::from_hex("#0000FF").unwrap();
    /// assert!(RGBColor::from_hex("F00").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Look up a named color (`red`, `darkBlue`, ...), ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_COLORS.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Convert to hex string (without # prefix).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::common::RGBColor;
    ///
    /// let color = RGBColor::new(255, 0, 0);
    /// assert_eq!(color.to_hex(), "FF0000");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Apply `f` to each channel.
    #[inline]
    pub(crate) fn map_channels(self, f: impl Fn(u8) -> u8) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(RGBColor::from_hex("FF8000"), Some(RGBColor::new(255, 128, 0)));
        assert_eq!(RGBColor::from_hex("#00ff7f"), Some(RGBColor::new(0, 255, 127)));
        assert_eq!(RGBColor::from_hex("GG0000"), None);
        assert_eq!(RGBColor::from_hex("FF00000"), None);
        assert_eq!(RGBColor::from_hex("ÿÿÿ"), None);
        assert_eq!(RGBColor::from_hex("+F+F+F"), None);
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(RGBColor::from_name("darkBlue"), Some(RGBColor::new(0, 0, 0x8B)));
        assert_eq!(RGBColor::from_name("RED"), Some(RGBColor::new(255, 0, 0)));
        assert_eq!(RGBColor::from_name("chartreuse"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RGBColor::new(1, 2, 255).to_string(), "#0102FF");
    }
}
