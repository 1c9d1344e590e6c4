/// Attribute value parsing shared by the element builders.
use crate::common::{DiagnosticKind, TreePath, XmlElement};
use crate::ooxml::docx::context::BuildContext;
use crate::ooxml::docx::section::TWIPS_PER_INCH;
use crate::ooxml::error::{OoxmlError, Result};
use std::str::FromStr;

/// Parse an `ST_OnOff` value.
pub fn parse_on_off(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Read a toggle property such as `<w:b/>` or `<w:b w:val="0"/>`.
///
/// A missing `val` means on. An unreadable `val` is reported and the
/// property is treated as unset.
pub fn toggle(element: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Option<bool> {
    match element.attr("val") {
        None => Some(true),
        Some(value) => {
            let parsed = parse_on_off(value);
            if parsed.is_none() {
                ctx.diagnose(
                    path.attribute("val"),
                    DiagnosticKind::InvalidAttribute,
                    Some(value.to_string()),
                );
            }
            parsed
        },
    }
}

/// Read a numeric attribute the model cannot do without.
///
/// Absent is fine; present but unparseable fails the element.
pub fn required_number<T: FromStr>(element: &XmlElement, name: &str) -> Result<Option<T>> {
    match element.attr(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| OoxmlError::InvalidValue {
                attribute: format!("{}/@{}", element.local_name(), name),
                value: value.to_string(),
            }),
    }
}

/// Read an optional numeric attribute, reporting and dropping bad values.
pub fn optional_number<T: FromStr>(
    element: &XmlElement,
    name: &str,
    path: &TreePath,
    ctx: &mut BuildContext<'_>,
) -> Option<T> {
    let value = element.attr(name)?;
    let parsed = value.trim().parse::<T>().ok();
    if parsed.is_none() {
        ctx.diagnose(
            path.attribute(name),
            DiagnosticKind::InvalidAttribute,
            Some(value.to_string()),
        );
    }
    parsed
}

/// Twips per unit of an `ST_UniversalMeasure`.
const TWIPS_PER_UNIT: [(&str, f64); 6] = [
    ("in", TWIPS_PER_INCH as f64),
    ("cm", TWIPS_PER_INCH as f64 / 2.54),
    ("mm", TWIPS_PER_INCH as f64 / 25.4),
    ("pt", 20.0),
    ("pc", 240.0),
    ("pi", 240.0),
];

/// Parse an `ST_TwipsMeasure` or `ST_SignedTwipsMeasure` value into twips.
///
/// Accepts a plain integer (already in twips) or a universal measure such
/// as `1in`, `2.54cm` or `-36pt`, rounded to the nearest twip.
pub fn parse_twips(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(twips) = value.parse::<i64>() {
        return Some(twips);
    }

    let split = value.len().checked_sub(2)?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (number, unit) = value.split_at(split);
    let per_unit = TWIPS_PER_UNIT.iter().find(|(name, _)| *name == unit)?.1;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b'-') {
        return None;
    }
    let number = number.parse::<f64>().ok()?;
    Some((number * per_unit).round() as i64)
}

/// Read a twips measurement, reporting and dropping values that are not one.
pub fn optional_twips(
    element: &XmlElement,
    name: &str,
    path: &TreePath,
    ctx: &mut BuildContext<'_>,
) -> Option<i64> {
    let value = element.attr(name)?;
    let parsed = parse_twips(value);
    if parsed.is_none() {
        ctx.diagnose(
            path.attribute(name),
            DiagnosticKind::InvalidAttribute,
            Some(value.to_string()),
        );
    }
    parsed
}

/// Fail with [`OoxmlError::DuplicateElement`] when a once-only child repeats.
pub fn ensure_once(seen: &mut bool, element: &XmlElement) -> Result<()> {
    if std::mem::replace(seen, true) {
        return Err(OoxmlError::DuplicateElement(element.local_name().to_string()));
    }
    Ok(())
}
