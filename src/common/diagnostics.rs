//! Non-fatal build diagnostics.
//!
//! Builders never abort on a recoverable anomaly. They record a [`Diagnostic`]
//! through a [`DiagnosticSink`] supplied by the caller and carry on.
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Location of an element or attribute in the markup tree.
///
/// Renders as `/document/body/p[2]/@color`: local names, with the zero-based
/// position among the parent's child elements in brackets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TreePath {
    segments: SmallVec<[String; 8]>,
}

impl TreePath {
    /// Path of a root element.
    pub fn root(name: &str) -> Self {
        let mut segments = SmallVec::new();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Path of the `index`-th child element, named `name`.
    pub fn child(&self, name: &str, index: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(format!("{name}[{index}]"));
        path
    }

    /// Path of the first child element named `name`, for elements that occur once.
    pub fn element(&self, name: &str) -> Self {
        let mut path = self.clone();
        path.segments.push(name.to_string());
        path
    }

    /// Path of an attribute on this element.
    pub fn attribute(&self, name: &str) -> Self {
        let mut path = self.clone();
        path.segments.push(format!("@{name}"));
        path
    }

    /// Number of segments.
    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Kind of anomaly recorded during a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A direct color value was neither hex, a known name, nor `auto`.
    InvalidColor,
    /// A theme color attribute named no known palette slot.
    UnknownThemeColor,
    /// The palette has no entry for a referenced theme color.
    MissingThemeColor,
    /// A shade or tint value was not a two-digit hex byte.
    InvalidColorModifier,
    /// An optional attribute carried a value that could not be interpreted.
    InvalidAttribute,
    /// The document part has no `body` element.
    MissingBody,
    /// An element the caller asked to be told about has no builder.
    UnsupportedElement,
    /// An element builder failed; the element was omitted or replaced.
    ElementFailed,
}

impl DiagnosticKind {
    /// Whether this kind reports an anomaly, as opposed to an expected gap
    /// in coverage.
    #[inline]
    pub const fn is_anomaly(self) -> bool {
        !matches!(self, Self::UnsupportedElement)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidColor => "invalid-color",
            Self::UnknownThemeColor => "unknown-theme-color",
            Self::MissingThemeColor => "missing-theme-color",
            Self::InvalidColorModifier => "invalid-color-modifier",
            Self::InvalidAttribute => "invalid-attribute",
            Self::MissingBody => "missing-body",
            Self::UnsupportedElement => "unsupported-element",
            Self::ElementFailed => "element-failed",
        };
        f.write_str(name)
    }
}

/// One recorded anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Where in the markup tree the anomaly was found
    pub location: TreePath,
    /// What went wrong
    pub kind: DiagnosticKind,
    /// The offending raw value or error text, if any
    pub raw: Option<String>,
}

impl Diagnostic {
    pub fn new(location: TreePath, kind: DiagnosticKind, raw: Option<String>) -> Self {
        Self {
            location,
            kind,
            raw,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.location)?;
        if let Some(raw) = &self.raw {
            write!(f, ": {raw:?}")?;
        }
        Ok(())
    }
}

/// Receiver for diagnostics emitted during a build.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Collected diagnostics of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    /// Number of diagnostics of one kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_path_display() {
        let path = TreePath::root("document")
            .element("body")
            .child("p", 2)
            .attribute("color");
        assert_eq!(path.to_string(), "/document/body/p[2]/@color");
        assert_eq!(path.depth(), 4);
        assert_eq!(TreePath::default().to_string(), "/");
    }

    #[test]
    fn test_diagnostics_counts_by_kind() {
        let mut diagnostics = Diagnostics::new();
        let path = TreePath::root("document");
        diagnostics.report(Diagnostic::new(path.clone(), DiagnosticKind::MissingBody, None));
        diagnostics.report(Diagnostic::new(
            path,
            DiagnosticKind::InvalidColor,
            Some("XYZ".to_string()),
        ));

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::MissingBody), 1);
        assert_eq!(diagnostics.count(DiagnosticKind::ElementFailed), 0);
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::new(
            TreePath::root("document").element("background").attribute("color"),
            DiagnosticKind::InvalidColor,
            Some("nope".to_string()),
        );
        assert_eq!(
            d.to_string(),
            "invalid-color at /document/background/@color: \"nope\""
        );
        assert!(d.kind.is_anomaly());
        assert!(!DiagnosticKind::UnsupportedElement.is_anomaly());
    }
}
