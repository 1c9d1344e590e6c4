/// Ambient state threaded through every builder call.
use crate::common::{Diagnostic, DiagnosticKind, DiagnosticSink, RGBColor, TreePath, XmlElement};
use crate::ooxml::docx::color::{ColorKeys, ColorResolver};
use crate::ooxml::docx::options::BuildOptions;
use crate::ooxml::docx::paragraph::RunProperties;
use crate::ooxml::docx::theme::ThemePalette;
use crate::ooxml::error::{OoxmlError, Result};

/// Caller-supplied cancellation check, polled between sibling elements.
pub type CancelCheck<'a> = &'a dyn Fn() -> bool;

/// Everything a builder needs besides the element it is building: the color
/// resolver, the diagnostics sink, the options and the inherited formatting.
///
/// A context lives for exactly one document build.
pub struct BuildContext<'a> {
    resolver: ColorResolver<'a>,
    sink: &'a mut dyn DiagnosticSink,
    options: &'a BuildOptions,
    cancel: Option<CancelCheck<'a>>,
    depth: usize,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        palette: &'a dyn ThemePalette,
        sink: &'a mut dyn DiagnosticSink,
        options: &'a BuildOptions,
    ) -> Self {
        Self {
            resolver: ColorResolver::new(palette),
            sink,
            options,
            cancel: None,
            depth: 0,
        }
    }

    /// Attach a cancellation check.
    pub fn with_cancel(mut self, check: CancelCheck<'a>) -> Self {
        self.cancel = Some(check);
        self
    }

    #[inline]
    pub fn options(&self) -> &'a BuildOptions {
        self.options
    }

    #[inline]
    pub fn resolver(&self) -> ColorResolver<'a> {
        self.resolver
    }

    /// Run formatting inherited by every run.
    #[inline]
    pub fn inherited_run_properties(&self) -> &'a RunProperties {
        &self.options.default_run_properties
    }

    /// Current container nesting below the body.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Record a diagnostic.
    pub fn diagnose(&mut self, location: TreePath, kind: DiagnosticKind, raw: Option<String>) {
        self.report(Diagnostic::new(location, kind, raw));
    }

    /// Parse and resolve the color described by `keys` on `element`.
    pub fn resolve_color(
        &mut self,
        element: &XmlElement,
        keys: &ColorKeys,
        location: &TreePath,
    ) -> Option<RGBColor> {
        let resolver = self.resolver;
        resolver.resolve_element(element, keys, location, self)
    }

    /// Fail with [`OoxmlError::Cancelled`] if the caller asked to stop.
    pub fn check_cancelled(&self) -> Result<()> {
        match self.cancel {
            Some(check) if check() => Err(OoxmlError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Run `f` one container level deeper, failing once `max_depth` is passed.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(OoxmlError::DepthExceeded(self.options.max_depth));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

impl DiagnosticSink for BuildContext<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.kind.is_anomaly() {
            log::warn!("{diagnostic}");
        } else {
            log::debug!("{diagnostic}");
        }
        self.sink.report(diagnostic);
    }
}
