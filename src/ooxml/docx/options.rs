/// Configuration types for document model building.
///
/// This module defines the options that control how tolerant the builders
/// are and which formatting they start from.
use crate::ooxml::docx::paragraph::RunProperties;

/// What to put in place of a block element whose builder failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegradePolicy {
    /// Leave the element out of the body.
    #[default]
    Omit,
    /// Insert a [`BlockNode::Placeholder`](crate::ooxml::docx::BlockNode::Placeholder).
    Placeholder,
}

/// Configuration options for building a document model.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::{BuildOptions, DegradePolicy};
///
/// // Create with defaults
/// let options = BuildOptions::default();
///
/// // Or customize
/// let options = BuildOptions::new()
///     .with_degrade_policy(DegradePolicy::Placeholder)
///     .with_max_depth(8)
///     .with_flagged_element("altChunk");
/// assert!(options.is_flagged("altChunk"));
/// ```
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Replacement for failed block elements
    pub degrade_policy: DegradePolicy,
    /// Maximum nesting of containers (tables, content controls) below the body
    pub max_depth: usize,
    /// Local tag names reported as unsupported instead of skipped silently
    pub flagged_elements: Vec<String>,
    /// Run formatting every run inherits unless it overrides it
    pub default_run_properties: RunProperties,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            degrade_policy: DegradePolicy::Omit,
            max_depth: 32,
            flagged_elements: Vec::new(),
            default_run_properties: RunProperties::default(),
        }
    }
}

impl BuildOptions {
    /// Create a new `BuildOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_degrade_policy(mut self, policy: DegradePolicy) -> Self {
        self.degrade_policy = policy;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Report elements with this local tag name (e.g. `altChunk`) as
    /// unsupported when no builder handles them.
    pub fn with_flagged_element(mut self, tag: impl Into<String>) -> Self {
        self.flagged_elements.push(tag.into());
        self
    }

    #[inline]
    pub fn with_default_run_properties(mut self, properties: RunProperties) -> Self {
        self.default_run_properties = properties;
        self
    }

    /// Whether an unhandled tag should be reported.
    pub fn is_flagged(&self, tag: &str) -> bool {
        self.flagged_elements.iter().any(|t| t == tag)
    }
}
