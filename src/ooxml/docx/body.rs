/// Body - block-level content of a Word document.
///
/// Block elements are dispatched by tag name through a static registry.
/// Tags without a builder are skipped, and a builder that fails costs only
/// its own element: the failure is recorded and the walk continues with the
/// next sibling.
use crate::common::{DiagnosticKind, TreePath, XmlElement};
use crate::ooxml::docx::context::BuildContext;
use crate::ooxml::docx::options::DegradePolicy;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::section::Section;
use crate::ooxml::docx::table::Table;
use crate::ooxml::error::{OoxmlError, Result};
use phf::phf_map;
use serde::Serialize;

/// A block-level node of the document model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockNode {
    Paragraph(Paragraph),
    Table(Table),
    /// Final section properties of the body (`w:body/w:sectPr`).
    Section(Section),
    /// Stands in for an element whose builder failed, under
    /// [`DegradePolicy::Placeholder`].
    Placeholder {
        /// Local tag name of the failed element
        element: String,
    },
}

/// Kinds of block element with a registered builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Paragraph,
    Table,
    Section,
    /// Block-level content control (`w:sdt`), replaced by its content.
    ContentControl,
    /// Custom XML wrapper (`w:customXml`), replaced by its content.
    CustomXml,
}

/// Signature shared by all block builders. One element may yield any number
/// of nodes.
pub type BlockBuilder =
    fn(&XmlElement, &TreePath, &mut BuildContext<'_>) -> Result<Vec<BlockNode>>;

static REGISTRY: phf::Map<&'static str, ElementKind> = phf_map! {
    "p" => ElementKind::Paragraph,
    "tbl" => ElementKind::Table,
    "sectPr" => ElementKind::Section,
    "sdt" => ElementKind::ContentControl,
    "customXml" => ElementKind::CustomXml,
};

impl ElementKind {
    /// Classify a block element by its local tag name.
    #[inline]
    pub fn from_tag(tag: &str) -> Option<Self> {
        REGISTRY.get(tag).copied()
    }

    /// The builder for this kind.
    pub fn builder(self) -> BlockBuilder {
        match self {
            Self::Paragraph => build_paragraph,
            Self::Table => build_table,
            Self::Section => build_section,
            Self::ContentControl => build_content_control,
            Self::CustomXml => build_custom_xml,
        }
    }
}

fn build_paragraph(
    el: &XmlElement,
    path: &TreePath,
    ctx: &mut BuildContext<'_>,
) -> Result<Vec<BlockNode>> {
    Ok(vec![BlockNode::Paragraph(Paragraph::build(el, path, ctx)?)])
}

fn build_table(el: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Result<Vec<BlockNode>> {
    Ok(vec![BlockNode::Table(Table::build(el, path, ctx)?)])
}

fn build_section(
    el: &XmlElement,
    path: &TreePath,
    ctx: &mut BuildContext<'_>,
) -> Result<Vec<BlockNode>> {
    Ok(vec![BlockNode::Section(Section::build(el, path, ctx)?)])
}

fn build_content_control(
    el: &XmlElement,
    path: &TreePath,
    ctx: &mut BuildContext<'_>,
) -> Result<Vec<BlockNode>> {
    match el.child("sdtContent") {
        Some(content) => {
            let content_path = path.element("sdtContent");
            ctx.nested(|ctx| build_blocks(content, &content_path, ctx))
        },
        None => Ok(Vec::new()),
    }
}

fn build_custom_xml(
    el: &XmlElement,
    path: &TreePath,
    ctx: &mut BuildContext<'_>,
) -> Result<Vec<BlockNode>> {
    ctx.nested(|ctx| build_blocks(el, path, ctx))
}

/// Build the block children of `parent` in order.
///
/// Only [`OoxmlError::Cancelled`] escapes; any other builder failure is
/// recorded as [`DiagnosticKind::ElementFailed`] and handled per the
/// configured [`DegradePolicy`].
pub fn build_blocks(
    parent: &XmlElement,
    path: &TreePath,
    ctx: &mut BuildContext<'_>,
) -> Result<Vec<BlockNode>> {
    let mut blocks = Vec::new();

    for (index, child) in parent.children().enumerate() {
        ctx.check_cancelled()?;

        let tag = child.local_name();
        let child_path = path.child(tag, index);
        let Some(kind) = ElementKind::from_tag(tag) else {
            if ctx.options().is_flagged(tag) {
                ctx.diagnose(
                    child_path,
                    DiagnosticKind::UnsupportedElement,
                    Some(child.name().to_string()),
                );
            } else {
                log::trace!("Skipping <{}> at {}", child.name(), child_path);
            }
            continue;
        };

        match kind.builder()(child, &child_path, ctx) {
            Ok(nodes) => blocks.extend(nodes),
            Err(OoxmlError::Cancelled) => return Err(OoxmlError::Cancelled),
            Err(err) => {
                ctx.diagnose(child_path, DiagnosticKind::ElementFailed, Some(err.to_string()));
                if ctx.options().degrade_policy == DegradePolicy::Placeholder {
                    blocks.push(BlockNode::Placeholder {
                        element: tag.to_string(),
                    });
                }
            },
        }
    }

    Ok(blocks)
}

/// The ordered block content of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Body {
    blocks: Vec<BlockNode>,
}

impl Body {
    /// Build the body from a `w:body` element.
    ///
    /// Fails only if the build is cancelled.
    pub fn build(body: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Result<Self> {
        Ok(Self {
            blocks: build_blocks(body, path, ctx)?,
        })
    }

    #[inline]
    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockNode> {
        self.blocks.iter()
    }

    /// Top-level paragraphs, in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            BlockNode::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Top-level tables, in order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            BlockNode::Table(t) => Some(t),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a Body {
    type Item = &'a BlockNode;
    type IntoIter = std::slice::Iter<'a, BlockNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
