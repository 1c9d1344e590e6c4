/// Table, Row, and Cell structures for Word documents.
use crate::common::{RGBColor, TreePath, XmlElement};
use crate::ooxml::docx::body::{BlockNode, build_blocks};
use crate::ooxml::docx::color::FILL_KEYS;
use crate::ooxml::docx::context::BuildContext;
use crate::ooxml::docx::values::{ensure_once, optional_twips, required_number};
use crate::ooxml::error::{OoxmlError, Result};
use serde::Serialize;

/// A table in a Word document (`w:tbl`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// `w:tblStyle/@val`
    pub style_id: Option<String>,
    /// Grid column widths in twips
    pub grid: Vec<u32>,
    pub rows: Vec<Row>,
}

/// A table row (`w:tr`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// A table cell (`w:tc`). Cells hold block content, including nested tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Number of grid columns spanned
    pub span: u32,
    /// Resolved `w:tcPr/w:shd` fill
    pub shading: Option<RGBColor>,
    pub blocks: Vec<BlockNode>,
}

impl Table {
    /// Build a table from a `w:tbl` element.
    ///
    /// Cell content goes through the same block dispatch as the body, one
    /// nesting level deeper, so a failure inside a cell only costs that
    /// cell's element.
    pub fn build(tbl: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Result<Self> {
        ctx.nested(|ctx| {
            let mut table = Self::default();
            let mut seen_tbl_pr = false;

            for (index, child) in tbl.children().enumerate() {
                match child.local_name() {
                    "tblPr" => {
                        ensure_once(&mut seen_tbl_pr, child)?;
                        table.style_id = child
                            .child("tblStyle")
                            .and_then(|s| s.attr("val"))
                            .map(str::to_string);
                    },
                    "tblGrid" => {
                        let grid_path = path.child("tblGrid", index);
                        for (col_index, col) in child.children().enumerate() {
                            if col.local_name() != "gridCol" {
                                continue;
                            }
                            let col_path = grid_path.child("gridCol", col_index);
                            let width = optional_twips(col, "w", &col_path, ctx)
                                .and_then(|w| u32::try_from(w).ok());
                            table.grid.push(width.unwrap_or(0));
                        }
                    },
                    "tr" => table
                        .rows
                        .push(Row::build(child, &path.child("tr", index), ctx)?),
                    _ => {},
                }
            }

            Ok(table)
        })
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of grid columns, or the widest row when the grid is missing.
    pub fn column_count(&self) -> usize {
        if !self.grid.is_empty() {
            return self.grid.len();
        }
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.span as usize).sum())
            .max()
            .unwrap_or(0)
    }
}

impl Row {
    fn build(tr: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let mut row = Self::default();
        for (index, child) in tr.children().enumerate() {
            if child.local_name() == "tc" {
                ctx.check_cancelled()?;
                row.cells.push(Cell::build(child, &path.child("tc", index), ctx)?);
            }
        }
        Ok(row)
    }
}

impl Cell {
    fn build(tc: &XmlElement, path: &TreePath, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let mut span = 1;
        let mut shading = None;
        let mut seen_tc_pr = false;

        for tc_pr in tc.children_named("tcPr") {
            ensure_once(&mut seen_tc_pr, tc_pr)?;
            let tc_pr_path = path.element("tcPr");
            if let Some(grid_span) = tc_pr.child("gridSpan") {
                span = match required_number::<u32>(grid_span, "val")? {
                    Some(0) => {
                        return Err(OoxmlError::InvalidValue {
                            attribute: "gridSpan/@val".to_string(),
                            value: "0".to_string(),
                        });
                    },
                    Some(n) => n,
                    None => 1,
                };
            }
            if let Some(shd) = tc_pr.child("shd") {
                shading = ctx.resolve_color(shd, &FILL_KEYS, &tc_pr_path.element("shd"));
            }
        }

        Ok(Self {
            span,
            shading,
            blocks: build_blocks(tc, path, ctx)?,
        })
    }

    /// Concatenated text of the paragraphs directly in this cell.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                BlockNode::Paragraph(p) => Some(p.text()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{DiagnosticKind, Diagnostics};
    use crate::ooxml::docx::options::BuildOptions;
    use crate::ooxml::docx::theme::ColorScheme;

    fn para(text: &str) -> XmlElement {
        XmlElement::new("w:p").with_child(
            XmlElement::new("w:r").with_child(XmlElement::new("w:t").with_text(text)),
        )
    }

    fn cell(text: &str) -> XmlElement {
        XmlElement::new("w:tc").with_child(para(text))
    }

    fn build(tbl: &XmlElement, options: &BuildOptions) -> (Result<Table>, Diagnostics) {
        let palette = ColorScheme::office();
        let mut sink = Diagnostics::new();
        let result = {
            let mut ctx = BuildContext::new(&palette, &mut sink, options);
            Table::build(tbl, &TreePath::root("tbl"), &mut ctx)
        };
        (result, sink)
    }

    #[test]
    fn test_table_structure() {
        let tbl = XmlElement::new("w:tbl")
            .with_child(
                XmlElement::new("w:tblPr")
                    .with_child(XmlElement::new("w:tblStyle").with_attr("w:val", "TableGrid")),
            )
            .with_child(
                XmlElement::new("w:tblGrid")
                    .with_child(XmlElement::new("w:gridCol").with_attr("w:w", "2000"))
                    .with_child(XmlElement::new("w:gridCol").with_attr("w:w", "3000")),
            )
            .with_child(XmlElement::new("w:tr").with_child(cell("a")).with_child(cell("b")))
            .with_child(
                XmlElement::new("w:tr").with_child(
                    XmlElement::new("w:tc")
                        .with_child(
                            XmlElement::new("w:tcPr")
                                .with_child(XmlElement::new("w:gridSpan").with_attr("w:val", "2"))
                                .with_child(
                                    XmlElement::new("w:shd")
                                        .with_attr("w:fill", "auto")
                                        .with_attr("w:themeFill", "accent6")
                                        .with_attr("w:themeFillTint", "FF"),
                                ),
                        )
                        .with_child(para("merged")),
                ),
            );

        let (table, diagnostics) = build(&tbl, &BuildOptions::default());
        let table = table.unwrap();
        assert_eq!(table.style_id.as_deref(), Some("TableGrid"));
        assert_eq!(table.grid, vec![2000, 3000]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows[0].cells[1].text(), "b");

        let merged = &table.rows[1].cells[0];
        assert_eq!(merged.span, 2);
        assert_eq!(merged.shading, Some(RGBColor::WHITE));
        assert_eq!(merged.blocks.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_nested_table_in_cell() {
        let inner = XmlElement::new("w:tbl")
            .with_child(XmlElement::new("w:tr").with_child(cell("inner")));
        let tbl = XmlElement::new("w:tbl").with_child(
            XmlElement::new("w:tr").with_child(XmlElement::new("w:tc").with_child(inner)),
        );

        let (table, _) = build(&tbl, &BuildOptions::default());
        let table = table.unwrap();
        match &table.rows[0].cells[0].blocks[0] {
            BlockNode::Table(nested) => assert_eq!(nested.rows[0].cells[0].text(), "inner"),
            other => panic!("expected nested table, got {other:?}"),
        }
    }

    #[test]
    fn test_nesting_limit_degrades_inner_table() {
        let inner = XmlElement::new("w:tbl")
            .with_child(XmlElement::new("w:tr").with_child(cell("too deep")));
        let tbl = XmlElement::new("w:tbl").with_child(
            XmlElement::new("w:tr").with_child(XmlElement::new("w:tc").with_child(inner)),
        );

        let (table, diagnostics) = build(&tbl, &BuildOptions::new().with_max_depth(1));
        let table = table.unwrap();
        assert!(table.rows[0].cells[0].blocks.is_empty());
        assert_eq!(diagnostics.count(DiagnosticKind::ElementFailed), 1);
    }

    #[test]
    fn test_grid_widths_accept_universal_measures() {
        let tbl = XmlElement::new("w:tbl")
            .with_child(
                XmlElement::new("w:tblGrid")
                    .with_child(XmlElement::new("w:gridCol").with_attr("w:w", "1in"))
                    .with_child(XmlElement::new("w:gridCol").with_attr("w:w", "wide")),
            )
            .with_child(XmlElement::new("w:tr").with_child(cell("kept")));

        let (table, diagnostics) = build(&tbl, &BuildOptions::default());
        let table = table.unwrap();
        assert_eq!(table.grid, vec![1440, 0]);
        assert_eq!(table.rows[0].cells[0].text(), "kept");
        assert_eq!(diagnostics.count(DiagnosticKind::InvalidAttribute), 1);
        let d = diagnostics.iter().next().unwrap();
        assert_eq!(d.location.to_string(), "/tbl/tblGrid[0]/gridCol[1]/@w");
    }

    #[test]
    fn test_invalid_grid_span_fails() {
        let tbl = XmlElement::new("w:tbl").with_child(
            XmlElement::new("w:tr").with_child(
                XmlElement::new("w:tc").with_child(
                    XmlElement::new("w:tcPr")
                        .with_child(XmlElement::new("w:gridSpan").with_attr("w:val", "0")),
                ),
            ),
        );
        let (table, _) = build(&tbl, &BuildOptions::default());
        assert!(matches!(table, Err(OoxmlError::InvalidValue { .. })));
    }
}
