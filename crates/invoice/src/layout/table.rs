//! Tables with padding, backgrounds, grid lines and rules

use super::paragraph::{Line, Paragraph};
use super::DrawOp;
use pdf_core::{Color, FontFamily};

/// Cell padding in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 6.0,
            right: 6.0,
            top: 3.0,
            bottom: 3.0,
        }
    }
}

/// Vertical placement of cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
}

/// A horizontal rule drawn along the top edge of a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub row: usize,
    /// Rule starts at this column and runs to the right edge
    pub first_col: usize,
    pub width: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableStyle {
    pub padding: Padding,
    /// Per-column padding overrides; `None` or a missing entry uses `padding`
    pub col_padding: Vec<Option<Padding>>,
    pub valign: VAlign,
    /// Background of the repeated header rows
    pub header_background: Option<Color>,
    /// Cycled over body rows by their index in the table
    pub body_backgrounds: Vec<Color>,
    /// Line width and color of a full cell grid
    pub grid: Option<(f64, Color)>,
    pub rules: Vec<Rule>,
}

/// A table of optional paragraph cells
///
/// The first `repeat_rows` rows are header rows, drawn again at the top of
/// every page the table continues on.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<Option<Paragraph>>>,
    pub col_widths: Vec<f64>,
    pub repeat_rows: usize,
    pub style: TableStyle,
}

/// Wrapped cell contents and the resulting row height
#[derive(Debug, Clone)]
pub(crate) struct RowLayout {
    pub height: f64,
    cells: Vec<Vec<Line>>,
}

impl Table {
    pub fn width(&self) -> f64 {
        self.col_widths.iter().sum()
    }

    fn cell_padding(&self, col: usize) -> Padding {
        self.style
            .col_padding
            .get(col)
            .copied()
            .flatten()
            .unwrap_or(self.style.padding)
    }

    fn col_x(&self, x: f64, col: usize) -> f64 {
        x + self.col_widths[..col].iter().sum::<f64>()
    }

    /// Wrap every cell and compute row heights
    pub(crate) fn measure_rows(&self, family: &FontFamily) -> Vec<RowLayout> {
        let pad = self.style.padding;
        self.rows
            .iter()
            .map(|row| {
                let mut height = pad.top + pad.bottom;
                let cells = row
                    .iter()
                    .zip(&self.col_widths)
                    .enumerate()
                    .map(|(col, (cell, &col_width))| match cell {
                        Some(para) => {
                            let cell_pad = self.cell_padding(col);
                            let lines =
                                para.wrap(family, col_width - cell_pad.left - cell_pad.right);
                            height = height.max(
                                lines.len() as f64 * para.style.leading
                                    + cell_pad.top
                                    + cell_pad.bottom,
                            );
                            lines
                        }
                        None => Vec::new(),
                    })
                    .collect();
                RowLayout { height, cells }
            })
            .collect()
    }

    fn row_background(&self, index: usize) -> Option<Color> {
        if index < self.repeat_rows {
            return self.style.header_background;
        }
        let colors = &self.style.body_backgrounds;
        if colors.is_empty() {
            return None;
        }
        Some(colors[(index - self.repeat_rows) % colors.len()])
    }

    /// Draw operations for one row whose top edge is at `top`
    pub(crate) fn draw_row(
        &self,
        family: &FontFamily,
        index: usize,
        row: &RowLayout,
        x: f64,
        top: f64,
    ) -> Vec<DrawOp> {
        let width = self.width();
        let mut ops = Vec::new();

        if let Some(color) = self.row_background(index) {
            ops.push(DrawOp::Rect {
                x,
                y: top,
                width,
                height: row.height,
                color,
            });
        }

        for (col, (cell, lines)) in self.rows[index].iter().zip(&row.cells).enumerate() {
            let Some(para) = cell else {
                continue;
            };
            let pad = self.cell_padding(col);
            let inner_height = row.height - pad.top - pad.bottom;
            let content_height = lines.len() as f64 * para.style.leading;
            let offset = match self.style.valign {
                VAlign::Top => 0.0,
                VAlign::Middle => (inner_height - content_height) / 2.0,
            };
            ops.extend(para.draw_lines(
                family,
                lines,
                self.col_x(x, col) + pad.left,
                top + pad.top + offset,
                self.col_widths[col] - pad.left - pad.right,
            ));
        }

        if let Some((line_width, color)) = self.style.grid {
            let bottom = top + row.height;
            for y in [top, bottom] {
                ops.push(DrawOp::Line {
                    from: (x, y),
                    to: (x + width, y),
                    width: line_width,
                    color,
                });
            }
            for col in 0..=self.col_widths.len() {
                let col_x = self.col_x(x, col);
                ops.push(DrawOp::Line {
                    from: (col_x, top),
                    to: (col_x, bottom),
                    width: line_width,
                    color,
                });
            }
        }

        for rule in self.style.rules.iter().filter(|rule| rule.row == index) {
            ops.push(DrawOp::Line {
                from: (self.col_x(x, rule.first_col), top),
                to: (x + width, top),
                width: rule.width,
                color: rule.color,
            });
        }

        ops
    }
}
