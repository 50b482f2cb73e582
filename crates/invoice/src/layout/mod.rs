//! Flowable layout engine
//!
//! Content is described as a sequence of flowables (paragraphs, spacers and
//! tables), each tagged with the document [`Section`] it belongs to. The
//! paginator pours them into a single frame per page, top to bottom, and
//! records every placed piece as a [`PlacedBlock`] of absolute draw
//! operations. All coordinates are points measured from the top-left corner
//! of the page.

mod paragraph;
mod table;

pub use paragraph::{Line, Paragraph, Run};
pub use table::{Padding, Rule, Table, TableStyle, VAlign};

use crate::{InvoiceError, Result};
use log::debug;
use pdf_core::{Align, Color, FontFamily, PageSize};

/// Logical part of the invoice a block belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Metadata,
    Parties,
    Items,
    Totals,
    Payment,
    Notes,
    Footer,
}

impl Section {
    /// Marked-content tag written around the section's blocks
    pub fn tag(&self) -> &'static str {
        match self {
            Section::Header => "Header",
            Section::Metadata => "Metadata",
            Section::Parties => "Parties",
            Section::Items => "Items",
            Section::Totals => "Totals",
            Section::Payment => "Payment",
            Section::Notes => "Notes",
            Section::Footer => "Footer",
        }
    }
}

/// Paragraph style shared by all runs of a paragraph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub leading: f64,
    pub color: Color,
    pub align: Align,
    /// Extra space below the paragraph
    pub space_after: f64,
}

impl TextStyle {
    /// 9pt body text on 12pt leading
    pub fn normal() -> Self {
        Self {
            size: 9.0,
            leading: 12.0,
            color: Color::black(),
            align: Align::Left,
            space_after: 0.0,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Baseline of a line whose box starts at `line_top`
    pub fn baseline(&self, line_top: f64) -> f64 {
        let size = self.size as f64;
        line_top + 0.5 * (self.leading - size) + 0.8 * size
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// A content element the paginator can place
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(Paragraph),
    Spacer(f64),
    Table(Table),
}

/// An absolute drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Left-aligned text starting at `x` on `baseline`
    Text {
        x: f64,
        baseline: f64,
        text: String,
        bold: bool,
        size: f32,
        color: Color,
    },
    /// Filled rectangle with top-left corner at (`x`, `y`)
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    },
}

/// A piece of one section placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub section: Section,
    /// True for a table header row (including its repeats)
    pub is_header_row: bool,
    /// Top edge of the block
    pub top: f64,
    pub ops: Vec<DrawOp>,
}

impl PlacedBlock {
    /// Text of every text operation, in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Operations moved so the block's top edge sits at zero
    pub fn normalized_ops(&self) -> Vec<DrawOp> {
        let dy = -self.top;
        self.ops
            .iter()
            .map(|op| match op.clone() {
                DrawOp::Text {
                    x,
                    baseline,
                    text,
                    bold,
                    size,
                    color,
                } => DrawOp::Text {
                    x,
                    baseline: baseline + dy,
                    text,
                    bold,
                    size,
                    color,
                },
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => DrawOp::Rect {
                    x,
                    y: y + dy,
                    width,
                    height,
                    color,
                },
                DrawOp::Line {
                    from,
                    to,
                    width,
                    color,
                } => DrawOp::Line {
                    from: (from.0, from.1 + dy),
                    to: (to.0, to.1 + dy),
                    width,
                    color,
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutPage {
    pub blocks: Vec<PlacedBlock>,
}

impl LayoutPage {
    pub fn header_rows(&self) -> Vec<&PlacedBlock> {
        self.blocks.iter().filter(|b| b.is_header_row).collect()
    }
}

/// A fully paginated document
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub page_size: PageSize,
    pub pages: Vec<LayoutPage>,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Sections in document order, each listed once per contiguous run
    pub fn sections(&self) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        for block in self.pages.iter().flat_map(|p| &p.blocks) {
            if sections.last() != Some(&block.section) {
                sections.push(block.section);
            }
        }
        sections
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.pages
            .iter()
            .flat_map(|p| &p.blocks)
            .any(|b| b.section == section)
    }
}

/// Pours flowables into one frame per page
struct Paginator<'a> {
    family: &'a FontFamily,
    x: f64,
    width: f64,
    top: f64,
    bottom: f64,
    cursor: f64,
    pages: Vec<LayoutPage>,
}

impl<'a> Paginator<'a> {
    fn new(family: &'a FontFamily, page_size: PageSize, margins: Margins) -> Self {
        Self {
            family,
            x: margins.left,
            width: page_size.width - margins.left - margins.right,
            top: margins.top,
            bottom: page_size.height - margins.bottom,
            cursor: margins.top,
            pages: vec![LayoutPage::default()],
        }
    }

    fn remaining(&self) -> f64 {
        self.bottom - self.cursor
    }

    fn at_top(&self) -> bool {
        (self.cursor - self.top).abs() < 1e-9
    }

    fn new_page(&mut self) {
        debug!("page break before y={:.2}", self.cursor);
        self.pages.push(LayoutPage::default());
        self.cursor = self.top;
    }

    fn place(&mut self, section: Section, is_header_row: bool, height: f64, ops: Vec<DrawOp>) {
        let top = self.cursor;
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(PlacedBlock {
                section,
                is_header_row,
                top,
                ops,
            });
        }
        self.cursor += height;
    }

    fn advance(&mut self, space: f64) {
        self.cursor = (self.cursor + space).min(self.bottom);
    }

    fn add_paragraph(&mut self, section: Section, para: &Paragraph) -> Result<()> {
        let lines = para.wrap(self.family, self.width);
        let leading = para.style.leading;

        let mut rest = lines.as_slice();
        while !rest.is_empty() {
            let fit = ((self.remaining() + 1e-9) / leading).floor().max(0.0) as usize;
            if fit == 0 {
                if self.at_top() {
                    return Err(InvoiceError::InvalidComposition(format!(
                        "{section:?}: a {leading}pt line does not fit on an empty page"
                    )));
                }
                self.new_page();
                continue;
            }

            let (chunk, tail) = rest.split_at(fit.min(rest.len()));
            let ops = para.draw_lines(self.family, chunk, self.x, self.cursor, self.width);
            self.place(section, false, chunk.len() as f64 * leading, ops);
            rest = tail;
        }

        self.advance(para.style.space_after);
        Ok(())
    }

    fn place_header_rows(
        &mut self,
        section: Section,
        table: &Table,
        rows: &[table::RowLayout],
    ) {
        for (index, row) in rows.iter().enumerate().take(table.repeat_rows) {
            let ops = table.draw_row(self.family, index, row, self.x, self.cursor);
            self.place(section, true, row.height, ops);
        }
    }

    fn add_table(&mut self, section: Section, table: &Table) -> Result<()> {
        let rows = table.measure_rows(self.family);
        let header_rows = table.repeat_rows.min(rows.len());
        let header_height: f64 = rows[..header_rows]
            .iter()
            .map(|r| r.height)
            .sum();

        // Headers stay with at least the first body row
        let first_block = header_height + rows.get(header_rows).map_or(0.0, |r| r.height);
        if first_block > self.remaining() {
            if self.at_top() {
                return Err(InvoiceError::InvalidComposition(format!(
                    "{section:?}: table head of {first_block:.1}pt is taller than the page"
                )));
            }
            self.new_page();
        }
        self.place_header_rows(section, table, &rows);

        for (index, row) in rows.iter().enumerate().skip(header_rows) {
            if row.height > self.remaining() + 1e-9 {
                self.new_page();
                self.place_header_rows(section, table, &rows);
                if row.height > self.remaining() + 1e-9 {
                    return Err(InvoiceError::InvalidComposition(format!(
                        "{section:?}: row {index} of {:.1}pt does not fit on a page",
                        row.height
                    )));
                }
            }
            let ops = table.draw_row(self.family, index, row, self.x, self.cursor);
            self.place(section, false, row.height, ops);
        }

        Ok(())
    }
}

/// Lay out flowables onto pages
///
/// Fails with [`InvoiceError::InvalidComposition`] when a line or table row
/// cannot fit even on an empty page.
pub fn paginate(
    flowables: &[(Section, Flowable)],
    family: &FontFamily,
    page_size: PageSize,
    margins: Margins,
) -> Result<Layout> {
    let mut paginator = Paginator::new(family, page_size, margins);
    if paginator.width <= 0.0 || paginator.bottom <= paginator.top {
        return Err(InvoiceError::InvalidComposition(
            "margins leave no room for content".to_string(),
        ));
    }

    for (section, flowable) in flowables {
        match flowable {
            Flowable::Paragraph(para) => paginator.add_paragraph(*section, para)?,
            Flowable::Spacer(height) => paginator.advance(*height),
            Flowable::Table(table) => paginator.add_table(*section, table)?,
        }
    }

    debug!("laid out {} page(s)", paginator.pages.len());
    Ok(Layout {
        page_size,
        pages: paginator.pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SMALL_PAGE: PageSize = PageSize {
        width: 200.0,
        height: 100.0,
    };

    const MARGINS: Margins = Margins {
        left: 10.0,
        right: 10.0,
        top: 10.0,
        bottom: 10.0,
    };

    fn para(text: &str) -> Flowable {
        Flowable::Paragraph(Paragraph::text(text, false, TextStyle::normal()))
    }

    fn cell(text: &str) -> Option<Paragraph> {
        Some(Paragraph::text(text, false, TextStyle::normal()))
    }

    fn long_table(rows: usize) -> Table {
        let mut body: Vec<Vec<Option<Paragraph>>> = vec![vec![cell("#"), cell("Item")]];
        for i in 1..=rows {
            body.push(vec![cell(&i.to_string()), cell("Row")]);
        }
        Table {
            rows: body,
            col_widths: vec![30.0, 150.0],
            repeat_rows: 1,
            style: TableStyle::default(),
        }
    }

    #[test]
    fn test_baseline() {
        let style = TextStyle::normal();
        // 1.5 half-leading + 7.2 ascent
        assert!((style.baseline(100.0) - 108.7).abs() < 1e-9);
    }

    #[test]
    fn test_paragraph_splits_across_pages() {
        let family = FontFamily::helvetica();
        let text = vec!["line"; 10].join("\n");
        let layout = paginate(&[(Section::Notes, para(&text))], &family, SMALL_PAGE, MARGINS)
            .unwrap();

        // 80pt frame holds 6 lines of 12pt
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.pages[0].blocks[0].texts().len(), 6);
        assert_eq!(layout.pages[1].blocks[0].texts().len(), 4);
        assert_eq!(layout.sections(), vec![Section::Notes]);
    }

    #[test]
    fn test_spacer_never_creates_a_page() {
        let family = FontFamily::helvetica();
        let layout = paginate(
            &[(Section::Header, para("a")), (Section::Header, Flowable::Spacer(500.0))],
            &family,
            SMALL_PAGE,
            MARGINS,
        )
        .unwrap();
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn test_table_repeats_header_rows() {
        let family = FontFamily::helvetica();
        let layout = paginate(
            &[(Section::Items, Flowable::Table(long_table(8)))],
            &family,
            SMALL_PAGE,
            MARGINS,
        )
        .unwrap();

        assert!(layout.page_count() >= 2);
        let first = layout.pages[0].header_rows();
        let second = layout.pages[1].header_rows();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first[0].normalized_ops(), second[0].normalized_ops());
        assert_eq!(second[0].top, MARGINS.top);
    }

    #[test]
    fn test_every_body_row_placed_once() {
        let family = FontFamily::helvetica();
        let layout = paginate(
            &[(Section::Items, Flowable::Table(long_table(20)))],
            &family,
            SMALL_PAGE,
            MARGINS,
        )
        .unwrap();
        let body_rows = layout
            .pages
            .iter()
            .flat_map(|p| &p.blocks)
            .filter(|b| !b.is_header_row)
            .count();
        assert_eq!(body_rows, 20);
    }

    #[test]
    fn test_row_taller_than_page_fails() {
        let family = FontFamily::helvetica();
        let mut table = long_table(1);
        table.rows[1][1] = cell(&vec!["x"; 20].join("\n"));
        let result = paginate(
            &[(Section::Items, Flowable::Table(table))],
            &family,
            SMALL_PAGE,
            MARGINS,
        );
        assert!(matches!(result, Err(InvoiceError::InvalidComposition(_))));
    }

    #[test]
    fn test_line_taller_than_frame_fails() {
        let family = FontFamily::helvetica();
        let mut style = TextStyle::normal();
        style.leading = 200.0;
        let result = paginate(
            &[(
                Section::Header,
                Flowable::Paragraph(Paragraph::text("big", true, style)),
            )],
            &family,
            SMALL_PAGE,
            MARGINS,
        );
        assert!(matches!(result, Err(InvoiceError::InvalidComposition(_))));
    }

    #[test]
    fn test_sections_in_order() {
        let family = FontFamily::helvetica();
        let layout = paginate(
            &[
                (Section::Header, para("Title")),
                (Section::Totals, para("Total")),
                (Section::Footer, para("Thanks")),
            ],
            &family,
            PageSize::A4,
            MARGINS,
        )
        .unwrap();
        assert_eq!(
            layout.sections(),
            vec![Section::Header, Section::Totals, Section::Footer]
        );
        assert!(!layout.has_section(Section::Payment));
    }
}
