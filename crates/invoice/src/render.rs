//! Layout to PDF rendering

use crate::layout::{DrawOp, Layout};
use crate::Result;
use pdf_core::{Align, FontFamily, FontWeight, PdfDocument};

const BODY_FAMILY: &str = "body";

/// Render a paginated layout with one font family
///
/// Every placed block is wrapped in a marked-content sequence named after
/// its section.
pub(crate) fn render(layout: &Layout, family: FontFamily, title: &str) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new();
    doc.set_title(title);
    doc.register_font_family(BODY_FAMILY, family)?;
    doc.set_font(BODY_FAMILY, 9.0)?;

    for page in &layout.pages {
        let number = doc.add_page(layout.page_size);
        for block in &page.blocks {
            doc.begin_marked_content(number, block.section.tag())?;
            for op in &block.ops {
                draw(&mut doc, number, op)?;
            }
            doc.end_marked_content(number)?;
        }
    }

    Ok(doc.to_bytes()?)
}

fn draw(doc: &mut PdfDocument, page: usize, op: &DrawOp) -> Result<()> {
    match op {
        DrawOp::Text {
            x,
            baseline,
            text,
            bold,
            size,
            color,
        } => {
            doc.set_font_size(*size)?;
            doc.set_font_weight(if *bold {
                FontWeight::Bold
            } else {
                FontWeight::Regular
            })?;
            doc.set_text_color(*color);
            doc.insert_text(text, page, *x, *baseline, Align::Left)?;
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        } => doc.fill_rect(page, *x, *y, *width, *height, *color)?,
        DrawOp::Line {
            from,
            to,
            width,
            color,
        } => doc.stroke_line(page, *from, *to, *width, *color)?,
    }
    Ok(())
}
