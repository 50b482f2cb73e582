//! PDF Core - Low-level PDF generation
//!
//! This crate provides functionality for:
//! - Building PDF documents page by page from scratch
//! - Embedding TrueType fonts (subset to the glyphs actually used)
//! - Falling back to the built-in Helvetica family when no font file is available
//! - Inserting text, filled rectangles and rules at top-origin coordinates
//! - Tagging regions of a page with marked-content sections
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, FontFamilyBuilder, PageSize, PdfDocument};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_page(PageSize::A4);
//! let family = FontFamilyBuilder::new()
//!     .regular(std::fs::read("NanumGothic.ttf")?)
//!     .build("nanum")?;
//! doc.register_font_family("nanum", family)?;
//! doc.set_font("nanum", 12.0)?;
//! doc.insert_text("안녕하세요", page, 100.0, 100.0, Align::Left)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod graphics;
mod text;

pub use document::{Color, PageSize, PdfDocument};
pub use font::{BuiltinFont, FontData, FontFamily, FontFamilyBuilder, FontSource, FontWeight};
pub use graphics::{generate_line_operators, generate_rect_operators};
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Font subset error: {0}")]
    FontSubsetError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Unbalanced marked content on page {0}")]
    UnbalancedMarkedContent(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Unit conversions (PDF user space is 1/72 inch)
pub mod units {
    /// Points per millimetre
    pub const PT_PER_MM: f64 = 72.0 / 25.4;

    /// Convert millimetres to points
    pub fn mm(value: f64) -> f64 {
        value * PT_PER_MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
    }

    #[test]
    fn test_mm_to_points() {
        assert!((units::mm(25.4) - 72.0).abs() < 1e-9);
        assert!((units::mm(210.0) - 595.2756).abs() < 1e-3);
    }
}
