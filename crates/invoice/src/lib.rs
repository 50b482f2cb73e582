//! Invoice - model, totals and PDF composition
//!
//! This crate provides:
//! - The invoice record model (JSON via serde)
//! - The totals calculator and an editable form state machine
//! - A process-wide font cache and a local Korean font resolver
//! - A small flowable layout engine (paragraphs, spacers, paginated tables)
//! - The composer turning a record into PDF bytes
//!
//! # Example
//!
//! ```ignore
//! use invoice::{compose, resolve_korean_font, InvoiceRecord};
//! use locale_text::{Currency, Language};
//!
//! let record = InvoiceRecord::sample();
//! let font = resolve_korean_font(&[]);
//! let pdf = compose(&record, Language::Ko, Currency::KRW, &font)?;
//! std::fs::write(record.suggested_filename(), pdf)?;
//! ```

mod composer;
mod fonts;
mod form;
pub mod layout;
mod model;
mod render;
mod totals;

pub use composer::{compose, compose_codes, layout_invoice};
pub use fonts::{resolve_korean_font, FontHandle};
pub use form::{InvoiceForm, ItemRow};
pub use model::{InvoiceRecord, LineItem, Party, PaymentInfo, PDF_MIME_TYPE};
pub use totals::{compute_totals, LineInput, Totals};

pub use locale_text::{Currency, Language};

use thiserror::Error;

/// Errors that can occur while building or composing an invoice
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Invalid composition: {0}")]
    InvalidComposition(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Incomplete form: {0}")]
    IncompleteForm(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("PDF generation failed: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<locale_text::LocaleError> for InvoiceError {
    fn from(err: locale_text::LocaleError) -> Self {
        match err {
            locale_text::LocaleError::UnsupportedLanguage(code) => {
                InvoiceError::UnsupportedLanguage(code)
            }
            locale_text::LocaleError::UnsupportedCurrency(code) => {
                InvoiceError::UnsupportedCurrency(code)
            }
        }
    }
}

/// Result type for invoice operations
pub type Result<T> = std::result::Result<T, InvoiceError>;
