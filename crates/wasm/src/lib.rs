//! WASM bindings for rsinvoice
//!
//! This crate provides a JavaScript-friendly API for:
//! - Composing invoice PDFs from record objects
//! - Driving the invoice form (item rows, live totals, validation)
//! - Money formatting, totals and label tables for the form UI
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { InvoiceGenerator, InvoiceFormState, labels } from 'rsinvoice-wasm';
//!
//! await init();
//!
//! const generator = new InvoiceGenerator();
//! generator.loadFont(nanumRegular, nanumBold);
//!
//! const form = new InvoiceFormState(undefined, crypto.randomUUID());
//! form.setParties({ company: "Acme" }, { company: "Globex" });
//! form.setItem(0, { name: "Design", quantity: 1, unitPrice: 1000 });
//!
//! const pdf = generator.generate(form.toRecord(), "ko", "KRW");
//! ```

use invoice::{compute_totals, FontHandle, InvoiceForm, InvoiceRecord, ItemRow, LineInput, Party};
use locale_text::{format_money_in, Currency, Language};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_language(code: &str) -> Result<Language, JsValue> {
    code.parse().map_err(js_error)
}

fn parse_currency(code: &str) -> Result<Currency, JsValue> {
    code.parse().map_err(js_error)
}

/// Invoice PDF generator holding the document font
#[wasm_bindgen]
pub struct InvoiceGenerator {
    font: FontHandle,
}

#[wasm_bindgen]
impl InvoiceGenerator {
    /// Create a generator using the built-in Helvetica fallback
    #[wasm_bindgen(constructor)]
    pub fn new() -> InvoiceGenerator {
        InvoiceGenerator {
            font: FontHandle::Fallback,
        }
    }

    /// Load a Hangul-capable font
    ///
    /// @param regular - TTF file bytes (Uint8Array)
    /// @param bold - Optional bold TTF bytes; the regular face is reused when omitted
    #[wasm_bindgen(js_name = loadFont)]
    pub fn load_font(&mut self, regular: &[u8], bold: Option<Vec<u8>>) -> Result<(), JsValue> {
        self.font = FontHandle::from_bytes(regular, bold.as_deref()).map_err(js_error)?;
        Ok(())
    }

    /// Whether Korean text will fall back to Helvetica
    #[wasm_bindgen(js_name = usesFallbackFont)]
    pub fn uses_fallback_font(&self) -> bool {
        self.font.is_fallback()
    }

    /// Compose an invoice
    ///
    /// @param record - Invoice record object (camelCase fields)
    /// @param lang - "ko" or "en"
    /// @param currency - "KRW", "USD", "EUR" or "JPY"
    /// @returns PDF bytes (Uint8Array)
    pub fn generate(&self, record: JsValue, lang: &str, currency: &str) -> Result<Vec<u8>, JsValue> {
        let record: InvoiceRecord = serde_wasm_bindgen::from_value(record)?;
        invoice::compose_codes(&record, lang, currency, &self.font).map_err(js_error)
    }

    /// Compose the built-in sample invoice
    #[wasm_bindgen(js_name = generateSample)]
    pub fn generate_sample(&self, lang: &str, currency: &str) -> Result<Vec<u8>, JsValue> {
        invoice::compose_codes(&InvoiceRecord::sample(), lang, currency, &self.font)
            .map_err(js_error)
    }
}

impl Default for InvoiceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Today's date from the browser clock
fn browser_today() -> Option<chrono::NaiveDate> {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
}

/// Editable invoice form
#[wasm_bindgen]
pub struct InvoiceFormState {
    inner: InvoiceForm,
}

#[wasm_bindgen]
impl InvoiceFormState {
    /// Start a fresh form
    ///
    /// @param today - Issue date as "YYYY-MM-DD"; the browser date when omitted
    /// @param suffix - Random text; its first four characters end the invoice number
    #[wasm_bindgen(constructor)]
    pub fn new(today: Option<String>, suffix: &str) -> Result<InvoiceFormState, JsValue> {
        let today = match today {
            Some(text) => text.parse::<chrono::NaiveDate>().map_err(js_error)?,
            None => browser_today().ok_or_else(|| js_error("invalid browser date"))?,
        };
        Ok(InvoiceFormState {
            inner: InvoiceForm::new(today, suffix),
        })
    }

    /// Restore a form from its JSON representation
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<InvoiceFormState, JsValue> {
        let inner = serde_json::from_str(json).map_err(js_error)?;
        Ok(InvoiceFormState { inner })
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner).map_err(js_error)
    }

    #[wasm_bindgen(js_name = invoiceNumber)]
    pub fn invoice_number(&self) -> String {
        self.inner.invoice_number.clone()
    }

    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&mut self, lang: &str) -> Result<(), JsValue> {
        self.inner.language = parse_language(lang)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setCurrency)]
    pub fn set_currency(&mut self, currency: &str) -> Result<(), JsValue> {
        self.inner.currency = parse_currency(currency)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setTaxRate)]
    pub fn set_tax_rate(&mut self, percent: f64) {
        self.inner.tax_rate_percent = percent;
    }

    #[wasm_bindgen(js_name = setNotes)]
    pub fn set_notes(&mut self, notes: &str) {
        self.inner.notes = notes.to_string();
    }

    /// Set sender and recipient
    ///
    /// @param from - Party object ({ company, businessNumber, address, email, phone })
    /// @param to - Party object
    #[wasm_bindgen(js_name = setParties)]
    pub fn set_parties(&mut self, from: JsValue, to: JsValue) -> Result<(), JsValue> {
        let from: Party = serde_wasm_bindgen::from_value(from)?;
        let to: Party = serde_wasm_bindgen::from_value(to)?;
        self.inner.from = from;
        self.inner.to = to;
        Ok(())
    }

    /// Set payment details ({ bankName, accountNumber, accountHolder })
    #[wasm_bindgen(js_name = setPayment)]
    pub fn set_payment(&mut self, payment: JsValue) -> Result<(), JsValue> {
        self.inner.payment = serde_wasm_bindgen::from_value(payment)?;
        Ok(())
    }

    /// Number of item rows (never less than one)
    #[wasm_bindgen(js_name = itemCount)]
    pub fn item_count(&self) -> usize {
        self.inner.items().len()
    }

    /// Append an empty row and return its index
    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&mut self) -> usize {
        self.inner.add_item()
    }

    /// Remove a row; returns false for the first row or a bad index
    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&mut self, index: usize) -> bool {
        self.inner.remove_item(index)
    }

    /// Replace a row ({ name, quantity, unitPrice })
    #[wasm_bindgen(js_name = setItem)]
    pub fn set_item(&mut self, index: usize, row: JsValue) -> Result<bool, JsValue> {
        let row: ItemRow = serde_wasm_bindgen::from_value(row)?;
        Ok(self.inner.set_item(index, row))
    }

    /// Running totals ({ lineAmounts, subtotal, tax, total })
    #[wasm_bindgen(js_name = liveTotals)]
    pub fn live_totals(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.live_totals())?)
    }

    /// Validate and build the record passed to `InvoiceGenerator.generate`
    ///
    /// Fails with the localized fill-in warning when the form is incomplete.
    #[wasm_bindgen(js_name = toRecord)]
    pub fn to_record(&self) -> Result<JsValue, JsValue> {
        let record = self.inner.to_record().map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&record)?)
    }

    /// Compose the form with its own language and currency
    pub fn generate(&self, generator: &InvoiceGenerator) -> Result<Vec<u8>, JsValue> {
        let record = self.inner.to_record().map_err(js_error)?;
        invoice::compose(
            &record,
            self.inner.language,
            self.inner.currency,
            &generator.font,
        )
        .map_err(js_error)
    }
}

/// Format an amount with a currency's symbol and precision
///
/// @param value - Amount
/// @param currency - "KRW", "USD", "EUR" or "JPY"
/// @returns Formatted amount (e.g., "₩1,234,567")
#[wasm_bindgen(js_name = formatMoney)]
pub fn format_money(value: f64, currency: &str) -> Result<String, JsValue> {
    Ok(format_money_in(value, parse_currency(currency)?))
}

/// Compute totals for `[{ quantity, unitPrice }]` at a tax rate
#[wasm_bindgen(js_name = computeTotals)]
pub fn totals(items: JsValue, tax_rate_percent: f64) -> Result<JsValue, JsValue> {
    let items: Vec<LineInput> = serde_wasm_bindgen::from_value(items)?;
    Ok(serde_wasm_bindgen::to_value(&compute_totals(
        &items,
        tax_rate_percent,
    ))?)
}

/// The label table for a language as a plain object
#[wasm_bindgen]
pub fn labels(lang: &str) -> Result<JsValue, JsValue> {
    let table = locale_text::labels(parse_language(lang)?);
    Ok(serde_wasm_bindgen::to_value(table)?)
}

/// Supported currency codes
#[wasm_bindgen(js_name = currencyCodes)]
pub fn currency_codes() -> Vec<JsValue> {
    Currency::ALL
        .iter()
        .map(|c| JsValue::from_str(c.code()))
        .collect()
}
