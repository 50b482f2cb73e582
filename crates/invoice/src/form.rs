//! Editable invoice form state

use crate::model::{non_blank, InvoiceRecord, LineItem, Party, PaymentInfo};
use crate::totals::{compute_totals, LineInput, Totals};
use crate::{InvoiceError, Result};
use chrono::{Days, NaiveDate};
use locale_text::{labels, Currency, Language};
use serde::{Deserialize, Serialize};

/// Days between issue and due date for a new form
const DEFAULT_PAYMENT_TERM_DAYS: u64 = 30;

/// Default tax rate in percent
const DEFAULT_TAX_RATE: f64 = 10.0;

/// One editable item row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl Default for ItemRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
        }
    }
}

/// State of the interactive invoice form
///
/// The form always holds at least one item row: row 0 cannot be removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub language: Language,
    pub currency: Currency,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub from: Party,
    pub to: Party,
    items: Vec<ItemRow>,
    pub tax_rate_percent: f64,
    pub payment: PaymentInfo,
    pub notes: String,
}

impl InvoiceForm {
    /// A fresh form issued `today`
    ///
    /// The invoice number is `INV-YYYYMMDD-XXXX` where `XXXX` is the first four
    /// characters of `suffix`, upper-cased.
    pub fn new(today: NaiveDate, suffix: &str) -> Self {
        let suffix: String = suffix
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(4)
            .collect::<String>()
            .to_ascii_uppercase();

        Self {
            language: Language::default(),
            currency: Currency::default(),
            invoice_number: format!("INV-{}-{suffix}", today.format("%Y%m%d")),
            issue_date: today,
            due_date: today
                .checked_add_days(Days::new(DEFAULT_PAYMENT_TERM_DAYS))
                .unwrap_or(today),
            from: Party::default(),
            to: Party::default(),
            items: vec![ItemRow::default()],
            tax_rate_percent: DEFAULT_TAX_RATE,
            payment: PaymentInfo::default(),
            notes: String::new(),
        }
    }

    pub fn items(&self) -> &[ItemRow] {
        &self.items
    }

    /// Append an empty row, returning its index
    pub fn add_item(&mut self) -> usize {
        self.items.push(ItemRow::default());
        self.items.len() - 1
    }

    /// Remove a row; the first row and out-of-range indices are ignored
    pub fn remove_item(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Replace a row, returning false when the index does not exist
    pub fn set_item(&mut self, index: usize, row: ItemRow) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Running totals over every row, named or not
    pub fn live_totals(&self) -> Totals {
        compute_totals(&line_inputs(&self.items), self.tax_rate_percent)
    }

    /// Both company names and at least one named item are required
    pub fn validate(&self) -> Result<()> {
        let has_items = self.items.iter().any(|row| !row.name.trim().is_empty());
        if self.from.company.trim().is_empty() || self.to.company.trim().is_empty() || !has_items
        {
            return Err(InvoiceError::IncompleteForm(
                labels(self.language).fill_warning.to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and turn the form into a record
    ///
    /// Rows without a name are dropped before totals are computed, so the
    /// record's subtotal always equals the sum of its rendered lines.
    pub fn to_record(&self) -> Result<InvoiceRecord> {
        self.validate()?;

        let rows: Vec<&ItemRow> = self
            .items
            .iter()
            .filter(|row| !row.name.trim().is_empty())
            .collect();
        let inputs: Vec<LineInput> = rows
            .iter()
            .map(|row| LineInput {
                quantity: row.quantity,
                unit_price: row.unit_price,
            })
            .collect();
        let totals = compute_totals(&inputs, self.tax_rate_percent);

        let items = rows
            .iter()
            .zip(&totals.line_amounts)
            .map(|(row, &amount)| LineItem {
                name: row.name.clone(),
                quantity: row.quantity,
                unit_price: row.unit_price,
                amount,
            })
            .collect();

        let notes = Some(self.notes.clone());
        Ok(InvoiceRecord {
            invoice_number: self.invoice_number.clone(),
            issue_date: self.issue_date.format("%Y-%m-%d").to_string(),
            due_date: self.due_date.format("%Y-%m-%d").to_string(),
            from: self.from.clone(),
            to: self.to.clone(),
            items,
            subtotal: totals.subtotal,
            tax_rate_percent: self.tax_rate_percent,
            tax: totals.tax,
            total: totals.total,
            payment: self.payment.clone(),
            notes: non_blank(&notes).map(str::to_string),
        })
    }
}

fn line_inputs(rows: &[ItemRow]) -> Vec<LineInput> {
    rows.iter()
        .map(|row| LineInput {
            quantity: row.quantity,
            unit_price: row.unit_price,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn row(name: &str, quantity: f64, unit_price: f64) -> ItemRow {
        ItemRow {
            name: name.to_string(),
            quantity,
            unit_price,
        }
    }

    fn filled_form() -> InvoiceForm {
        let mut form = InvoiceForm::new(today(), "a1b2c3");
        form.from = Party::named("Acme");
        form.to = Party::named("Globex");
        form.set_item(0, row("Design", 1.0, 1000.0));
        let i = form.add_item();
        form.set_item(i, row("Dev", 2.0, 500.0));
        form
    }

    #[test]
    fn test_new_form_defaults() {
        let form = InvoiceForm::new(today(), "a1b2c3d4");
        assert_eq!(form.invoice_number, "INV-20250115-A1B2");
        assert_eq!(form.due_date, NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
        assert_eq!(form.items().len(), 1);
        assert_eq!(form.items()[0].quantity, 1.0);
        assert_eq!(form.tax_rate_percent, 10.0);
    }

    #[test]
    fn test_first_row_cannot_be_removed() {
        let mut form = InvoiceForm::new(today(), "0000");
        assert!(!form.remove_item(0));
        assert_eq!(form.items().len(), 1);

        form.add_item();
        form.add_item();
        assert!(form.remove_item(1));
        assert!(!form.remove_item(5));
        assert_eq!(form.items().len(), 2);
    }

    #[test]
    fn test_set_item_out_of_range() {
        let mut form = InvoiceForm::new(today(), "0000");
        assert!(!form.set_item(3, ItemRow::default()));
    }

    #[test]
    fn test_live_totals() {
        let form = filled_form();
        let totals = form.live_totals();
        assert_eq!(totals.subtotal, 2000.0);
        assert_eq!(totals.tax, 200.0);
        assert_eq!(totals.total, 2200.0);
    }

    #[test]
    fn test_validate_reports_fill_warning() {
        let mut form = InvoiceForm::new(today(), "0000");
        form.language = Language::En;
        match form.validate() {
            Err(InvoiceError::IncompleteForm(message)) => {
                assert_eq!(
                    message,
                    "Please fill in From/To company names and at least one item."
                );
            }
            other => panic!("expected IncompleteForm, got {other:?}"),
        }

        form.from = Party::named("Acme");
        form.to = Party::named("  ");
        form.set_item(0, row("Design", 1.0, 1.0));
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_to_record_drops_unnamed_rows() {
        let mut form = filled_form();
        let blank = form.add_item();
        form.set_item(blank, row("  ", 5.0, 999.0));
        form.notes = "   ".to_string();

        let record = form.to_record().unwrap();
        assert_eq!(record.items.len(), 2);
        assert_eq!(record.subtotal, 2000.0);
        assert_eq!(record.total, 2200.0);
        assert_eq!(record.issue_date, "2025-01-15");
        assert_eq!(record.due_date, "2025-02-14");
        assert_eq!(record.notes, None);
    }
}
