//! Invoice record model

use crate::totals::{compute_totals, LineInput};
use crate::Result;
use serde::{Deserialize, Serialize};

/// MIME type of composed documents
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A billing entity (sender or recipient)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Party {
    /// Party with only a company name
    pub fn named(company: &str) -> Self {
        Self {
            company: company.to_string(),
            ..Self::default()
        }
    }
}

/// One billable row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub amount: f64,
}

/// Bank transfer details
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,
}

impl PaymentInfo {
    /// True when no field carries any visible text
    pub fn is_empty(&self) -> bool {
        non_blank(&self.bank_name).is_none()
            && non_blank(&self.account_number).is_none()
            && non_blank(&self.account_holder).is_none()
    }
}

/// A complete invoice, ready to be composed
///
/// Derived fields (`amount`, `subtotal`, `tax`, `total`) are rendered exactly
/// as stored. Use [`InvoiceRecord::from_parts`] to have them computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub invoice_number: String,
    pub issue_date: String,
    pub due_date: String,
    pub from: Party,
    pub to: Party,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_rate_percent: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(default)]
    pub payment: PaymentInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InvoiceRecord {
    /// Build a record whose line amounts and totals come from the calculator
    ///
    /// `items` are `(name, quantity, unit_price)` triples.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        invoice_number: &str,
        issue_date: &str,
        due_date: &str,
        from: Party,
        to: Party,
        items: &[(&str, f64, f64)],
        tax_rate_percent: f64,
        payment: PaymentInfo,
        notes: Option<String>,
    ) -> Self {
        let inputs: Vec<LineInput> = items
            .iter()
            .map(|&(_, quantity, unit_price)| LineInput {
                quantity,
                unit_price,
            })
            .collect();
        let totals = compute_totals(&inputs, tax_rate_percent);

        let items = items
            .iter()
            .zip(&totals.line_amounts)
            .map(|(&(name, quantity, unit_price), &amount)| LineItem {
                name: name.to_string(),
                quantity,
                unit_price,
                amount,
            })
            .collect();

        Self {
            invoice_number: invoice_number.to_string(),
            issue_date: issue_date.to_string(),
            due_date: due_date.to_string(),
            from,
            to,
            items,
            subtotal: totals.subtotal,
            tax_rate_percent,
            tax: totals.tax,
            total: totals.total,
            payment,
            notes,
        }
    }

    /// The fixed built-in sample invoice
    pub fn sample() -> Self {
        Self::from_parts(
            "INV-20250101-0001",
            "2025-01-01",
            "2025-01-31",
            Party {
                company: "Acme Studio".to_string(),
                business_number: Some("123-45-67890".to_string()),
                address: Some("123 Teheran-ro, Gangnam-gu, Seoul".to_string()),
                email: Some("billing@acme.example".to_string()),
                phone: Some("02-1234-5678".to_string()),
            },
            Party {
                company: "Globex Korea".to_string(),
                business_number: None,
                address: Some("45 Sejong-daero, Jung-gu, Seoul".to_string()),
                email: Some("ap@globex.example".to_string()),
                phone: None,
            },
            &[("Design", 1.0, 1000.0), ("Dev", 2.0, 500.0)],
            10.0,
            PaymentInfo {
                bank_name: Some("Shinhan Bank".to_string()),
                account_number: Some("110-123-456789".to_string()),
                account_holder: Some("Acme Studio".to_string()),
            },
            Some("Payment due within 30 days.\nPlease include the invoice number.".to_string()),
        )
    }

    /// Parse a record from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the record to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Download filename: `{invoiceNumber}.pdf`
    pub fn suggested_filename(&self) -> String {
        format!("{}.pdf", self.invoice_number)
    }

    /// Notes with surrounding blank space removed, if any text remains
    pub fn notes_text(&self) -> Option<&str> {
        non_blank(&self.notes)
    }
}

/// Trimmed-empty values count as absent
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_parts_computes_derived_fields() {
        let record = InvoiceRecord::from_parts(
            "INV-1",
            "2025-01-01",
            "2025-01-31",
            Party::named("A"),
            Party::named("B"),
            &[("Design", 1.0, 1000.0), ("Dev", 2.0, 500.0)],
            10.0,
            PaymentInfo::default(),
            None,
        );

        let amounts: Vec<f64> = record.items.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![1000.0, 1000.0]);
        assert_eq!(record.subtotal, 2000.0);
        assert_eq!(record.tax, 200.0);
        assert_eq!(record.total, 2200.0);
    }

    #[test]
    fn test_suggested_filename() {
        let record = InvoiceRecord::sample();
        assert_eq!(record.suggested_filename(), "INV-20250101-0001.pdf");
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = InvoiceRecord::sample().to_json().unwrap();
        assert!(json.contains("\"invoiceNumber\""));
        assert!(json.contains("\"taxRatePercent\""));
        assert!(json.contains("\"unitPrice\""));
        assert!(json.contains("\"businessNumber\""));
    }

    #[test]
    fn test_json_roundtrip() {
        let record = InvoiceRecord::sample();
        let parsed = InvoiceRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_minimal_json() {
        let json = r#"{
            "invoiceNumber": "INV-2",
            "issueDate": "2025-02-01",
            "dueDate": "2025-03-03",
            "from": {"company": "A"},
            "to": {"company": "B"},
            "subtotal": 0,
            "taxRatePercent": 0,
            "tax": 0,
            "total": 0
        }"#;
        let record = InvoiceRecord::from_json(json).unwrap();
        assert!(record.items.is_empty());
        assert!(record.payment.is_empty());
        assert_eq!(record.notes_text(), None);
    }

    #[test]
    fn test_payment_blank_fields_are_empty() {
        let payment = PaymentInfo {
            bank_name: Some("  ".to_string()),
            account_number: Some(String::new()),
            account_holder: None,
        };
        assert!(payment.is_empty());

        let payment = PaymentInfo {
            account_holder: Some("Kim".to_string()),
            ..PaymentInfo::default()
        };
        assert!(!payment.is_empty());
    }

    #[test]
    fn test_notes_text() {
        let mut record = InvoiceRecord::sample();
        record.notes = Some(" \n ".to_string());
        assert_eq!(record.notes_text(), None);
        record.notes = Some("Thanks".to_string());
        assert_eq!(record.notes_text(), Some("Thanks"));
    }
}
