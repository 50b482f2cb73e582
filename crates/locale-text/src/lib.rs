//! Locale Text - language, currency and text utilities for invoices
//!
//! This crate provides:
//! - `Language` and `Currency` selectors parsed from their codes
//! - Money formatting with thousands separators and per-currency precision
//! - Static Korean/English label tables
//! - Hangul-aware line breaking
//!
//! # Example
//!
//! ```ignore
//! use locale_text::{format_money, labels, Currency, Language};
//!
//! let lang: Language = "ko".parse()?;
//! let currency: Currency = "KRW".parse()?;
//!
//! assert_eq!(format_money(1234567.0, currency.symbol()), "₩1,234,567");
//! assert_eq!(labels(lang).pdf_header, "청구서");
//! ```

mod formatter;
mod labels;
mod linebreak;

pub use formatter::{
    format_money, format_money_in, format_quantity, format_rate, format_with_thousands,
};
pub use labels::{labels, Labels};
pub use linebreak::{can_break_between, find_break_points, is_cjk, is_hangul, wrap_by_width};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when resolving locale selectors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unsupported language: {0} (expected one of: ko, en)")]
    UnsupportedLanguage(String),

    #[error("Unsupported currency: {0} (expected one of: KRW, USD, EUR, JPY)")]
    UnsupportedCurrency(String),
}

/// Result type for locale operations
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Document language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ko, Language::En];

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }

    /// Name of the language in itself, for pickers
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Ko => "한국어",
            Language::En => "English",
        }
    }
}

impl FromStr for Language {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" => Ok(Language::Ko),
            "en" => Ok(Language::En),
            _ => Err(LocaleError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Invoice currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    KRW,
    USD,
    EUR,
    JPY,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::KRW, Currency::USD, Currency::EUR, Currency::JPY];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::KRW => "KRW",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::KRW => "₩",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::JPY => "¥",
        }
    }

    /// Won and Yen have no minor unit
    pub fn is_zero_decimal(&self) -> bool {
        matches!(self, Currency::KRW | Currency::JPY)
    }
}

impl FromStr for Currency {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KRW" => Ok(Currency::KRW),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "JPY" => Ok(Currency::JPY),
            _ => Err(LocaleError::UnsupportedCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_language() {
        assert_eq!("ko".parse::<Language>(), Ok(Language::Ko));
        assert_eq!("EN".parse::<Language>(), Ok(Language::En));
        assert_eq!(" en ".parse::<Language>(), Ok(Language::En));
        assert_eq!(
            "ja".parse::<Language>(),
            Err(LocaleError::UnsupportedLanguage("ja".to_string()))
        );
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!("krw".parse::<Currency>(), Ok(Currency::KRW));
        assert_eq!("JPY".parse::<Currency>(), Ok(Currency::JPY));
        assert_eq!(
            "GBP".parse::<Currency>(),
            Err(LocaleError::UnsupportedCurrency("GBP".to_string()))
        );
    }

    #[test]
    fn test_currency_symbols() {
        let symbols: Vec<&str> = Currency::ALL.iter().map(Currency::symbol).collect();
        assert_eq!(symbols, vec!["₩", "$", "€", "¥"]);
    }

    #[test]
    fn test_zero_decimal_currencies() {
        assert!(Currency::KRW.is_zero_decimal());
        assert!(Currency::JPY.is_zero_decimal());
        assert!(!Currency::USD.is_zero_decimal());
        assert!(!Currency::EUR.is_zero_decimal());
    }

    #[test]
    fn test_codes_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>(), Ok(lang));
        }
        for currency in Currency::ALL {
            assert_eq!(currency.to_string().parse::<Currency>(), Ok(currency));
        }
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::Ko).unwrap(), "\"ko\"");
        assert_eq!(serde_json::to_string(&Currency::EUR).unwrap(), "\"EUR\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }
}
