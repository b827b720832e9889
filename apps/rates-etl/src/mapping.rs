//! Currency code → display name lookup.
//!
//! The mapping is read-only for the lifetime of a run. It is either the
//! built-in table below or an override supplied through the configuration
//! file; it is never persisted and never mutated.

use std::collections::BTreeMap;

/// Built-in ISO-style currency codes and display names.
///
/// Covers the currencies the rates API commonly returns; codes outside
/// this table simply load with a NULL display name.
const BUILTIN_NAMES: &[(&str, &str)] = &[
    ("AED", "United Arab Emirates Dirham"),
    ("ARS", "Argentine Peso"),
    ("AUD", "Australian Dollar"),
    ("BGN", "Bulgarian Lev"),
    ("BRL", "Brazilian Real"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CLP", "Chilean Peso"),
    ("CNY", "Chinese Yuan"),
    ("COP", "Colombian Peso"),
    ("CZK", "Czech Koruna"),
    ("DKK", "Danish Krone"),
    ("EGP", "Egyptian Pound"),
    ("EUR", "Euro"),
    ("GBP", "British Pound Sterling"),
    ("HKD", "Hong Kong Dollar"),
    ("HUF", "Hungarian Forint"),
    ("IDR", "Indonesian Rupiah"),
    ("ILS", "Israeli New Shekel"),
    ("INR", "Indian Rupee"),
    ("ISK", "Icelandic Krona"),
    ("JPY", "Japanese Yen"),
    ("KES", "Kenyan Shilling"),
    ("KRW", "South Korean Won"),
    ("MAD", "Moroccan Dirham"),
    ("MXN", "Mexican Peso"),
    ("MYR", "Malaysian Ringgit"),
    ("NGN", "Nigerian Naira"),
    ("NOK", "Norwegian Krone"),
    ("NZD", "New Zealand Dollar"),
    ("PHP", "Philippine Peso"),
    ("PKR", "Pakistani Rupee"),
    ("PLN", "Polish Zloty"),
    ("RON", "Romanian Leu"),
    ("RUB", "Russian Ruble"),
    ("SAR", "Saudi Riyal"),
    ("SEK", "Swedish Krona"),
    ("SGD", "Singapore Dollar"),
    ("THB", "Thai Baht"),
    ("TRY", "Turkish Lira"),
    ("TWD", "New Taiwan Dollar"),
    ("UAH", "Ukrainian Hryvnia"),
    ("USD", "United States Dollar"),
    ("VND", "Vietnamese Dong"),
    ("ZAR", "South African Rand"),
];

/// Read-only lookup from currency code to display name.
#[derive(Debug, Clone)]
pub struct CurrencyMapping {
    names: BTreeMap<String, String>,
}

impl CurrencyMapping {
    /// The built-in mapping table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_NAMES
                .iter()
                .map(|&(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Build a mapping from explicit (code, name) pairs.
    #[must_use]
    pub fn from_names(names: BTreeMap<String, String>) -> Self {
        Self { names }
    }

    /// Look up the display name for a currency code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Number of known codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_knows_major_currencies() {
        let mapping = CurrencyMapping::builtin();
        assert_eq!(mapping.get("USD"), Some("United States Dollar"));
        assert_eq!(mapping.get("EUR"), Some("Euro"));
        assert_eq!(mapping.get("JPY"), Some("Japanese Yen"));
    }

    #[test]
    fn unknown_code_is_none() {
        let mapping = CurrencyMapping::builtin();
        assert_eq!(mapping.get("XXX"), None);
        assert_eq!(mapping.get(""), None);
    }

    #[test]
    fn builtin_has_no_duplicate_codes() {
        let mapping = CurrencyMapping::builtin();
        assert_eq!(mapping.len(), BUILTIN_NAMES.len());
    }

    #[test]
    fn from_names_replaces_builtin_table() {
        let mut names = BTreeMap::new();
        names.insert("ZZZ".to_string(), "Test Money".to_string());
        let mapping = CurrencyMapping::from_names(names);
        assert_eq!(mapping.get("ZZZ"), Some("Test Money"));
        assert_eq!(mapping.get("USD"), None);
        assert_eq!(mapping.len(), 1);
    }
}
