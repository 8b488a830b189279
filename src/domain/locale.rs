// ============================================================================
// Locale Table
// Separator, grouping and symbol conventions used by the standard formatter
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the currency symbol sits relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    Before,
    After,
}

/// Resolved number conventions for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleSymbols {
    pub identifier: &'static str,
    pub decimal_separator: &'static str,
    pub group_separator: &'static str,
    /// Size of the group nearest the decimal point
    pub primary_group: u8,
    /// Size of every further group (differs from primary in en-IN)
    pub secondary_group: u8,
    /// Integer digit count below which no grouping is applied is
    /// `primary_group + min_grouping_digits`
    pub min_grouping_digits: u8,
    pub currency_placement: SymbolPlacement,
    /// Text between currency symbol and digits
    pub currency_spacing: &'static str,
    /// Text between digits and `%`
    pub percent_spacing: &'static str,
    pub minus_sign: &'static str,
    pub default_currency: &'static str,
}

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

static LOCALES: [LocaleSymbols; 9] = [
    LocaleSymbols {
        identifier: "en-US",
        decimal_separator: ".",
        group_separator: ",",
        primary_group: 3,
        secondary_group: 3,
        min_grouping_digits: 1,
        currency_placement: SymbolPlacement::Before,
        currency_spacing: "",
        percent_spacing: "",
        minus_sign: "-",
        default_currency: "USD",
    },
    LocaleSymbols {
        identifier: "en-GB",
        decimal_separator: ".",
        group_separator: ",",
        primary_group: 3,
        secondary_group: 3,
        min_grouping_digits: 1,
        currency_placement: SymbolPlacement::Before,
        currency_spacing: "",
        percent_spacing: "",
        minus_sign: "-",
        default_currency: "GBP",
    },
    LocaleSymbols {
        identifier: "en-IN",
        decimal_separator: ".",
        group_separator: ",",
        primary_group: 3,
        secondary_group: 2,
        min_grouping_digits: 1,
        currency_placement: SymbolPlacement::Before,
        currency_spacing: "",
        percent_spacing: "",
        minus_sign: "-",
        default_currency: "INR",
    },
    LocaleSymbols {
        identifier: "de-DE",
        decimal_separator: ",",
        group_separator: ".",
        primary_group: 3,
        secondary_group: 3,
        min_grouping_digits: 1,
        currency_placement: SymbolPlacement::After,
        currency_spacing: NBSP,
        percent_spacing: NBSP,
        minus_sign: "-",
        default_currency: "EUR",
    },
    LocaleSymbols {
        identifier: "de-CH",
        decimal_separator: ".",
        group_separator: "\u{2019}",
        primary_group: 3,
        secondary_group: 3,
        min_grouping_digits: 1,
        currency_placement: SymbolPlacement::Before,
        currency_spacing: NBSP,
        percent_spacing: "",
        minus_sign: "-",
        default_currency: "CHF",
    },
    LocaleSymbols {
        identifier: "fr-FR",
        decimal_separator: ",",
        group_separator: NARROW_NBSP,
        primary_group: 3,
        secondary_group: 3,
        min_grouping_digits: 1,
        currency_placement: SymbolPlacement::After,
        currency_spacing: NBSP,
        percent_spacing: NBSP,
        minus_sign: "-",
        default_currency: "EUR",
    },
    LocaleSymbols {
        identifier: "es-ES",
        decimal_separator: ",",
        group_separator: ".",
        primary_group: 3,
        secondary_group: 3,
        min_grouping_digits: 2,
        currency_placement: SymbolPlacement::After,
        currency_spacing: NBSP,
        percent_spacing: NBSP,
        minus_sign: "-",
        default_currency: "EUR",
    },
    LocaleSymbols {
        identifier: "it-IT",
        decimal_separator: ",",
        group_separator: ".",
        primary_group: 3,
        secondary_group: 3,
        min_grouping_digits: 1,
        currency_placement: SymbolPlacement::After,
        currency_spacing: NBSP,
        percent_spacing: "",
        minus_sign: "-",
        default_currency: "EUR",
    },
    LocaleSymbols {
        identifier: "ja-JP",
        decimal_separator: ".",
        group_separator: ",",
        primary_group: 3,
        secondary_group: 3,
        min_grouping_digits: 1,
        currency_placement: SymbolPlacement::Before,
        currency_spacing: "",
        percent_spacing: "",
        minus_sign: "-",
        default_currency: "JPY",
    },
];

/// A locale, identified by a BCP 47 style tag such as `de-DE`.
///
/// Unknown tags keep their identifier but format with `en-US` conventions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Locale {
    identifier: String,
}

impl Locale {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    pub fn en_us() -> Self {
        Self::new("en-US")
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// True if the table has an entry for this identifier.
    pub fn is_known(&self) -> bool {
        Self::lookup(&self.identifier).is_some()
    }

    /// Resolve separators and placement rules.
    pub fn symbols(&self) -> &'static LocaleSymbols {
        Self::lookup(&self.identifier).unwrap_or(&LOCALES[0])
    }

    fn lookup(identifier: &str) -> Option<&'static LocaleSymbols> {
        let normalized = identifier.replace('_', "-");
        LOCALES
            .iter()
            .find(|symbols| symbols.identifier.eq_ignore_ascii_case(&normalized))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

// ============================================================================
// Currency Table
// ============================================================================

/// Display symbol for an ISO 4217 code; unknown codes display as the code.
pub fn currency_symbol(code: &str, locale: &LocaleSymbols) -> String {
    let symbol = match code.to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" if locale.identifier == "ja-JP" => "\u{ffe5}",
        "JPY" => "¥",
        "INR" => "₹",
        "CAD" => "CA$",
        "AUD" => "A$",
        "KRW" => "₩",
        other => return other.to_string(),
    };
    symbol.to_string()
}

/// Number of minor-unit digits a currency shows by default.
pub fn currency_minor_units(code: &str) -> u8 {
    match code.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
        "BHD" | "KWD" | "OMR" | "TND" | "JOD" => 3,
        _ => 2,
    }
}
