// ============================================================================
// Format Configuration
// How a numeric value is turned into text before decomposition
// ============================================================================

use super::errors::{FlowError, FlowResult};
use super::locale::{currency_minor_units, Locale};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest accepted fraction digit count.
pub const MAX_FRACTION_DIGITS: u8 = 20;

// ============================================================================
// Number Style
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumberStyle {
    /// Digits only: no grouping, no fraction unless requested
    Plain,
    /// Grouped digits with up to three fraction digits
    #[default]
    Decimal,
    /// Grouped digits with a currency symbol and the currency's minor units
    Currency,
    /// Value scaled by 100 with a trailing percent sign
    Percent,
}

impl NumberStyle {
    pub fn uses_grouping(self) -> bool {
        !matches!(self, NumberStyle::Plain)
    }
}

// ============================================================================
// Format
// ============================================================================

/// Format configuration for one number display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberFlowFormat {
    pub locale: Locale,
    pub style: NumberStyle,

    /// ISO 4217 code; `None` uses the locale's default currency
    pub currency_code: Option<String>,

    pub minimum_fraction_digits: Option<u8>,
    pub maximum_fraction_digits: Option<u8>,

    /// Literal text rendered before the number
    pub prefix: Option<String>,

    /// Literal text rendered after the number
    pub suffix: Option<String>,
}

impl NumberFlowFormat {
    pub fn new(locale: Locale, style: NumberStyle) -> Self {
        Self {
            locale,
            style,
            ..Self::default()
        }
    }

    /// Currency preset with two fraction digits.
    pub fn currency(code: impl Into<String>) -> Self {
        Self {
            style: NumberStyle::Currency,
            currency_code: Some(code.into()),
            minimum_fraction_digits: Some(2),
            maximum_fraction_digits: Some(2),
            ..Self::default()
        }
    }

    /// Percent preset with up to two fraction digits.
    pub fn percent() -> Self {
        Self {
            style: NumberStyle::Percent,
            minimum_fraction_digits: Some(0),
            maximum_fraction_digits: Some(2),
            ..Self::default()
        }
    }

    /// Builder method: Set locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Builder method: Set style
    pub fn with_style(mut self, style: NumberStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder method: Set currency code
    pub fn with_currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    /// Builder method: Set minimum and maximum fraction digits
    pub fn with_fraction_digits(mut self, min: u8, max: u8) -> Self {
        self.minimum_fraction_digits = Some(min);
        self.maximum_fraction_digits = Some(max);
        self
    }

    /// Builder method: Set literal prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Builder method: Set literal suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Currency code in effect: explicit code, else the locale default.
    pub fn effective_currency_code(&self) -> String {
        self.currency_code
            .clone()
            .unwrap_or_else(|| self.locale.symbols().default_currency.to_string())
            .to_ascii_uppercase()
    }

    /// Fraction digit bounds after style defaults are applied.
    ///
    /// A minimum above the maximum raises the maximum.
    pub fn fraction_bounds(&self) -> (u8, u8) {
        let (default_min, default_max) = match self.style {
            NumberStyle::Plain | NumberStyle::Percent => (0, 0),
            NumberStyle::Decimal => (0, 3),
            NumberStyle::Currency => {
                let units = currency_minor_units(&self.effective_currency_code());
                (units, units)
            },
        };

        let min = self
            .minimum_fraction_digits
            .unwrap_or(default_min)
            .min(MAX_FRACTION_DIGITS);
        let max = match self.maximum_fraction_digits {
            Some(max) => max.min(MAX_FRACTION_DIGITS),
            // Only a minimum was given: keep the default cap unless it is lower
            None => default_max,
        };

        (min, max.max(min))
    }

    /// Validate the configuration
    pub fn validate(&self) -> FlowResult<()> {
        let min = self.minimum_fraction_digits.unwrap_or(0);
        let max = self.maximum_fraction_digits.unwrap_or(MAX_FRACTION_DIGITS);
        if min > MAX_FRACTION_DIGITS || max > MAX_FRACTION_DIGITS {
            return Err(FlowError::InvalidFractionDigits { min, max });
        }
        if let (Some(min), Some(max)) = (self.minimum_fraction_digits, self.maximum_fraction_digits)
        {
            if min > max {
                return Err(FlowError::InvalidFractionDigits { min, max });
            }
        }

        if let Some(code) = &self.currency_code {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(FlowError::InvalidCurrencyCode);
            }
        }

        Ok(())
    }
}
