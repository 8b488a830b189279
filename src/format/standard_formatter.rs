// ============================================================================
// Standard Formatter
// Locale-table number formatting with exact decimal rounding
// ============================================================================

use crate::domain::locale::{currency_symbol, LocaleSymbols, SymbolPlacement};
use crate::domain::{FlowError, FlowResult, NumberFlowFormat, NumberStyle};
use crate::interfaces::{FormattedNumber, NumberFormatter};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Built-in formatter driven by the [`Locale`](crate::domain::Locale) table.
///
/// Rounds half-to-even at the maximum fraction digit count, trims trailing
/// zeros down to the minimum, and groups integer digits per locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl StandardFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Convert through the shortest round-trip text of the `f64`, so `0.1`
    /// becomes exactly `0.1` rather than its binary expansion.
    fn to_decimal(value: f64) -> FlowResult<Decimal> {
        if !value.is_finite() {
            return Err(FlowError::NonFiniteValue);
        }
        Decimal::from_str(&value.to_string()).map_err(|_| FlowError::ValueOutOfRange)
    }

    /// Insert group separators into a run of ASCII digits.
    fn group_integer(digits: &str, symbols: &LocaleSymbols) -> String {
        let primary = symbols.primary_group.max(1) as usize;
        let secondary = symbols.secondary_group.max(1) as usize;
        let threshold = primary + symbols.min_grouping_digits as usize;

        if digits.len() < threshold {
            return digits.to_string();
        }

        let (head, tail) = digits.split_at(digits.len() - primary);
        let mut groups: Vec<&str> = vec![tail];
        let mut rest = head;
        while rest.len() > secondary {
            let (left, right) = rest.split_at(rest.len() - secondary);
            groups.push(right);
            rest = left;
        }
        if !rest.is_empty() {
            groups.push(rest);
        }
        groups.reverse();
        groups.join(symbols.group_separator)
    }
}

impl NumberFormatter for StandardFormatter {
    fn format(&self, value: f64, format: &NumberFlowFormat) -> FlowResult<FormattedNumber> {
        format.validate()?;

        let symbols = format.locale.symbols();
        let (min_fraction, max_fraction) = format.fraction_bounds();

        let mut decimal = Self::to_decimal(value)?;
        if format.style == NumberStyle::Percent {
            decimal = decimal
                .checked_mul(Decimal::ONE_HUNDRED)
                .ok_or(FlowError::ValueOutOfRange)?;
        }

        let rounded = decimal
            .round_dp_with_strategy(max_fraction as u32, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let magnitude = rounded.abs().to_string();
        let (integer_digits, fraction_digits) = match magnitude.split_once('.') {
            Some((integer, fraction)) => (integer.to_string(), fraction.to_string()),
            None => (magnitude.clone(), String::new()),
        };

        let mut fraction = fraction_digits.trim_end_matches('0').to_string();
        while fraction.len() < min_fraction as usize {
            fraction.push('0');
        }

        let mut number = if format.style.uses_grouping() {
            Self::group_integer(&integer_digits, symbols)
        } else {
            integer_digits
        };
        if !fraction.is_empty() {
            number.push_str(symbols.decimal_separator);
            number.push_str(&fraction);
        }

        let sign = if negative { symbols.minus_sign } else { "" };
        let text = match format.style {
            NumberStyle::Currency => {
                let symbol = currency_symbol(&format.effective_currency_code(), symbols);
                match symbols.currency_placement {
                    SymbolPlacement::Before => {
                        format!("{}{}{}{}", sign, symbol, symbols.currency_spacing, number)
                    },
                    SymbolPlacement::After => {
                        format!("{}{}{}{}", sign, number, symbols.currency_spacing, symbol)
                    },
                }
            },
            NumberStyle::Percent => format!("{}{}{}%", sign, number, symbols.percent_spacing),
            NumberStyle::Plain | NumberStyle::Decimal => format!("{}{}", sign, number),
        };

        Ok(FormattedNumber::new(
            text,
            symbols.decimal_separator,
            symbols.group_separator,
        ))
    }

    fn name(&self) -> &str {
        "standard"
    }
}
