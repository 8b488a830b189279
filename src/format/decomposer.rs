// ============================================================================
// Decomposer
// Splits a formatted value into keyed, positioned parts
// ============================================================================

use super::standard_formatter::StandardFormatter;
use crate::domain::{
    DigitPart, NumberFlowData, NumberFlowFormat, NumberPart, NumberPartKey, NumberPartType,
    SymbolPart,
};
use crate::interfaces::{FormattedNumber, NumberFormatter};
use smallvec::SmallVec;

/// Scanned entry of the integer or fraction run, before keys are assigned.
#[derive(Debug, Clone)]
enum RawPart {
    Digit(u8),
    Symbol(NumberPartType, String),
}

type RawRun = SmallVec<[RawPart; 16]>;

/// Per-type occurrence counters producing `type:index` keys.
#[derive(Debug, Default)]
struct KeyCounter {
    counts: [u32; NumberPartType::COUNT],
}

impl KeyCounter {
    fn next(&mut self, kind: NumberPartType) -> NumberPartKey {
        let slot = &mut self.counts[kind.ordinal()];
        let key = NumberPartKey::new(kind, *slot);
        *slot += 1;
        key
    }

    fn symbol(&mut self, kind: NumberPartType, value: impl Into<String>) -> NumberPart {
        let key = self.next(kind);
        SymbolPart::new(kind, value, key).into()
    }
}

/// Decompose `value` using the built-in [`StandardFormatter`].
pub fn decompose(value: f64, format: &NumberFlowFormat) -> NumberFlowData {
    decompose_with(&StandardFormatter, value, format)
}

/// Decompose `value` using any formatting capability.
///
/// Never fails: if the formatter errors or returns text without digits, the
/// plain `f64` rendering is decomposed instead.
pub fn decompose_with<F>(formatter: &F, value: f64, format: &NumberFlowFormat) -> NumberFlowData
where
    F: NumberFormatter + ?Sized,
{
    let formatted = match formatter.format(value, format) {
        Ok(formatted) if formatted.has_digits() => formatted,
        Ok(formatted) => {
            tracing::warn!(
                formatter = formatter.name(),
                text = %formatted.text,
                "formatter produced no digits, using plain fallback"
            );
            FormattedNumber::plain(value)
        },
        Err(err) => {
            tracing::warn!(
                formatter = formatter.name(),
                value,
                error = %err,
                "formatting failed, using plain fallback"
            );
            FormattedNumber::plain(value)
        },
    };

    decompose_formatted(&formatted, value, format)
}

/// Decompose already-formatted text.
pub fn decompose_formatted(
    formatted: &FormattedNumber,
    value: f64,
    format: &NumberFlowFormat,
) -> NumberFlowData {
    let mut counter = KeyCounter::default();
    let mut prefix: Vec<NumberPart> = Vec::new();
    let mut suffix: Vec<NumberPart> = Vec::new();
    let mut integer_raw = RawRun::new();
    let mut fraction_raw = RawRun::new();

    if let Some(literal) = &format.prefix {
        for c in literal.chars() {
            prefix.push(counter.symbol(NumberPartType::Literal, c));
        }
    }

    let decimal = formatted.decimal_separator.as_str();
    let group = formatted.grouping_separator.as_str();

    let mut seen_digit = false;
    let mut seen_decimal = false;

    let chars: Vec<char> = formatted.text.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if let Some(d) = c.to_digit(10) {
            let run = if seen_decimal {
                &mut fraction_raw
            } else {
                &mut integer_raw
            };
            run.push(RawPart::Digit(d as u8));
            seen_digit = true;
            continue;
        }

        let mut buf = [0u8; 4];
        let s: &str = c.encode_utf8(&mut buf);

        if !seen_decimal && s == decimal {
            seen_decimal = true;
            fraction_raw.push(RawPart::Symbol(NumberPartType::Decimal, s.to_string()));
            continue;
        }

        // A grouping separator only groups when it sits between integer digits;
        // elsewhere (e.g. a space before `%` that shares the code point) it is text.
        let next_is_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
        if !seen_decimal && s == group && next_is_digit {
            integer_raw.push(RawPart::Symbol(NumberPartType::Group, s.to_string()));
            continue;
        }

        let leading = !seen_digit && !seen_decimal;
        let kind = match c {
            '+' | '-' => NumberPartType::Sign,
            _ if leading => NumberPartType::Prefix,
            _ => NumberPartType::Suffix,
        };
        let part = counter.symbol(kind, s);
        if leading {
            prefix.push(part);
        } else {
            suffix.push(part);
        }
    }

    let integer = key_integer_run(&integer_raw, &mut counter);
    let fraction = key_fraction_run(&fraction_raw, &mut counter);

    if let Some(literal) = &format.suffix {
        for c in literal.chars() {
            suffix.push(counter.symbol(NumberPartType::Literal, c));
        }
    }

    let data = NumberFlowData::new(
        prefix,
        integer,
        fraction,
        suffix,
        formatted.text.clone(),
        value,
    );
    tracing::trace!(parts = data.len(), formatted = %data.value_as_string, "decomposed value");
    data
}

/// Walk the integer run right to left: the ones digit gets position 0 and
/// key `integer:0`; separators are keyed in the same walk.
fn key_integer_run(raw: &[RawPart], counter: &mut KeyCounter) -> Vec<NumberPart> {
    let mut parts: Vec<NumberPart> = Vec::with_capacity(raw.len());
    let mut position = 0i32;
    for entry in raw.iter().rev() {
        let part = match entry {
            RawPart::Digit(d) => {
                let key = counter.next(NumberPartType::Integer);
                let digit = DigitPart::new(NumberPartType::Integer, *d, position, key);
                position += 1;
                digit.into()
            },
            RawPart::Symbol(kind, value) => counter.symbol(*kind, value.as_str()),
        };
        parts.push(part);
    }
    parts.reverse();
    parts
}

/// Walk the fraction run left to right from position -1.
fn key_fraction_run(raw: &[RawPart], counter: &mut KeyCounter) -> Vec<NumberPart> {
    let mut position = -1i32;
    raw.iter()
        .map(|entry| match entry {
            RawPart::Digit(d) => {
                let key = counter.next(NumberPartType::Fraction);
                let digit = DigitPart::new(NumberPartType::Fraction, *d, position, key);
                position -= 1;
                digit.into()
            },
            RawPart::Symbol(kind, value) => counter.symbol(*kind, value.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FlowError, FlowResult, Locale, NumberStyle};

    fn texts(parts: &[NumberPart]) -> Vec<String> {
        parts.iter().map(NumberPart::text).collect()
    }

    fn positions(parts: &[NumberPart]) -> Vec<Option<i32>> {
        parts
            .iter()
            .map(|p| p.as_digit().map(DigitPart::position))
            .collect()
    }

    fn keys(parts: &[NumberPart]) -> Vec<String> {
        parts.iter().map(|p| p.key().to_string()).collect()
    }

    #[test]
    fn test_decimal_example() {
        let data = decompose(1234.5, &NumberFlowFormat::default());

        assert!(data.prefix.is_empty());
        assert!(data.suffix.is_empty());
        assert_eq!(texts(&data.integer), vec!["1", ",", "2", "3", "4"]);
        assert_eq!(
            positions(&data.integer),
            vec![Some(3), None, Some(2), Some(1), Some(0)]
        );
        assert_eq!(texts(&data.fraction), vec![".", "5"]);
        assert_eq!(positions(&data.fraction), vec![None, Some(-1)]);
        assert_eq!(data.value_as_string, "1,234.5");
        assert_eq!(data.numeric_value, 1234.5);
    }

    #[test]
    fn test_integer_keys_follow_position() {
        let data = decompose(1234.5, &NumberFlowFormat::default());
        assert_eq!(
            keys(&data.integer),
            vec!["integer:3", "group:0", "integer:2", "integer:1", "integer:0"]
        );
        assert_eq!(keys(&data.fraction), vec!["decimal:0", "fraction:0"]);
    }

    #[test]
    fn test_no_fraction_yields_empty_run() {
        let data = decompose(42.0, &NumberFlowFormat::default());
        assert!(data.fraction.is_empty());
        assert_eq!(texts(&data.integer), vec!["4", "2"]);
    }

    #[test]
    fn test_sign_and_currency_prefix() {
        let data = decompose(-1234.5, &NumberFlowFormat::currency("USD"));
        assert_eq!(texts(&data.prefix), vec!["-", "$"]);
        assert_eq!(keys(&data.prefix), vec!["sign:0", "prefix:0"]);
        assert_eq!(data.rendered_text(), "-$1,234.50");
    }

    #[test]
    fn test_multi_char_prefix_gets_one_part_per_char() {
        let format = NumberFlowFormat::currency("CAD");
        let data = decompose(5.0, &format);
        assert_eq!(texts(&data.prefix), vec!["C", "A", "$"]);
        assert_eq!(keys(&data.prefix), vec!["prefix:0", "prefix:1", "prefix:2"]);
    }

    #[test]
    fn test_trailing_currency_is_suffix() {
        let format = NumberFlowFormat::currency("EUR").with_locale(Locale::new("de-DE"));
        let data = decompose(1234.5, &format);
        assert_eq!(texts(&data.integer), vec!["1", ".", "2", "3", "4"]);
        assert_eq!(texts(&data.fraction), vec![",", "5", "0"]);
        assert_eq!(texts(&data.suffix), vec!["\u{a0}", "€"]);
        assert_eq!(keys(&data.suffix), vec!["suffix:0", "suffix:1"]);
    }

    #[test]
    fn test_percent_space_sharing_group_code_point() {
        struct NarrowSpacePercent;
        impl NumberFormatter for NarrowSpacePercent {
            fn format(&self, _: f64, _: &NumberFlowFormat) -> FlowResult<FormattedNumber> {
                Ok(FormattedNumber::new("12\u{202f}345,5\u{202f}%", ",", "\u{202f}"))
            }
            fn name(&self) -> &str {
                "narrow"
            }
        }

        let data = decompose_with(&NarrowSpacePercent, 123.455, &NumberFlowFormat::percent());
        assert_eq!(texts(&data.integer), vec!["1", "2", "\u{202f}", "3", "4", "5"]);
        assert_eq!(texts(&data.fraction), vec![",", "5"]);
        assert_eq!(texts(&data.suffix), vec!["\u{202f}", "%"]);
    }

    #[test]
    fn test_literal_prefix_and_suffix() {
        let format = NumberFlowFormat::default()
            .with_prefix("~")
            .with_suffix(" pts");
        let data = decompose(12.0, &format);
        assert_eq!(texts(&data.prefix), vec!["~"]);
        assert_eq!(keys(&data.prefix), vec!["literal:0"]);
        assert_eq!(texts(&data.suffix), vec![" ", "p", "t", "s"]);
        assert_eq!(data.suffix[0].kind(), NumberPartType::Literal);
        assert_eq!(data.rendered_text(), "~12 pts");
        assert_eq!(data.value_as_string, "12");
    }

    #[test]
    fn test_trailing_sign_goes_to_suffix() {
        struct Accounting;
        impl NumberFormatter for Accounting {
            fn format(&self, _: f64, _: &NumberFlowFormat) -> FlowResult<FormattedNumber> {
                Ok(FormattedNumber::new("12.5-", ".", ","))
            }
            fn name(&self) -> &str {
                "accounting"
            }
        }

        let data = decompose_with(&Accounting, -12.5, &NumberFlowFormat::default());
        assert!(data.prefix.is_empty());
        assert_eq!(keys(&data.suffix), vec!["sign:0"]);
    }

    #[test]
    fn test_formatter_failure_falls_back_to_plain() {
        struct Broken;
        impl NumberFormatter for Broken {
            fn format(&self, _: f64, _: &NumberFlowFormat) -> FlowResult<FormattedNumber> {
                Err(FlowError::ValueOutOfRange)
            }
            fn name(&self) -> &str {
                "broken"
            }
        }

        let data = decompose_with(&Broken, 1234.5, &NumberFlowFormat::default());
        assert_eq!(data.value_as_string, "1234.5");
        assert_eq!(texts(&data.integer), vec!["1", "2", "3", "4"]);
        assert_eq!(texts(&data.fraction), vec![".", "5"]);
    }

    #[test]
    fn test_digitless_output_falls_back() {
        struct Blank;
        impl NumberFormatter for Blank {
            fn format(&self, _: f64, _: &NumberFlowFormat) -> FlowResult<FormattedNumber> {
                Ok(FormattedNumber::new("--", ".", ","))
            }
            fn name(&self) -> &str {
                "blank"
            }
        }

        let data = decompose_with(&Blank, 7.0, &NumberFlowFormat::default());
        assert_eq!(data.value_as_string, "7");
        assert_eq!(data.integer.len(), 1);
    }

    #[test]
    fn test_non_finite_value() {
        let data = decompose(f64::NAN, &NumberFlowFormat::default());
        assert_eq!(data.value_as_string, "NaN");
        assert!(data.integer.is_empty());
        assert_eq!(keys(&data.prefix), vec!["prefix:0", "prefix:1", "prefix:2"]);
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let format = NumberFlowFormat::default().with_fraction_digits(5, 1);
        let data = decompose(3.25, &format);
        assert_eq!(data.value_as_string, "3.25");
    }

    #[test]
    fn test_deterministic() {
        let format = NumberFlowFormat::default()
            .with_style(NumberStyle::Percent)
            .with_locale(Locale::new("fr-FR"));
        assert_eq!(decompose(0.4217, &format), decompose(0.4217, &format));
    }

    #[test]
    fn test_small_fraction_positions() {
        let format = NumberFlowFormat::default().with_fraction_digits(3, 3);
        let data = decompose(0.05, &format);
        assert_eq!(texts(&data.fraction), vec![".", "0", "5", "0"]);
        assert_eq!(
            positions(&data.fraction),
            vec![None, Some(-1), Some(-2), Some(-3)]
        );
        assert_eq!(
            keys(&data.fraction),
            vec!["decimal:0", "fraction:0", "fraction:1", "fraction:2"]
        );
    }
}
