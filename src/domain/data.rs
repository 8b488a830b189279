// ============================================================================
// Number Flow Data
// Immutable, keyed snapshot of one formatted value
// ============================================================================

use super::part::{DigitPart, NumberPart, NumberPartKey, SymbolPart};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of a formatted value split into keyed parts.
///
/// `prefix ++ integer ++ fraction ++ suffix` is the left-to-right render
/// order. Integer and fraction runs are most-significant-first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberFlowData {
    pub prefix: Vec<NumberPart>,
    pub integer: Vec<NumberPart>,
    pub fraction: Vec<NumberPart>,
    pub suffix: Vec<NumberPart>,
    pub value_as_string: String,
    pub numeric_value: f64,
}

impl NumberFlowData {
    pub fn new(
        prefix: Vec<NumberPart>,
        integer: Vec<NumberPart>,
        fraction: Vec<NumberPart>,
        suffix: Vec<NumberPart>,
        value_as_string: String,
        numeric_value: f64,
    ) -> Self {
        Self {
            prefix,
            integer,
            fraction,
            suffix,
            value_as_string,
            numeric_value,
        }
    }

    /// Snapshot with no parts, e.g. before the first value arrives.
    pub fn empty(numeric_value: f64) -> Self {
        Self::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            String::new(),
            numeric_value,
        )
    }

    /// All parts in render order.
    pub fn all_parts(&self) -> impl Iterator<Item = &NumberPart> + '_ {
        self.prefix
            .iter()
            .chain(self.integer.iter())
            .chain(self.fraction.iter())
            .chain(self.suffix.iter())
    }

    /// Keys in render order.
    pub fn keys(&self) -> Vec<NumberPartKey> {
        self.all_parts().map(NumberPart::key).collect()
    }

    pub fn digit_parts(&self) -> impl Iterator<Item = &DigitPart> + '_ {
        self.all_parts().filter_map(NumberPart::as_digit)
    }

    pub fn symbol_parts(&self) -> impl Iterator<Item = &SymbolPart> + '_ {
        self.all_parts().filter_map(NumberPart::as_symbol)
    }

    /// Integer and fraction runs, separators included.
    pub fn numeric_parts(&self) -> impl Iterator<Item = &NumberPart> + '_ {
        self.integer.iter().chain(self.fraction.iter())
    }

    /// Look up a part by key (linear scan; snapshots are short).
    pub fn part(&self, key: NumberPartKey) -> Option<&NumberPart> {
        self.all_parts().find(|part| part.key() == key)
    }

    pub fn len(&self) -> usize {
        self.prefix.len() + self.integer.len() + self.fraction.len() + self.suffix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenated text of every part; equals the formatted string plus
    /// any literal prefix/suffix.
    pub fn rendered_text(&self) -> String {
        self.all_parts().map(NumberPart::text).collect()
    }

    /// Multi-line dump of every part, for debugging.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "NumberFlowData {{\n  numeric_value: {}\n  value_as_string: {:?}\n  parts:\n",
            self.numeric_value, self.value_as_string
        );
        for (index, part) in self.all_parts().enumerate() {
            let value = match part {
                NumberPart::Digit(digit) => {
                    format!("{} (pos: {})", digit.value(), digit.position())
                },
                NumberPart::Symbol(symbol) => format!("{:?}", symbol.value()),
            };
            out.push_str(&format!(
                "    [{}] {}: {} (key: {})\n",
                index,
                part.kind(),
                value,
                part.key()
            ));
        }
        out.push('}');
        out
    }
}

impl fmt::Display for NumberFlowData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NumberFlowData(value: {}, formatted: {:?}, parts: {})",
            self.numeric_value,
            self.value_as_string,
            self.len()
        )
    }
}
