// ============================================================================
// Number Parts
// Keyed, typed atoms of a formatted number (digits and symbols)
// ============================================================================

use super::errors::{FlowError, FlowResult};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Part Type
// ============================================================================

/// Role of a part inside the formatted number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NumberPartType {
    /// Digit left of the decimal separator
    Integer,
    /// Digit right of the decimal separator
    Fraction,
    /// Grouping (thousands) separator
    Group,
    /// Decimal separator
    Decimal,
    Currency,
    Percent,
    /// `+` or `-`
    Sign,
    /// Any other character before the first digit
    Prefix,
    /// Any other character after the first digit
    Suffix,
    /// Caller-supplied literal text from the format configuration
    Literal,
}

impl NumberPartType {
    pub const COUNT: usize = 10;

    pub const ALL: [NumberPartType; Self::COUNT] = [
        NumberPartType::Integer,
        NumberPartType::Fraction,
        NumberPartType::Group,
        NumberPartType::Decimal,
        NumberPartType::Currency,
        NumberPartType::Percent,
        NumberPartType::Sign,
        NumberPartType::Prefix,
        NumberPartType::Suffix,
        NumberPartType::Literal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            NumberPartType::Integer => "integer",
            NumberPartType::Fraction => "fraction",
            NumberPartType::Group => "group",
            NumberPartType::Decimal => "decimal",
            NumberPartType::Currency => "currency",
            NumberPartType::Percent => "percent",
            NumberPartType::Sign => "sign",
            NumberPartType::Prefix => "prefix",
            NumberPartType::Suffix => "suffix",
            NumberPartType::Literal => "literal",
        }
    }

    /// True for the two types a [`DigitPart`] may carry.
    #[inline]
    pub const fn is_digit(self) -> bool {
        matches!(self, NumberPartType::Integer | NumberPartType::Fraction)
    }

    /// Dense index, used for per-type counters.
    #[inline]
    pub(crate) const fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NumberPartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberPartType {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumberPartType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(FlowError::InvalidPartType)
    }
}

// ============================================================================
// Part Key
// ============================================================================

/// Identity of a rendered character across updates.
///
/// A key is the part type plus the occurrence index of that type inside one
/// snapshot. Renders as `type:index`, e.g. `integer:0` or `group:1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberPartKey {
    kind: NumberPartType,
    index: u32,
}

impl NumberPartKey {
    #[inline]
    pub const fn new(kind: NumberPartType, index: u32) -> Self {
        Self { kind, index }
    }

    #[inline]
    pub const fn kind(&self) -> NumberPartType {
        self.kind
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for NumberPartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.index)
    }
}

impl FromStr for NumberPartKey {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, index) = s.split_once(':').ok_or(FlowError::InvalidKey)?;
        let kind = kind.parse::<NumberPartType>()?;
        let index = index.parse::<u32>().map_err(|_| FlowError::InvalidKey)?;
        Ok(Self::new(kind, index))
    }
}

// ============================================================================
// Digit and Symbol Parts
// ============================================================================

/// A single digit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DigitPart {
    kind: NumberPartType,
    value: u8,
    position: i32,
    key: NumberPartKey,
}

impl DigitPart {
    /// Create a digit part, checking the value and type.
    ///
    /// # Errors
    /// - `InvalidDigit` if `value > 9`
    /// - `InvalidPartType` if `kind` is not `Integer` or `Fraction`
    pub fn try_new(
        kind: NumberPartType,
        value: u8,
        position: i32,
        key: NumberPartKey,
    ) -> FlowResult<Self> {
        if value > 9 {
            return Err(FlowError::InvalidDigit(value));
        }
        if !kind.is_digit() {
            return Err(FlowError::InvalidPartType);
        }
        Ok(Self {
            kind,
            value,
            position,
            key,
        })
    }

    /// Create a digit part.
    ///
    /// # Panics
    /// Panics if `value > 9` or `kind` is not a digit type.
    pub fn new(kind: NumberPartType, value: u8, position: i32, key: NumberPartKey) -> Self {
        match Self::try_new(kind, value, position, key) {
            Ok(part) => part,
            Err(err) => panic!("DigitPart contract violated: {}", err),
        }
    }

    #[inline]
    pub const fn kind(&self) -> NumberPartType {
        self.kind
    }

    #[inline]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Offset from the decimal point: ones place is 0, first decimal place is -1.
    #[inline]
    pub const fn position(&self) -> i32 {
        self.position
    }

    #[inline]
    pub const fn key(&self) -> NumberPartKey {
        self.key
    }
}

/// A non-digit cell: separator, sign, currency symbol or free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolPart {
    kind: NumberPartType,
    value: String,
    key: NumberPartKey,
}

impl SymbolPart {
    pub fn new(kind: NumberPartType, value: impl Into<String>, key: NumberPartKey) -> Self {
        Self {
            kind,
            value: value.into(),
            key,
        }
    }

    #[inline]
    pub const fn kind(&self) -> NumberPartType {
        self.kind
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub const fn key(&self) -> NumberPartKey {
        self.key
    }
}

/// One renderable atom of a formatted number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumberPart {
    Digit(DigitPart),
    Symbol(SymbolPart),
}

impl NumberPart {
    #[inline]
    pub fn key(&self) -> NumberPartKey {
        match self {
            NumberPart::Digit(digit) => digit.key(),
            NumberPart::Symbol(symbol) => symbol.key(),
        }
    }

    #[inline]
    pub fn kind(&self) -> NumberPartType {
        match self {
            NumberPart::Digit(digit) => digit.kind(),
            NumberPart::Symbol(symbol) => symbol.kind(),
        }
    }

    #[inline]
    pub fn as_digit(&self) -> Option<&DigitPart> {
        match self {
            NumberPart::Digit(digit) => Some(digit),
            NumberPart::Symbol(_) => None,
        }
    }

    #[inline]
    pub fn as_symbol(&self) -> Option<&SymbolPart> {
        match self {
            NumberPart::Digit(_) => None,
            NumberPart::Symbol(symbol) => Some(symbol),
        }
    }

    /// Text this part displays when settled.
    pub fn text(&self) -> String {
        match self {
            NumberPart::Digit(digit) => digit.value().to_string(),
            NumberPart::Symbol(symbol) => symbol.value().to_string(),
        }
    }
}

impl From<DigitPart> for NumberPart {
    fn from(digit: DigitPart) -> Self {
        NumberPart::Digit(digit)
    }
}

impl From<SymbolPart> for NumberPart {
    fn from(symbol: SymbolPart) -> Self {
        NumberPart::Symbol(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display_and_parse() {
        let key = NumberPartKey::new(NumberPartType::Group, 2);
        assert_eq!(key.to_string(), "group:2");
        assert_eq!("group:2".parse::<NumberPartKey>().unwrap(), key);
        assert_eq!(
            "fraction:0".parse::<NumberPartKey>().unwrap(),
            NumberPartKey::new(NumberPartType::Fraction, 0)
        );
    }

    #[test]
    fn test_key_parse_invalid() {
        assert_eq!("integer".parse::<NumberPartKey>(), Err(FlowError::InvalidKey));
        assert_eq!("integer:x".parse::<NumberPartKey>(), Err(FlowError::InvalidKey));
        assert_eq!(
            "digit:1".parse::<NumberPartKey>(),
            Err(FlowError::InvalidPartType)
        );
    }

    #[test]
    fn test_digit_part_validation() {
        let key = NumberPartKey::new(NumberPartType::Integer, 0);
        assert!(DigitPart::try_new(NumberPartType::Integer, 9, 0, key).is_ok());
        assert_eq!(
            DigitPart::try_new(NumberPartType::Integer, 10, 0, key),
            Err(FlowError::InvalidDigit(10))
        );
        assert_eq!(
            DigitPart::try_new(NumberPartType::Group, 1, 0, key),
            Err(FlowError::InvalidPartType)
        );
    }

    #[test]
    #[should_panic(expected = "DigitPart contract violated")]
    fn test_digit_part_new_panics_on_bad_value() {
        let key = NumberPartKey::new(NumberPartType::Fraction, 0);
        let _ = DigitPart::new(NumberPartType::Fraction, 11, -1, key);
    }

    #[test]
    fn test_part_accessors() {
        let key = NumberPartKey::new(NumberPartType::Decimal, 0);
        let part = NumberPart::from(SymbolPart::new(NumberPartType::Decimal, ".", key));
        assert_eq!(part.key(), key);
        assert_eq!(part.kind(), NumberPartType::Decimal);
        assert!(part.as_digit().is_none());
        assert_eq!(part.text(), ".");
    }
}
