// ============================================================================
// Flow Errors
// Error types for formatting, part construction and configuration checks
// ============================================================================

use std::fmt;

/// Errors that can occur while formatting values or validating configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowError {
    /// Value is NaN or infinite
    NonFiniteValue,
    /// Value cannot be represented as a decimal for rounding
    ValueOutOfRange,
    /// Fraction digit bounds are unusable
    InvalidFractionDigits { min: u8, max: u8 },
    /// Currency code is not a three-letter ISO 4217 code
    InvalidCurrencyCode,
    /// Digit value outside 0-9
    InvalidDigit(u8),
    /// Part type does not fit the part variant
    InvalidPartType,
    /// Key string is not of the form `type:index`
    InvalidKey,
    /// Animation parameter is out of range
    InvalidAnimation(&'static str),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::NonFiniteValue => write!(f, "value is not finite"),
            FlowError::ValueOutOfRange => {
                write!(f, "value out of range: cannot be represented as a decimal")
            },
            FlowError::InvalidFractionDigits { min, max } => write!(
                f,
                "invalid fraction digits: min {} / max {} (limit {})",
                min,
                max,
                crate::domain::format::MAX_FRACTION_DIGITS
            ),
            FlowError::InvalidCurrencyCode => {
                write!(f, "invalid currency code: expected three ASCII letters")
            },
            FlowError::InvalidDigit(value) => write!(f, "digit value {} is not in 0-9", value),
            FlowError::InvalidPartType => write!(f, "part type does not match part kind"),
            FlowError::InvalidKey => write!(f, "invalid part key: expected `type:index`"),
            FlowError::InvalidAnimation(reason) => write!(f, "invalid animation: {}", reason),
        }
    }
}

impl std::error::Error for FlowError {}

/// Result type alias for fallible flow operations
pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(FlowError::NonFiniteValue.to_string(), "value is not finite");
        assert_eq!(
            FlowError::InvalidDigit(12).to_string(),
            "digit value 12 is not in 0-9"
        );
        assert_eq!(
            FlowError::InvalidAnimation("damping ratio must be in (0, 1]").to_string(),
            "invalid animation: damping ratio must be in (0, 1]"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(FlowError::InvalidKey, FlowError::InvalidKey);
        assert_ne!(
            FlowError::InvalidFractionDigits { min: 3, max: 1 },
            FlowError::InvalidFractionDigits { min: 1, max: 3 }
        );
    }
}
