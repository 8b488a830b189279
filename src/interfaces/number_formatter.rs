// ============================================================================
// Number Formatter Interface
// Contract for the locale-aware formatting capability
// ============================================================================

use crate::domain::{FlowResult, NumberFlowFormat};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output of a formatting call: the text plus the separators that were used.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormattedNumber {
    pub text: String,
    pub decimal_separator: String,
    pub grouping_separator: String,
}

impl FormattedNumber {
    pub fn new(
        text: impl Into<String>,
        decimal_separator: impl Into<String>,
        grouping_separator: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            decimal_separator: decimal_separator.into(),
            grouping_separator: grouping_separator.into(),
        }
    }

    /// Unlocalized rendering of `value` with `.` and `,` separators.
    pub fn plain(value: f64) -> Self {
        Self::new(value.to_string(), ".", ",")
    }

    pub fn has_digits(&self) -> bool {
        self.text.chars().any(|c| c.is_ascii_digit())
    }
}

/// Formatting capability used by the decomposer.
/// Implementations must be pure: equal inputs give equal outputs.
pub trait NumberFormatter: Send + Sync {
    /// Format `value` according to `format`.
    ///
    /// # Errors
    /// Implementations return an error when they cannot produce text for the
    /// value; the decomposer then falls back to [`FormattedNumber::plain`].
    fn format(&self, value: f64, format: &NumberFlowFormat) -> FlowResult<FormattedNumber>;

    /// Formatter name for logging
    fn name(&self) -> &str;
}
