// ============================================================================
// Trend
// Decides which way digits roll when a value changes
// ============================================================================

use std::fmt;
use std::sync::Arc;

/// Caller-supplied direction hint: `(previous, next) -> direction`.
pub type TrendFn = Arc<dyn Fn(f64, f64) -> i32 + Send + Sync>;

/// Roll direction policy.
///
/// `Custom` values never compare equal, not even to themselves, so a
/// configuration holding one always counts as changed.
#[derive(Clone, Default)]
pub enum NumberFlowTrend {
    /// Follow the sign of `next - previous`
    #[default]
    Auto,
    /// Always roll upward
    Up,
    /// Always roll downward
    Down,
    /// Delegate to a caller function; the result is used as-is
    Custom(TrendFn),
}

impl NumberFlowTrend {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> i32 + Send + Sync + 'static,
    {
        NumberFlowTrend::Custom(Arc::new(f))
    }

    /// Direction for a transition from `previous` to `next`.
    pub fn direction(&self, previous: f64, next: f64) -> i32 {
        match self {
            NumberFlowTrend::Auto => {
                let diff = next - previous;
                if diff > 0.0 {
                    1
                } else if diff < 0.0 {
                    -1
                } else {
                    0
                }
            },
            NumberFlowTrend::Up => 1,
            NumberFlowTrend::Down => -1,
            NumberFlowTrend::Custom(f) => f(previous, next),
        }
    }
}

impl PartialEq for NumberFlowTrend {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (NumberFlowTrend::Auto, NumberFlowTrend::Auto)
                | (NumberFlowTrend::Up, NumberFlowTrend::Up)
                | (NumberFlowTrend::Down, NumberFlowTrend::Down)
        )
    }
}

impl fmt::Debug for NumberFlowTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberFlowTrend::Auto => f.write_str("Auto"),
            NumberFlowTrend::Up => f.write_str("Up"),
            NumberFlowTrend::Down => f.write_str("Down"),
            NumberFlowTrend::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
