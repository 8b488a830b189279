// ============================================================================
// Engine Module
// Reconciliation, digit roll model and the flow driver
// ============================================================================

mod digit_cycle;
mod flow;
mod reconciler;

pub use digit_cycle::{
    compute_delta, DigitCycle, RollContext, RollPlan, RollState, DEFAULT_CYCLES, DIGITS_PER_CYCLE,
};
pub use flow::NumberFlow;
pub use reconciler::{reconcile, DigitUpdate, PartMove, ReconcileDiff};
