// ============================================================================
// Number Flow Library
// Keyed number decomposition, reconciliation and odometer digit rolls
// ============================================================================

//! # Number Flow
//!
//! Turns numeric values into stable, keyed parts and computes the minimal
//! set of per-cell instructions that animate one value into the next.
//!
//! ## Features
//!
//! - **Keyed decomposition** of formatted numbers into digits and symbols
//! - **Locale-aware formatting** backed by `rust_decimal`
//! - **Keyed reconciliation** producing added, removed and rolled parts
//! - **Odometer digit model** with trend-controlled roll direction
//! - **Renderer-agnostic driver** emitting declarative instructions
//!
//! ## Example
//!
//! ```rust
//! use number_flow::prelude::*;
//! use std::time::Duration;
//!
//! let mut flow = NumberFlow::new(99.0, NumberFlowFormat::default());
//! let mut renderer = RecordingRenderer::default();
//! flow.mount(&mut renderer);
//!
//! let diff = flow.set_value(100.0, Duration::ZERO, &mut renderer);
//! assert_eq!(diff.added.len(), 1);
//! assert_eq!(diff.updated.len(), 2);
//! assert_eq!(flow.data().rendered_text(), "100");
//! ```

pub mod domain;
pub mod engine;
pub mod format;
pub mod interfaces;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        AnimationCurve, FlowError, FlowResult, Locale, NumberFlowAnimation, NumberFlowData,
        NumberFlowFormat, NumberFlowTrend, NumberPart, NumberPartKey, NumberPartType,
        NumberStyle, TimingCurve,
    };
    pub use crate::engine::{
        compute_delta, reconcile, DigitCycle, DigitUpdate, NumberFlow, ReconcileDiff, RollPlan,
    };
    pub use crate::format::{decompose, decompose_with, StandardFormatter};
    pub use crate::interfaces::{
        CellRenderer, FormattedNumber, LoggingRenderer, NoOpRenderer, NumberFormatter,
        RecordingRenderer, RenderInstruction,
    };
}
