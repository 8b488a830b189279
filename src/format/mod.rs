// ============================================================================
// Format Module
// Value-to-parts decomposition and the built-in formatter
// ============================================================================
//
// This module provides:
// - decompose / decompose_with: value + format -> NumberFlowData
// - StandardFormatter: locale-table formatting backed by rust_decimal
//
// Design principles:
// - Decomposition never fails (plain fallback on formatter errors)
// - Output is deterministic for identical inputs
// - Digit keys follow their distance from the decimal point

mod decomposer;
mod standard_formatter;

pub use decomposer::{decompose, decompose_formatted, decompose_with};
pub use standard_formatter::StandardFormatter;
