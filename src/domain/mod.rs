// ============================================================================
// Domain Models Module
// Parts, snapshots and the configuration that shapes them
// ============================================================================

pub mod animation;
pub mod data;
pub mod errors;
pub mod format;
pub mod locale;
pub mod part;
pub mod trend;

pub use animation::{AnimationCurve, NumberFlowAnimation, TimingCurve};
pub use data::NumberFlowData;
pub use errors::{FlowError, FlowResult};
pub use format::{NumberFlowFormat, NumberStyle, MAX_FRACTION_DIGITS};
pub use locale::{Locale, LocaleSymbols, SymbolPlacement};
pub use part::{DigitPart, NumberPart, NumberPartKey, NumberPartType, SymbolPart};
pub use trend::{NumberFlowTrend, TrendFn};
