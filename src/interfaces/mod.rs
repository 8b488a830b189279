// ============================================================================
// Interfaces Module
// Contracts for the formatting and rendering collaborators
// ============================================================================

mod cell_renderer;
mod number_formatter;

pub use cell_renderer::{
    CellFrame, CellRenderer, LoggingRenderer, NoOpRenderer, RecordingRenderer, RenderInstruction,
};
pub use number_formatter::{FormattedNumber, NumberFormatter};
