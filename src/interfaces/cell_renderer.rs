// ============================================================================
// Cell Renderer Interface
// Declarative per-cell instructions for the rendering/animation runtime
// ============================================================================

use crate::domain::{AnimationCurve, NumberPart, NumberPartKey};
use std::collections::HashMap;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Laid-out rectangle of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellFrame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A frame with no height has never been laid out.
    pub fn has_extent(&self) -> bool {
        self.height > 0.0
    }
}

/// Instructions issued to the renderer, one cell at a time
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RenderInstruction {
    /// Create a cell for `part` at `index` in the row
    Present {
        key: NumberPartKey,
        part: NumberPart,
        index: usize,
    },

    /// Remove a cell, optionally fading it out first
    Dismiss {
        key: NumberPartKey,
        fade: Option<Duration>,
    },

    /// Animate a digit strip to an absolute index
    RollDigit {
        key: NumberPartKey,
        target_index: i32,
        duration: Duration,
        curve: AnimationCurve,
    },

    /// Move a digit strip to an index without animation
    JumpDigit { key: NumberPartKey, index: i32 },

    /// Offset a cell by `(dx, dy)` then animate it back to its layout position
    TranslateThenSettle {
        key: NumberPartKey,
        dx: f64,
        dy: f64,
        duration: Duration,
        curve: AnimationCurve,
    },

    /// Fade a freshly presented cell in
    FadeIn {
        key: NumberPartKey,
        duration: Duration,
    },

    /// Move a cell to `index` in the row
    Reorder { key: NumberPartKey, index: usize },
}

impl RenderInstruction {
    pub fn key(&self) -> NumberPartKey {
        match self {
            RenderInstruction::Present { key, .. }
            | RenderInstruction::Dismiss { key, .. }
            | RenderInstruction::RollDigit { key, .. }
            | RenderInstruction::JumpDigit { key, .. }
            | RenderInstruction::TranslateThenSettle { key, .. }
            | RenderInstruction::FadeIn { key, .. }
            | RenderInstruction::Reorder { key, .. } => *key,
        }
    }
}

/// Rendering runtime that executes instructions and reports layout.
pub trait CellRenderer {
    /// Execute one instruction
    fn apply(&mut self, instruction: RenderInstruction);

    /// Batch instruction handler (optional optimization)
    fn apply_all(&mut self, instructions: Vec<RenderInstruction>) {
        for instruction in instructions {
            self.apply(instruction);
        }
    }

    /// Resolve layout after structural changes
    fn layout(&mut self) {}

    /// Current laid-out frame of a cell
    fn frame(&self, _key: NumberPartKey) -> Option<CellFrame> {
        None
    }

    /// Visual strip index of a digit cell whose roll is in flight
    fn digit_position(&self, _key: NumberPartKey) -> Option<f64> {
        None
    }
}

/// Renderer that ignores every instruction
pub struct NoOpRenderer;

impl CellRenderer for NoOpRenderer {
    fn apply(&mut self, _instruction: RenderInstruction) {
        // Do nothing
    }
}

/// Logging renderer
pub struct LoggingRenderer;

impl CellRenderer for LoggingRenderer {
    fn apply(&mut self, instruction: RenderInstruction) {
        tracing::debug!("Number flow instruction: {:?}", instruction);
    }
}

// ============================================================================
// Recording Renderer
// ============================================================================

/// In-memory renderer that records instructions and lays cells out in a row
/// of equal-width cells.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    instructions: Vec<RenderInstruction>,
    order: Vec<NumberPartKey>,
    cell_width: f64,
    cell_height: f64,
    positions: HashMap<NumberPartKey, f64>,
}

impl RecordingRenderer {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            instructions: Vec::new(),
            order: Vec::new(),
            cell_width,
            cell_height,
            positions: HashMap::new(),
        }
    }

    /// Renderer whose cells never get a spatial extent.
    pub fn unlaid() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn instructions(&self) -> &[RenderInstruction] {
        &self.instructions
    }

    /// Drain recorded instructions, keeping the layout.
    pub fn take_instructions(&mut self) -> Vec<RenderInstruction> {
        std::mem::take(&mut self.instructions)
    }

    /// Keys in their current row order.
    pub fn order(&self) -> &[NumberPartKey] {
        &self.order
    }

    /// Pretend a digit roll is in flight at `position`.
    pub fn set_digit_position(&mut self, key: NumberPartKey, position: f64) {
        self.positions.insert(key, position);
    }

    fn place(&mut self, key: NumberPartKey, index: usize) {
        self.order.retain(|k| *k != key);
        let index = index.min(self.order.len());
        self.order.insert(index, key);
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new(10.0, 20.0)
    }
}

impl CellRenderer for RecordingRenderer {
    fn apply(&mut self, instruction: RenderInstruction) {
        match &instruction {
            RenderInstruction::Present { key, index, .. }
            | RenderInstruction::Reorder { key, index } => self.place(*key, *index),
            RenderInstruction::Dismiss { key, .. } => {
                self.order.retain(|k| k != key);
                self.positions.remove(key);
            },
            RenderInstruction::JumpDigit { key, .. } => {
                self.positions.remove(key);
            },
            _ => {},
        }
        self.instructions.push(instruction);
    }

    fn frame(&self, key: NumberPartKey) -> Option<CellFrame> {
        let index = self.order.iter().position(|k| *k == key)?;
        Some(CellFrame::new(
            index as f64 * self.cell_width,
            0.0,
            self.cell_width,
            self.cell_height,
        ))
    }

    fn digit_position(&self, key: NumberPartKey) -> Option<f64> {
        self.positions.get(&key).copied()
    }
}
