// ============================================================================
// Number Flow
// View-model driving a renderer from successive values
// ============================================================================

use super::digit_cycle::{DigitCycle, RollContext, RollPlan};
use super::reconciler::{reconcile, ReconcileDiff};
use crate::domain::{
    NumberFlowAnimation, NumberFlowData, NumberFlowFormat, NumberFlowTrend, NumberPart,
    NumberPartKey,
};
use crate::format::{decompose_with, StandardFormatter};
use crate::interfaces::{CellFrame, CellRenderer, NumberFormatter, RenderInstruction};
use std::collections::HashMap;
use std::time::Duration;

/// Frames closer than this are treated as unmoved.
const MOVE_EPSILON: f64 = 0.1;

/// Live state of one rendered cell.
#[derive(Debug, Clone)]
struct Cell {
    part: NumberPart,
    /// Strip state, digit cells only
    digit: Option<DigitCycle>,
}

impl Cell {
    fn new(part: NumberPart) -> Self {
        let digit = part.as_digit().map(|d| DigitCycle::new(d.value()));
        Self { part, digit }
    }
}

/// Owns the current snapshot and per-cell roll state, and turns value
/// changes into renderer instructions.
///
/// All calls are synchronous. A new value finishes any in-flight roll it
/// touches in place before planning the next one.
pub struct NumberFlow<F: NumberFormatter = StandardFormatter> {
    formatter: F,
    format: NumberFlowFormat,
    animation: NumberFlowAnimation,
    trend: NumberFlowTrend,
    reduced_motion: bool,
    data: NumberFlowData,
    cells: HashMap<NumberPartKey, Cell>,
}

impl NumberFlow<StandardFormatter> {
    /// Create a flow showing `value` with the built-in formatter.
    pub fn new(value: f64, format: NumberFlowFormat) -> Self {
        Self::with_formatter(StandardFormatter, value, format)
    }
}

impl<F: NumberFormatter> NumberFlow<F> {
    pub fn with_formatter(formatter: F, value: f64, format: NumberFlowFormat) -> Self {
        let data = decompose_with(&formatter, value, &format);
        let cells = data
            .all_parts()
            .map(|part| (part.key(), Cell::new(part.clone())))
            .collect();

        Self {
            formatter,
            format,
            animation: NumberFlowAnimation::default(),
            trend: NumberFlowTrend::default(),
            reduced_motion: false,
            data,
            cells,
        }
    }

    /// Builder method: Set animation configuration
    pub fn with_animation(mut self, animation: NumberFlowAnimation) -> Self {
        self.animation = animation;
        self
    }

    /// Builder method: Set trend
    pub fn with_trend(mut self, trend: NumberFlowTrend) -> Self {
        self.trend = trend;
        self
    }

    pub fn data(&self) -> &NumberFlowData {
        &self.data
    }

    pub fn format(&self) -> &NumberFlowFormat {
        &self.format
    }

    pub fn animation(&self) -> &NumberFlowAnimation {
        &self.animation
    }

    pub fn trend(&self) -> &NumberFlowTrend {
        &self.trend
    }

    /// Text a screen reader should announce.
    pub fn accessibility_label(&self) -> &str {
        &self.data.value_as_string
    }

    pub fn digit_cell(&self, key: NumberPartKey) -> Option<&DigitCycle> {
        self.cells.get(&key).and_then(|cell| cell.digit.as_ref())
    }

    pub fn set_animation(&mut self, animation: NumberFlowAnimation) {
        self.animation = animation;
    }

    pub fn set_trend(&mut self, trend: NumberFlowTrend) {
        self.trend = trend;
    }

    /// Mirror the platform's reduced-motion preference.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    pub fn should_animate(&self) -> bool {
        self.animation.should_animate(self.reduced_motion)
    }

    /// Present every part of the current snapshot.
    pub fn mount<R: CellRenderer + ?Sized>(&mut self, renderer: &mut R) {
        for (index, part) in self.data.all_parts().enumerate() {
            let key = part.key();
            renderer.apply(RenderInstruction::Present {
                key,
                part: part.clone(),
                index,
            });
            if let Some(cycle) = self.cells.get(&key).and_then(|cell| cell.digit.as_ref()) {
                renderer.apply(RenderInstruction::JumpDigit {
                    key,
                    index: cycle.current_index(),
                });
            }
        }
        renderer.layout();
    }

    /// Show a new value.
    pub fn set_value<R: CellRenderer + ?Sized>(
        &mut self,
        value: f64,
        now: Duration,
        renderer: &mut R,
    ) -> ReconcileDiff {
        let next = decompose_with(&self.formatter, value, &self.format);
        self.update(next, now, renderer)
    }

    /// Reformat the current value with a new format.
    pub fn set_format<R: CellRenderer + ?Sized>(
        &mut self,
        format: NumberFlowFormat,
        now: Duration,
        renderer: &mut R,
    ) -> ReconcileDiff {
        self.format = format;
        let value = self.data.numeric_value;
        self.set_value(value, now, renderer)
    }

    /// Transition from the current snapshot to `next`.
    pub fn update<R: CellRenderer + ?Sized>(
        &mut self,
        next: NumberFlowData,
        now: Duration,
        renderer: &mut R,
    ) -> ReconcileDiff {
        let animate = self.should_animate();
        let diff = reconcile(&self.data, &next, &self.trend);

        let initial_frames: HashMap<NumberPartKey, CellFrame> = if animate {
            self.cells
                .keys()
                .filter_map(|key| renderer.frame(*key).map(|frame| (*key, frame)))
                .collect()
        } else {
            HashMap::new()
        };

        let target_index: HashMap<NumberPartKey, usize> = diff
            .final_order
            .iter()
            .enumerate()
            .map(|(index, key)| (*key, index))
            .collect();

        // Row as the renderer sees it, kept in step with every instruction
        let mut row: Vec<NumberPartKey> = diff.previous_order.clone();

        self.dismiss_removed(&diff, animate, &mut row, renderer);
        self.replace_changed_symbols(&next, &target_index, &mut row, renderer);
        self.present_added(&diff, &target_index, &mut row, renderer);
        self.roll_digits(&diff, animate, now, renderer);

        for part in next.all_parts() {
            if let Some(cell) = self.cells.get_mut(&part.key()) {
                cell.part = part.clone();
            }
        }

        for (index, key) in diff.final_order.iter().enumerate() {
            if row.get(index) != Some(key) {
                row.retain(|k| k != key);
                row.insert(index.min(row.len()), *key);
                renderer.apply(RenderInstruction::Reorder { key: *key, index });
            }
        }

        renderer.layout();

        if animate {
            self.animate_positions(&diff, &initial_frames, renderer);
        }

        tracing::debug!(
            value = next.numeric_value,
            formatted = %next.value_as_string,
            animate,
            "number flow updated"
        );
        self.data = next;
        diff
    }

    /// The renderer finished the roll on `key`; recenter its strip.
    pub fn roll_finished<R: CellRenderer + ?Sized>(&mut self, key: NumberPartKey, renderer: &mut R) {
        let Some(cycle) = self.cells.get_mut(&key).and_then(|cell| cell.digit.as_mut()) else {
            return;
        };
        let index = cycle.settle();
        renderer.apply(RenderInstruction::JumpDigit { key, index });
    }

    fn dismiss_removed<R: CellRenderer + ?Sized>(
        &mut self,
        diff: &ReconcileDiff,
        animate: bool,
        row: &mut Vec<NumberPartKey>,
        renderer: &mut R,
    ) {
        let fade = animate.then_some(self.animation.opacity_duration);
        for key in &diff.removed {
            self.cells.remove(key);
            row.retain(|k| k != key);
            renderer.apply(RenderInstruction::Dismiss { key: *key, fade });
        }
    }

    /// A persisting symbol key may carry different text (e.g. a currency
    /// symbol after a format change); its cell is rebuilt in place.
    fn replace_changed_symbols<R: CellRenderer + ?Sized>(
        &mut self,
        next: &NumberFlowData,
        target_index: &HashMap<NumberPartKey, usize>,
        row: &mut Vec<NumberPartKey>,
        renderer: &mut R,
    ) {
        for part in next.all_parts() {
            let NumberPart::Symbol(symbol) = part else {
                continue;
            };
            let key = symbol.key();
            let Some(cell) = self.cells.get_mut(&key) else {
                continue;
            };
            if cell.part == *part {
                continue;
            }

            *cell = Cell::new(part.clone());
            let index = target_index.get(&key).copied().unwrap_or(row.len());
            row.retain(|k| *k != key);
            row.insert(index.min(row.len()), key);
            renderer.apply(RenderInstruction::Dismiss { key, fade: None });
            renderer.apply(RenderInstruction::Present {
                key,
                part: part.clone(),
                index,
            });
        }
    }

    fn present_added<R: CellRenderer + ?Sized>(
        &mut self,
        diff: &ReconcileDiff,
        target_index: &HashMap<NumberPartKey, usize>,
        row: &mut Vec<NumberPartKey>,
        renderer: &mut R,
    ) {
        for (key, part) in &diff.added {
            let index = target_index.get(key).copied().unwrap_or(row.len());
            let cell = Cell::new(part.clone());
            let strip_index = cell.digit.as_ref().map(DigitCycle::current_index);
            self.cells.insert(*key, cell);

            row.insert(index.min(row.len()), *key);
            renderer.apply(RenderInstruction::Present {
                key: *key,
                part: part.clone(),
                index,
            });
            if let Some(strip_index) = strip_index {
                renderer.apply(RenderInstruction::JumpDigit {
                    key: *key,
                    index: strip_index,
                });
            }
        }
    }

    fn roll_digits<R: CellRenderer + ?Sized>(
        &mut self,
        diff: &ReconcileDiff,
        animate: bool,
        now: Duration,
        renderer: &mut R,
    ) {
        let duration = self.animation.effective_spin_duration();
        let curve = self.animation.spin_curve();

        for update in &diff.updated {
            let key = update.key;
            let Some(cycle) = self.cells.get_mut(&key).and_then(|cell| cell.digit.as_mut()) else {
                continue;
            };

            let ctx = RollContext {
                laid_out: renderer.frame(key).is_some_and(|frame| frame.has_extent()),
                animate,
                now,
                duration,
                visual_position: renderer.digit_position(key),
            };

            match cycle.request(update.new, update.direction, ctx) {
                RollPlan::Unchanged => {},
                RollPlan::Jump { index } => {
                    renderer.apply(RenderInstruction::JumpDigit { key, index });
                },
                RollPlan::Roll { from, target } => {
                    renderer.apply(RenderInstruction::JumpDigit { key, index: from });
                    renderer.apply(RenderInstruction::RollDigit {
                        key,
                        target_index: target,
                        duration,
                        curve,
                    });
                },
            }
        }
    }

    /// Glide moved cells from their old offset and slide added cells in.
    fn animate_positions<R: CellRenderer + ?Sized>(
        &self,
        diff: &ReconcileDiff,
        initial_frames: &HashMap<NumberPartKey, CellFrame>,
        renderer: &mut R,
    ) {
        let duration = self.animation.transform_duration;
        let curve = self.animation.transform_curve();

        for key in &diff.final_order {
            let Some(frame) = renderer.frame(*key) else {
                continue;
            };

            if let Some(initial) = initial_frames.get(key) {
                let dx = initial.x - frame.x;
                let dy = initial.y - frame.y;
                if dx.abs() > MOVE_EPSILON || dy.abs() > MOVE_EPSILON {
                    renderer.apply(RenderInstruction::TranslateThenSettle {
                        key: *key,
                        dx,
                        dy,
                        duration,
                        curve,
                    });
                }
            } else if diff.is_added(*key) {
                let dy = -f64::from(diff.direction.signum()) * frame.height;
                renderer.apply(RenderInstruction::TranslateThenSettle {
                    key: *key,
                    dx: 0.0,
                    dy,
                    duration,
                    curve,
                });
                renderer.apply(RenderInstruction::FadeIn {
                    key: *key,
                    duration: self.animation.opacity_duration,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NumberPartType, NumberStyle};
    use crate::interfaces::RecordingRenderer;

    fn key(kind: NumberPartType, index: u32) -> NumberPartKey {
        NumberPartKey::new(kind, index)
    }

    fn mounted(value: f64) -> (NumberFlow, RecordingRenderer) {
        let mut flow = NumberFlow::new(value, NumberFlowFormat::default());
        let mut renderer = RecordingRenderer::default();
        flow.mount(&mut renderer);
        renderer.take_instructions();
        (flow, renderer)
    }

    #[test]
    fn test_mount_presents_every_part() {
        let mut flow = NumberFlow::new(1234.5, NumberFlowFormat::default());
        let mut renderer = RecordingRenderer::default();
        flow.mount(&mut renderer);

        assert_eq!(renderer.order(), flow.data().keys().as_slice());
        let jumps = renderer
            .instructions()
            .iter()
            .filter(|i| matches!(i, RenderInstruction::JumpDigit { .. }))
            .count();
        assert_eq!(jumps, 5);
        assert_eq!(flow.accessibility_label(), "1,234.5");
    }

    #[test]
    fn test_ninety_nine_to_one_hundred_instructions() {
        let (mut flow, mut renderer) = mounted(99.0);
        let diff = flow.set_value(100.0, Duration::ZERO, &mut renderer);
        assert_eq!(diff.updated.len(), 2);

        let ones = key(NumberPartType::Integer, 0);
        let hundreds = key(NumberPartType::Integer, 2);
        let instructions = renderer.instructions();

        assert!(instructions.contains(&RenderInstruction::RollDigit {
            key: ones,
            target_index: 20,
            duration: Duration::from_millis(900),
            curve: flow.animation().spin_curve(),
        }));
        assert!(instructions
            .iter()
            .any(|i| matches!(i, RenderInstruction::Present { key, index: 0, .. } if *key == hundreds)));
        assert!(instructions.iter().any(
            |i| matches!(i, RenderInstruction::TranslateThenSettle { key, dy, .. } if *key == hundreds && *dy == -20.0)
        ));
        assert!(instructions
            .iter()
            .any(|i| matches!(i, RenderInstruction::FadeIn { key, .. } if *key == hundreds)));

        // Old digits shifted one cell right; they glide from the left
        assert!(instructions.iter().any(
            |i| matches!(i, RenderInstruction::TranslateThenSettle { key, dx, .. } if *key == ones && *dx == -10.0)
        ));
        assert_eq!(renderer.order(), flow.data().keys().as_slice());
        assert_eq!(
            flow.digit_cell(ones).map(DigitCycle::is_rolling),
            Some(true)
        );
    }

    #[test]
    fn test_roll_finished_recenters() {
        let (mut flow, mut renderer) = mounted(9.0);
        flow.set_value(10.0, Duration::ZERO, &mut renderer);
        renderer.take_instructions();

        let ones = key(NumberPartType::Integer, 0);
        flow.roll_finished(ones, &mut renderer);
        assert_eq!(
            renderer.instructions(),
            &[RenderInstruction::JumpDigit {
                key: ones,
                index: 10
            }]
        );
        assert_eq!(flow.digit_cell(ones).map(DigitCycle::is_rolling), Some(false));
    }

    #[test]
    fn test_removed_cells_fade_out() {
        let (mut flow, mut renderer) = mounted(100.0);
        flow.set_value(99.0, Duration::ZERO, &mut renderer);

        let hundreds = key(NumberPartType::Integer, 2);
        assert!(renderer.instructions().contains(&RenderInstruction::Dismiss {
            key: hundreds,
            fade: Some(Duration::from_millis(450)),
        }));
        assert!(flow.digit_cell(hundreds).is_none());
        assert_eq!(renderer.order(), flow.data().keys().as_slice());
    }

    #[test]
    fn test_reduced_motion_jumps() {
        let (mut flow, mut renderer) = mounted(1.0);
        flow.set_reduced_motion(true);
        assert!(!flow.should_animate());

        flow.set_value(2.0, Duration::ZERO, &mut renderer);
        let ones = key(NumberPartType::Integer, 0);
        assert_eq!(
            renderer.instructions(),
            &[RenderInstruction::JumpDigit {
                key: ones,
                index: 12
            }]
        );
    }

    #[test]
    fn test_unlaid_renderer_jumps() {
        let mut flow = NumberFlow::new(3.0, NumberFlowFormat::default());
        let mut renderer = RecordingRenderer::unlaid();
        flow.mount(&mut renderer);
        renderer.take_instructions();

        flow.set_value(4.0, Duration::ZERO, &mut renderer);
        assert!(renderer
            .instructions()
            .iter()
            .all(|i| !matches!(i, RenderInstruction::RollDigit { .. })));
    }

    #[test]
    fn test_interrupted_roll_restarts_from_visual_position() {
        let (mut flow, mut renderer) = mounted(2.0);
        let ones = key(NumberPartType::Integer, 0);

        flow.set_value(8.0, Duration::ZERO, &mut renderer);
        renderer.set_digit_position(ones, 14.6);
        renderer.take_instructions();

        flow.set_value(9.0, Duration::from_millis(100), &mut renderer);
        assert_eq!(
            renderer.instructions()[..2],
            [
                RenderInstruction::JumpDigit {
                    key: ones,
                    index: 15
                },
                RenderInstruction::RollDigit {
                    key: ones,
                    target_index: 19,
                    duration: Duration::from_millis(900),
                    curve: flow.animation().spin_curve(),
                },
            ]
        );
    }

    #[test]
    fn test_interrupted_roll_without_reported_position() {
        let (mut flow, mut renderer) = mounted(2.0);
        let ones = key(NumberPartType::Integer, 0);

        flow.set_value(8.0, Duration::ZERO, &mut renderer);
        renderer.take_instructions();

        // The 900ms roll to 8 is over but was never reported finished
        flow.set_value(9.0, Duration::from_secs(5), &mut renderer);
        assert_eq!(
            renderer.instructions()[..2],
            [
                RenderInstruction::JumpDigit {
                    key: ones,
                    index: 18
                },
                RenderInstruction::RollDigit {
                    key: ones,
                    target_index: 19,
                    duration: Duration::from_millis(900),
                    curve: flow.animation().spin_curve(),
                },
            ]
        );
    }

    #[test]
    fn test_custom_trend_only_hints_sign() {
        let (flow, mut renderer) = mounted(5.0);
        let mut flow = flow.with_trend(NumberFlowTrend::custom(|_, _| -40));
        flow.set_value(15.0, Duration::ZERO, &mut renderer);

        let tens = key(NumberPartType::Integer, 1);
        assert!(renderer.instructions().iter().any(
            |i| matches!(i, RenderInstruction::TranslateThenSettle { key, dy, .. } if *key == tens && *dy == 20.0)
        ));
    }

    #[test]
    fn test_format_change_rebuilds_changed_symbols() {
        let mut flow = NumberFlow::new(5.0, NumberFlowFormat::currency("USD"));
        let mut renderer = RecordingRenderer::default();
        flow.mount(&mut renderer);
        renderer.take_instructions();

        flow.set_format(NumberFlowFormat::currency("GBP"), Duration::ZERO, &mut renderer);
        let symbol = key(NumberPartType::Prefix, 0);
        assert!(renderer
            .instructions()
            .iter()
            .any(|i| matches!(i, RenderInstruction::Present { key, part, .. } if *key == symbol && part.text() == "£")));
        assert_eq!(flow.data().rendered_text(), "£5.00");
        assert_eq!(renderer.order(), flow.data().keys().as_slice());
    }

    #[test]
    fn test_same_value_is_silent() {
        let (mut flow, mut renderer) = mounted(42.0);
        let diff = flow.set_value(42.0, Duration::ZERO, &mut renderer);
        assert!(diff.is_empty());
        assert!(renderer.instructions().is_empty());
    }

    #[test]
    fn test_style_switch_to_percent() {
        let (mut flow, mut renderer) = mounted(0.5);
        let format = NumberFlowFormat::default().with_style(NumberStyle::Percent);
        flow.set_format(format, Duration::ZERO, &mut renderer);
        assert_eq!(flow.data().rendered_text(), "50%");
        assert_eq!(renderer.order(), flow.data().keys().as_slice());
    }
}
