// ============================================================================
// Digit Cycle Model
// Odometer strip arithmetic and per-cell roll state
// ============================================================================
//
// A digit cell shows a window onto a vertical strip of 0..9 repeated
// `cycles` times. The cell rests in the middle cycle so a roll of up to nine
// steps fits in either direction without wrapping visually.

use std::time::Duration;

/// Digits on one cycle of the strip.
pub const DIGITS_PER_CYCLE: i32 = 10;

/// Strip cycles used by [`DigitCycle::new`].
pub const DEFAULT_CYCLES: i32 = 3;

/// Signed number of strip steps to move from one digit to another.
///
/// `raw_delta` is `new - old` in `-9..=9`. A positive `direction` forces a
/// forward roll, a negative one a backward roll, zero takes the shorter way
/// (ties of five go in the sign of `raw_delta`).
#[inline]
pub fn compute_delta(raw_delta: i32, direction: i32) -> i32 {
    if raw_delta == 0 {
        return 0;
    }

    if direction > 0 {
        if raw_delta >= 0 {
            raw_delta
        } else {
            raw_delta + DIGITS_PER_CYCLE
        }
    } else if direction < 0 {
        if raw_delta <= 0 {
            raw_delta
        } else {
            raw_delta - DIGITS_PER_CYCLE
        }
    } else if raw_delta.abs() <= DIGITS_PER_CYCLE / 2 {
        raw_delta
    } else {
        raw_delta - DIGITS_PER_CYCLE * raw_delta.signum()
    }
}

/// Animation state of one digit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollState {
    #[default]
    Idle,
    Rolling {
        from_index: i32,
        target_index: i32,
        /// Caller clock reading when the roll started
        started_at: Duration,
        duration: Duration,
    },
}

/// What the renderer should do with the strip after a digit change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollPlan {
    /// Strip already shows the digit
    Unchanged,
    /// Place the strip at `index` without animation
    Jump { index: i32 },
    /// Place the strip at `from` without animation, then animate to `target`
    Roll { from: i32, target: i32 },
}

/// Inputs describing the cell and its renderer at request time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollContext {
    /// Cell has a spatial extent
    pub laid_out: bool,
    /// Animations are enabled
    pub animate: bool,
    /// Caller clock reading
    pub now: Duration,
    /// Length of a roll started by this request
    pub duration: Duration,
    /// Visual strip index of an in-flight roll, if the renderer knows it
    pub visual_position: Option<f64>,
}

/// Cyclic strip position of one digit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitCycle {
    current_index: i32,
    digits_per_cycle: i32,
    cycles: i32,
    state: RollState,
}

impl DigitCycle {
    /// Cell resting on `digit` in the middle of a three-cycle strip.
    ///
    /// # Panics
    /// Panics if `digit > 9`.
    pub fn new(digit: u8) -> Self {
        Self::with_cycles(digit, DEFAULT_CYCLES)
    }

    /// # Panics
    /// Panics if `digit > 9` or `cycles < 3`.
    pub fn with_cycles(digit: u8, cycles: i32) -> Self {
        assert!(cycles >= 3, "digit strip needs at least 3 cycles, got {}", cycles);
        let mut cell = Self {
            current_index: 0,
            digits_per_cycle: DIGITS_PER_CYCLE,
            cycles,
            state: RollState::Idle,
        };
        cell.current_index = cell.middle_offset() + checked_digit(digit);
        cell
    }

    #[inline]
    pub fn current_index(&self) -> i32 {
        self.current_index
    }

    #[inline]
    pub fn current_digit(&self) -> u8 {
        self.current_index.rem_euclid(self.digits_per_cycle) as u8
    }

    #[inline]
    pub fn state(&self) -> RollState {
        self.state
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        matches!(self.state, RollState::Rolling { .. })
    }

    /// Number of cells on the whole strip.
    #[inline]
    pub fn total_count(&self) -> i32 {
        self.digits_per_cycle * self.cycles
    }

    /// Index of the first digit of the middle cycle.
    #[inline]
    pub fn middle_offset(&self) -> i32 {
        self.digits_per_cycle * (self.cycles / 2)
    }

    /// Reset the index to the middle cycle, keeping the digit.
    pub fn recenter(&mut self) -> i32 {
        self.current_index = self.middle_offset() + i32::from(self.current_digit());
        self.current_index
    }

    /// Stop an in-flight roll where it currently is and resync the index.
    ///
    /// Without a visual position the strip is assumed to have moved linearly
    /// from its start toward the target since `started_at`.
    pub fn finish_in_place(&mut self, visual_position: Option<f64>, now: Duration) {
        let RollState::Rolling {
            from_index,
            target_index,
            started_at,
            duration,
        } = self.state
        else {
            return;
        };

        let position = visual_position.unwrap_or_else(|| {
            let elapsed = now.saturating_sub(started_at);
            if duration.is_zero() || elapsed >= duration {
                f64::from(target_index)
            } else {
                let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
                f64::from(from_index) + f64::from(target_index - from_index) * progress
            }
        });

        let index = position.round() as i32;
        self.current_index = index.clamp(0, self.total_count() - 1);
        self.state = RollState::Idle;
    }

    /// Plan the strip movement for showing `digit`.
    ///
    /// # Panics
    /// Panics if `digit > 9`.
    pub fn request(&mut self, digit: u8, direction: i32, ctx: RollContext) -> RollPlan {
        let digit = checked_digit(digit);

        if !ctx.laid_out {
            self.state = RollState::Idle;
            self.current_index = self.middle_offset() + digit;
            return RollPlan::Jump {
                index: self.current_index,
            };
        }

        let was_rolling = self.is_rolling();
        self.finish_in_place(ctx.visual_position, ctx.now);

        if digit == i32::from(self.current_digit()) {
            if was_rolling {
                // Interrupted mid-roll: snap the strip to the digit it shows
                return RollPlan::Jump {
                    index: self.recenter(),
                };
            }
            return RollPlan::Unchanged;
        }

        let from = self.recenter();
        let raw_delta = digit - i32::from(self.current_digit());
        let target = from + compute_delta(raw_delta, direction);

        if !ctx.animate {
            self.current_index = self.middle_offset() + digit;
            return RollPlan::Jump {
                index: self.current_index,
            };
        }

        tracing::trace!(from, target, direction, "digit roll started");
        self.state = RollState::Rolling {
            from_index: from,
            target_index: target,
            started_at: ctx.now,
            duration: ctx.duration,
        };
        RollPlan::Roll { from, target }
    }

    /// Complete the in-flight roll at its target and recenter.
    ///
    /// Returns the recentered index the strip should jump to.
    pub fn settle(&mut self) -> i32 {
        if let RollState::Rolling { target_index, .. } = self.state {
            self.current_index = target_index;
            self.state = RollState::Idle;
            tracing::trace!(target_index, "digit roll settled");
        }
        self.recenter()
    }
}

fn checked_digit(digit: u8) -> i32 {
    assert!(digit <= 9, "digit value {} is not in 0-9", digit);
    i32::from(digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animated(now_ms: u64) -> RollContext {
        RollContext {
            laid_out: true,
            animate: true,
            now: Duration::from_millis(now_ms),
            duration: Duration::from_millis(900),
            visual_position: None,
        }
    }

    #[test]
    fn test_compute_delta_examples() {
        assert_eq!(compute_delta(-7, 1), 3);
        assert_eq!(compute_delta(7, -1), -3);
        assert_eq!(compute_delta(6, 0), -4);
        assert_eq!(compute_delta(4, 0), 4);
        assert_eq!(compute_delta(-6, 0), 4);
        assert_eq!(compute_delta(5, 0), 5);
        assert_eq!(compute_delta(-5, 0), -5);
        assert_eq!(compute_delta(0, 1), 0);
        assert_eq!(compute_delta(3, 1), 3);
        assert_eq!(compute_delta(-3, -1), -3);
        assert_eq!(compute_delta(9, 42), 9);
        assert_eq!(compute_delta(9, -42), -1);
    }

    #[test]
    fn test_new_cell_rests_in_middle_cycle() {
        let cell = DigitCycle::new(7);
        assert_eq!(cell.current_index(), 17);
        assert_eq!(cell.current_digit(), 7);
        assert_eq!(cell.total_count(), 30);
        assert_eq!(cell.state(), RollState::Idle);

        let wide = DigitCycle::with_cycles(2, 5);
        assert_eq!(wide.middle_offset(), 20);
        assert_eq!(wide.current_index(), 22);
    }

    #[test]
    fn test_roll_forward_wraps() {
        let mut cell = DigitCycle::new(9);
        let plan = cell.request(0, 1, animated(0));
        assert_eq!(plan, RollPlan::Roll { from: 19, target: 20 });
        assert_eq!(
            cell.state(),
            RollState::Rolling {
                from_index: 19,
                target_index: 20,
                started_at: Duration::ZERO,
                duration: Duration::from_millis(900),
            }
        );

        assert_eq!(cell.settle(), 10);
        assert_eq!(cell.current_digit(), 0);
        assert!(!cell.is_rolling());
    }

    #[test]
    fn test_roll_backward_wraps() {
        let mut cell = DigitCycle::new(1);
        let plan = cell.request(8, -1, animated(0));
        assert_eq!(plan, RollPlan::Roll { from: 11, target: 8 });
        assert_eq!(cell.settle(), 18);
    }

    #[test]
    fn test_same_digit_is_unchanged() {
        let mut cell = DigitCycle::new(4);
        assert_eq!(cell.request(4, 1, animated(0)), RollPlan::Unchanged);
    }

    #[test]
    fn test_interrupt_finishes_in_place() {
        let mut cell = DigitCycle::new(2);
        assert_eq!(
            cell.request(8, 1, animated(0)),
            RollPlan::Roll { from: 12, target: 18 }
        );

        // Halfway through, the strip shows 5; a new request for 9 starts there
        let ctx = RollContext {
            visual_position: Some(14.6),
            ..animated(100)
        };
        assert_eq!(cell.request(9, 1, ctx), RollPlan::Roll { from: 15, target: 19 });
        assert_eq!(
            cell.state(),
            RollState::Rolling {
                from_index: 15,
                target_index: 19,
                started_at: Duration::from_millis(100),
                duration: Duration::from_millis(900),
            }
        );
    }

    #[test]
    fn test_interrupt_on_requested_digit_snaps() {
        let mut cell = DigitCycle::new(0);
        cell.request(6, 1, animated(0));
        let ctx = RollContext {
            visual_position: Some(25.8),
            ..animated(50)
        };
        // Visual position rounds to 26 -> digit 6
        assert_eq!(cell.request(6, 1, ctx), RollPlan::Jump { index: 16 });
        assert!(!cell.is_rolling());
    }

    #[test]
    fn test_visual_position_is_clamped() {
        let mut cell = DigitCycle::new(0);
        cell.request(5, 1, animated(0));
        cell.finish_in_place(Some(99.0), Duration::ZERO);
        assert_eq!(cell.current_index(), 29);
        assert_eq!(cell.current_digit(), 9);
    }

    #[test]
    fn test_interrupt_without_position_uses_elapsed_time() {
        // Roll 2 -> 8 long finished: the strip already shows 8
        let mut cell = DigitCycle::new(2);
        cell.request(8, 1, animated(0));
        assert_eq!(
            cell.request(9, 1, animated(5000)),
            RollPlan::Roll { from: 18, target: 19 }
        );

        // Halfway through 2 -> 8 the strip shows 5
        let mut cell = DigitCycle::new(2);
        cell.request(8, 1, animated(0));
        assert_eq!(
            cell.request(9, 1, animated(450)),
            RollPlan::Roll { from: 15, target: 19 }
        );

        // Finished roll already on the requested digit: snap only
        let mut cell = DigitCycle::new(2);
        cell.request(8, 1, animated(0));
        assert_eq!(cell.request(8, 1, animated(900)), RollPlan::Jump { index: 18 });
    }

    #[test]
    fn test_finish_in_place_when_idle_keeps_index() {
        let mut cell = DigitCycle::new(4);
        cell.finish_in_place(None, Duration::from_secs(10));
        assert_eq!(cell.current_index(), 14);
    }

    #[test]
    fn test_unlaid_cell_jumps() {
        let mut cell = DigitCycle::new(3);
        let ctx = RollContext {
            laid_out: false,
            ..animated(0)
        };
        assert_eq!(cell.request(7, 1, ctx), RollPlan::Jump { index: 17 });
        assert_eq!(cell.state(), RollState::Idle);
    }

    #[test]
    fn test_disabled_animation_jumps() {
        let mut cell = DigitCycle::new(3);
        let ctx = RollContext {
            animate: false,
            ..animated(0)
        };
        assert_eq!(cell.request(1, -1, ctx), RollPlan::Jump { index: 11 });
        assert_eq!(cell.current_digit(), 1);
    }

    #[test]
    fn test_settle_when_idle_recenters() {
        let mut cell = DigitCycle::new(5);
        assert_eq!(cell.settle(), 15);
    }

    #[test]
    #[should_panic(expected = "digit value 10 is not in 0-9")]
    fn test_out_of_range_digit_panics() {
        let mut cell = DigitCycle::new(0);
        cell.request(10, 0, animated(0));
    }

    #[test]
    #[should_panic(expected = "at least 3 cycles")]
    fn test_too_few_cycles_panics() {
        let _ = DigitCycle::with_cycles(0, 2);
    }
}
