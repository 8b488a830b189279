// ============================================================================
// Animation Configuration
// Durations and curves handed to the renderer with each instruction
// ============================================================================

use super::errors::{FlowError, FlowResult};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimingCurve {
    #[default]
    Spring,
    Smooth,
}

/// Concrete curve for one instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnimationCurve {
    Spring { damping_ratio: f64 },
    EaseOut,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberFlowAnimation {
    /// Duration of slides and glides
    pub transform_duration: Duration,
    pub transform_damping_ratio: f64,

    /// Digit roll duration; falls back to `transform_duration`
    pub spin_duration: Option<Duration>,
    /// Digit roll damping; falls back to `transform_damping_ratio`
    pub spin_damping_ratio: Option<f64>,

    pub opacity_duration: Duration,
    pub is_animated: bool,
    pub respects_reduced_motion: bool,
    pub timing_curve: TimingCurve,
}

impl Default for NumberFlowAnimation {
    fn default() -> Self {
        Self {
            transform_duration: Duration::from_millis(900),
            transform_damping_ratio: 0.85,
            spin_duration: None,
            spin_damping_ratio: None,
            opacity_duration: Duration::from_millis(450),
            is_animated: true,
            respects_reduced_motion: true,
            timing_curve: TimingCurve::Spring,
        }
    }
}

impl NumberFlowAnimation {
    pub fn fast() -> Self {
        Self {
            transform_duration: Duration::from_millis(500),
            transform_damping_ratio: 0.9,
            opacity_duration: Duration::from_millis(250),
            ..Self::default()
        }
    }

    pub fn slow() -> Self {
        Self {
            transform_duration: Duration::from_millis(1500),
            transform_damping_ratio: 0.75,
            opacity_duration: Duration::from_millis(750),
            ..Self::default()
        }
    }

    /// Configuration that applies every change instantly.
    pub fn disabled() -> Self {
        Self {
            is_animated: false,
            ..Self::default()
        }
    }

    pub fn with_spin(mut self, duration: Duration, damping_ratio: f64) -> Self {
        self.spin_duration = Some(duration);
        self.spin_damping_ratio = Some(damping_ratio);
        self
    }

    pub fn with_timing_curve(mut self, curve: TimingCurve) -> Self {
        self.timing_curve = curve;
        self
    }

    pub fn effective_spin_duration(&self) -> Duration {
        self.spin_duration.unwrap_or(self.transform_duration)
    }

    pub fn effective_spin_damping_ratio(&self) -> f64 {
        self.spin_damping_ratio
            .unwrap_or(self.transform_damping_ratio)
    }

    /// Whether changes should be animated given the platform's
    /// reduced-motion setting.
    pub fn should_animate(&self, reduced_motion: bool) -> bool {
        self.is_animated && !(self.respects_reduced_motion && reduced_motion)
    }

    pub fn transform_curve(&self) -> AnimationCurve {
        self.curve(self.transform_damping_ratio)
    }

    pub fn spin_curve(&self) -> AnimationCurve {
        self.curve(self.effective_spin_damping_ratio())
    }

    fn curve(&self, damping_ratio: f64) -> AnimationCurve {
        match self.timing_curve {
            TimingCurve::Spring => AnimationCurve::Spring { damping_ratio },
            TimingCurve::Smooth => AnimationCurve::EaseOut,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> FlowResult<()> {
        let ratios = [Some(self.transform_damping_ratio), self.spin_damping_ratio];
        for ratio in ratios.into_iter().flatten() {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(FlowError::InvalidAnimation(
                    "damping ratio must be in (0, 1]",
                ));
            }
        }
        if self.transform_duration.is_zero() || self.effective_spin_duration().is_zero() {
            return Err(FlowError::InvalidAnimation("durations must be non-zero"));
        }
        Ok(())
    }
}
