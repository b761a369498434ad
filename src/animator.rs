//! Alarm animation: two bounded oscillators and the beep cadence.
//!
//! While the countdown is alarming, every animation frame advances a
//! rotation angle and an overlay alpha. Each oscillator moves by a fixed
//! step, is clamped to its bounds, and reverses once it sits on a bound.
//! A beep is requested whenever the angle passes near its centre, so the
//! sound follows the swing of the display rather than a fixed period.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A counter that walks between two bounds, reversing at each end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oscillator {
    value: i32,
    lower: i32,
    upper: i32,
    step: i32,
    direction: i32,
}

impl Oscillator {
    /// Creates an oscillator resting at the value nearest zero inside
    /// `lower..=upper`, heading upward.
    pub fn new(lower: i32, upper: i32, step: i32) -> Self {
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        Self {
            value: 0_i32.clamp(lower, upper),
            lower,
            upper,
            step: step.saturating_abs(),
            direction: 1,
        }
    }

    /// Advances one step and returns the new value.
    ///
    /// The boundary check happens before the increment: a value sitting on
    /// a bound turns the direction around, then the step is applied and the
    /// result clamped so it never leaves the bounds.
    pub fn advance(&mut self) -> i32 {
        if self.value >= self.upper {
            self.direction = -1;
        } else if self.value <= self.lower {
            self.direction = 1;
        }
        self.value = self
            .value
            .saturating_add(self.step.saturating_mul(self.direction))
            .clamp(self.lower, self.upper);
        self.value
    }

    /// Back to the neutral value, heading upward.
    pub fn reset(&mut self) {
        self.value = 0_i32.clamp(self.lower, self.upper);
        self.direction = 1;
    }

    /// Current value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// `1` when heading up, `-1` when heading down.
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// `(lower, upper)`.
    pub fn bounds(&self) -> (i32, i32) {
        (self.lower, self.upper)
    }
}

/// Largest swing of the rotation, in degrees.
pub const MAX_ANGLE: i32 = 180;

/// Tunables of the alarm animation.
///
/// Out-of-range values are clamped when the animator is built: the angle
/// bound to `0..=180`, the alpha bound to `0..=255`, each step to its bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmSettings {
    /// Period of the animation driver in milliseconds.
    pub frame_interval_ms: u64,
    /// The angle swings within `-angle_bound..=angle_bound` degrees.
    pub angle_bound: i32,
    /// Degrees per frame.
    pub angle_step: i32,
    /// The overlay alpha swings within `0..=alpha_bound`.
    pub alpha_bound: i32,
    /// Alpha units per frame.
    pub alpha_step: i32,
    /// A beep sounds when `|angle|` falls under this.
    pub beep_threshold: i32,
}

impl Default for AlarmSettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: 50,
            angle_bound: 15,
            angle_step: 9,
            alpha_bound: 80,
            alpha_step: 30,
            beep_threshold: 9,
        }
    }
}

impl AlarmSettings {
    /// The animation driver period.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// The rotation and opacity applied to the clock text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    /// Rotation in degrees, positive clockwise.
    pub angle: i32,
    /// Overlay alpha, 0 is transparent.
    pub alpha: u8,
}

impl Transform {
    /// No rotation, no overlay.
    pub const NEUTRAL: Transform = Transform { angle: 0, alpha: 0 };
}

/// Result of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The transform to draw with.
    pub transform: Transform,
    /// Whether this frame should sound a beep.
    pub beep: bool,
}

/// Drives the alarm oscillators.
#[derive(Debug, Clone)]
pub struct AlarmAnimator {
    angle: Oscillator,
    alpha: Oscillator,
    beep_threshold: i32,
}

impl AlarmAnimator {
    /// Builds the animator from its settings.
    pub fn new(settings: &AlarmSettings) -> Self {
        let bound = settings.angle_bound.saturating_abs().min(MAX_ANGLE);
        let alpha_bound = settings.alpha_bound.clamp(0, 255);
        Self {
            angle: Oscillator::new(
                -bound,
                bound,
                settings.angle_step.saturating_abs().min(bound),
            ),
            alpha: Oscillator::new(
                0,
                alpha_bound,
                settings.alpha_step.saturating_abs().min(alpha_bound),
            ),
            beep_threshold: settings.beep_threshold,
        }
    }

    /// Advances both oscillators. Only the angle decides the beep.
    pub fn advance(&mut self) -> Frame {
        let angle = self.angle.advance();
        self.alpha.advance();
        Frame {
            transform: self.transform(),
            beep: angle.abs() < self.beep_threshold,
        }
    }

    /// Back to angle 0 and alpha 0.
    pub fn reset(&mut self) {
        self.angle.reset();
        self.alpha.reset();
    }

    /// The current transform.
    pub fn transform(&self) -> Transform {
        Transform {
            angle: self.angle.value(),
            alpha: self.alpha.value().clamp(0, 255) as u8,
        }
    }

    /// The rotation oscillator.
    pub fn angle(&self) -> &Oscillator {
        &self.angle
    }

    /// The opacity oscillator.
    pub fn alpha(&self) -> &Oscillator {
        &self.alpha
    }
}

impl Default for AlarmAnimator {
    fn default() -> Self {
        Self::new(&AlarmSettings::default())
    }
}
