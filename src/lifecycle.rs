//! Run-state machine shared by the timer programs.
//!
//! Every user action and every driver tick goes through
//! [`Controller::dispatch`]. The dispatcher looks the `(state, action)` pair
//! up in a single transition table ([`transition`]); a pair the table does
//! not list is a no-op and produces no effects. Side effects on the host
//! (arming the tick driver, starting the alarm animation, beeping) are
//! returned as [`Effect`]s for the caller to carry out, so the machine itself
//! never touches the terminal.
//!
//! ```text
//!            start (clock > 0)          pause
//!   Idle ───────────────────────▶ Running ───────▶ Paused
//!    ▲  ▲                          │  ▲   ◀─────── │
//!    │  │          reset           │  │   resume   │
//!    │  └──────────────────────────┴──┼────────────┘
//!    │                              tick reaches 0
//!    │        acknowledge              ▼
//!    └──────────────────────────── Alarming
//! ```
//!
//! # Example
//!
//! ```rust
//! use termdesk::clock::{ClockFormat, Hms};
//! use termdesk::lifecycle::{Action, Controller, RunState};
//! use termdesk::animator::AlarmSettings;
//!
//! let mut timer = Controller::countdown(ClockFormat::HhMmSs, &AlarmSettings::default());
//! timer.dispatch(Action::Set(Hms::new(0, 0, 3)));
//! timer.dispatch(Action::Start);
//! for _ in 0..3 {
//!     timer.dispatch(Action::Tick);
//! }
//! assert_eq!(timer.state(), RunState::Alarming);
//! timer.dispatch(Action::Acknowledge);
//! assert_eq!(timer.state(), RunState::Idle);
//! ```

use crate::animator::{AlarmAnimator, AlarmSettings, Transform};
use crate::clock::{Clock, ClockFormat, Direction, Hms};
use std::fmt;
use std::time::Duration;

/// Period of the clock tick driver.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Whether the timer counts down to an alarm or counts up forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Counts down and alarms at zero.
    Countdown,
    /// Counts up; never alarms.
    CountUp,
}

/// The lifecycle state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Nothing running; presets may be applied.
    #[default]
    Idle,
    /// The clock ticks once per second.
    Running,
    /// Ticks are suspended; the clock keeps its value.
    Paused,
    /// The countdown hit zero; the alarm animation runs.
    Alarming,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Alarming => "alarming",
        })
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Replace the clock value (preset selection).
    Set(Hms),
    /// Begin ticking.
    Start,
    /// Suspend ticking.
    Pause,
    /// Continue after a pause.
    Resume,
    /// Start, pause or resume, whichever the current state allows.
    Toggle,
    /// Stop and return the clock to zero ("delete" in the countdown).
    Reset,
    /// Dismiss the alarm.
    Acknowledge,
    /// One period of the clock tick driver elapsed.
    Tick,
    /// One period of the alarm animation driver elapsed.
    Frame,
}

/// Host side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Arm the clock tick driver with the given period.
    ArmTicks(Duration),
    /// Disarm the clock tick driver.
    DisarmTicks,
    /// Arm the alarm animation driver with the given period.
    ArmAnimator(Duration),
    /// Disarm the alarm animation driver.
    DisarmAnimator,
    /// Sound one audible cue.
    Beep,
}

/// A named row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `Idle --set--> Idle`
    Preset(Hms),
    /// `Idle --start--> Running`
    Start,
    /// `Running --pause--> Paused`
    Pause,
    /// `Paused --resume--> Running`
    Resume,
    /// `Running/Paused --reset--> Idle`
    Reset,
    /// `Running --tick--> Running | Alarming`
    Tick,
    /// `Alarming --frame--> Alarming`
    Animate,
    /// `Alarming --acknowledge--> Idle`
    Acknowledge,
}

/// The transition table.
///
/// `Toggle` is resolved to the concrete action the state allows before the
/// lookup. Any pair not listed here returns `None`.
pub fn transition(variant: Variant, state: RunState, action: Action) -> Option<Step> {
    use Action as A;
    use RunState as S;

    let action = match (state, action) {
        (S::Idle, A::Toggle) => A::Start,
        (S::Running, A::Toggle) => A::Pause,
        (S::Paused, A::Toggle) => A::Resume,
        (_, A::Toggle) => return None,
        (_, other) => other,
    };

    match (variant, state, action) {
        (_, S::Idle, A::Set(value)) => Some(Step::Preset(value)),
        (_, S::Idle, A::Start) => Some(Step::Start),
        (_, S::Running, A::Pause) => Some(Step::Pause),
        (_, S::Paused, A::Resume) => Some(Step::Resume),
        (_, S::Running | S::Paused, A::Reset) => Some(Step::Reset),
        (_, S::Running, A::Tick) => Some(Step::Tick),
        (Variant::Countdown, S::Alarming, A::Frame) => Some(Step::Animate),
        (Variant::Countdown, S::Alarming, A::Acknowledge) => Some(Step::Acknowledge),
        _ => None,
    }
}

/// Which controls are shown in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Preset shortcuts.
    pub presets: bool,
    /// A dedicated start control.
    pub start: bool,
    /// The start/pause/continue toggle and its label.
    pub toggle: Option<&'static str>,
    /// Reset ("delete" in the countdown).
    pub reset: bool,
    /// Alarm dismissal ("OK").
    pub acknowledge: bool,
}

impl Controls {
    const HIDDEN: Controls = Controls {
        presets: false,
        start: false,
        toggle: None,
        reset: false,
        acknowledge: false,
    };
}

/// Derives control visibility from the variant and state.
pub fn controls(variant: Variant, state: RunState) -> Controls {
    match (variant, state) {
        (Variant::Countdown, RunState::Idle) => Controls {
            presets: true,
            start: true,
            ..Controls::HIDDEN
        },
        (Variant::Countdown, RunState::Running) => Controls {
            toggle: Some("Pause"),
            reset: true,
            ..Controls::HIDDEN
        },
        (Variant::Countdown, RunState::Paused) => Controls {
            toggle: Some("Continue"),
            reset: true,
            ..Controls::HIDDEN
        },
        (Variant::Countdown, RunState::Alarming) => Controls {
            acknowledge: true,
            ..Controls::HIDDEN
        },
        (Variant::CountUp, state) => Controls {
            toggle: Some(match state {
                RunState::Running => "Pause",
                RunState::Paused => "Continue",
                _ => "Start",
            }),
            reset: true,
            ..Controls::HIDDEN
        },
    }
}

/// Owns the clock, the run state and the alarm animator of one timer.
#[derive(Debug, Clone)]
pub struct Controller {
    variant: Variant,
    state: RunState,
    clock: Clock,
    animator: AlarmAnimator,
    frame_interval: Duration,
}

impl Controller {
    /// A countdown timer, idle at zero.
    pub fn countdown(format: ClockFormat, alarm: &AlarmSettings) -> Self {
        Self {
            variant: Variant::Countdown,
            state: RunState::Idle,
            clock: Clock::new(Direction::Down, format),
            animator: AlarmAnimator::new(alarm),
            frame_interval: alarm.frame_interval(),
        }
    }

    /// A count-up timer, idle at zero.
    pub fn count_up(format: ClockFormat) -> Self {
        Self {
            variant: Variant::CountUp,
            state: RunState::Idle,
            clock: Clock::new(Direction::Up, format),
            animator: AlarmAnimator::default(),
            frame_interval: AlarmSettings::default().frame_interval(),
        }
    }

    /// Applies an action and returns the effects the host must perform.
    ///
    /// Actions the current state does not accept return no effects and
    /// change nothing.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let Some(step) = transition(self.variant, self.state, action) else {
            tracing::trace!(state = %self.state, ?action, "action ignored");
            return Vec::new();
        };

        match step {
            Step::Preset(value) => {
                self.clock.set(value);
                tracing::debug!(value = %value, "clock set");
                Vec::new()
            }
            Step::Start => {
                if self.variant == Variant::Countdown && self.clock.is_zero() {
                    tracing::debug!("start ignored: countdown is at zero");
                    return Vec::new();
                }
                self.enter(RunState::Running);
                vec![Effect::ArmTicks(TICK_INTERVAL)]
            }
            Step::Pause => {
                self.enter(RunState::Paused);
                vec![Effect::DisarmTicks]
            }
            Step::Resume => {
                self.enter(RunState::Running);
                vec![Effect::ArmTicks(TICK_INTERVAL)]
            }
            Step::Reset => {
                self.clock.clear();
                self.enter(RunState::Idle);
                vec![Effect::DisarmTicks]
            }
            Step::Tick => {
                let reached_zero = self.clock.step();
                if self.variant == Variant::Countdown && reached_zero {
                    self.animator.reset();
                    self.enter(RunState::Alarming);
                    vec![
                        Effect::DisarmTicks,
                        Effect::ArmAnimator(self.frame_interval),
                        Effect::Beep,
                    ]
                } else {
                    Vec::new()
                }
            }
            Step::Animate => {
                if self.animator.advance().beep {
                    vec![Effect::Beep]
                } else {
                    Vec::new()
                }
            }
            Step::Acknowledge => {
                self.animator.reset();
                self.clock.clear();
                self.enter(RunState::Idle);
                vec![Effect::DisarmAnimator]
            }
        }
    }

    fn enter(&mut self, next: RunState) {
        tracing::info!(from = %self.state, to = %next, clock = %self.clock.format(), "run state changed");
        self.state = next;
    }

    /// Countdown or count-up.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The clock model.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The clock text as displayed.
    pub fn display(&self) -> String {
        self.clock.format()
    }

    /// The alarm animator.
    pub fn animator(&self) -> &AlarmAnimator {
        &self.animator
    }

    /// The transform to draw the clock text with.
    pub fn transform(&self) -> Transform {
        if self.state == RunState::Alarming {
            self.animator.transform()
        } else {
            Transform::NEUTRAL
        }
    }

    /// Visible controls for the current state.
    pub fn controls(&self) -> Controls {
        controls(self.variant, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown() -> Controller {
        Controller::countdown(ClockFormat::HhMmSs, &AlarmSettings::default())
    }

    fn all_actions() -> Vec<Action> {
        vec![
            Action::Set(Hms::new(0, 1, 0)),
            Action::Start,
            Action::Pause,
            Action::Resume,
            Action::Toggle,
            Action::Reset,
            Action::Acknowledge,
            Action::Tick,
            Action::Frame,
        ]
    }

    /// Puts a fresh countdown into `state` with a non-zero clock.
    fn countdown_in(state: RunState) -> Controller {
        let mut c = countdown();
        c.dispatch(Action::Set(Hms::new(0, 0, 10)));
        match state {
            RunState::Idle => {}
            RunState::Running => {
                c.dispatch(Action::Start);
            }
            RunState::Paused => {
                c.dispatch(Action::Start);
                c.dispatch(Action::Pause);
            }
            RunState::Alarming => {
                c.dispatch(Action::Start);
                for _ in 0..10 {
                    c.dispatch(Action::Tick);
                }
            }
        }
        assert_eq!(c.state(), state);
        c
    }

    #[test]
    fn test_listed_transitions() {
        let v = Variant::Countdown;
        assert_eq!(transition(v, RunState::Idle, Action::Start), Some(Step::Start));
        assert_eq!(transition(v, RunState::Running, Action::Pause), Some(Step::Pause));
        assert_eq!(transition(v, RunState::Paused, Action::Resume), Some(Step::Resume));
        assert_eq!(transition(v, RunState::Running, Action::Reset), Some(Step::Reset));
        assert_eq!(transition(v, RunState::Paused, Action::Reset), Some(Step::Reset));
        assert_eq!(transition(v, RunState::Running, Action::Tick), Some(Step::Tick));
        assert_eq!(
            transition(v, RunState::Alarming, Action::Acknowledge),
            Some(Step::Acknowledge)
        );
        assert_eq!(transition(v, RunState::Idle, Action::Toggle), Some(Step::Start));
        assert_eq!(transition(v, RunState::Running, Action::Toggle), Some(Step::Pause));
        assert_eq!(transition(v, RunState::Paused, Action::Toggle), Some(Step::Resume));
    }

    #[test]
    fn test_count_up_never_alarms() {
        let v = Variant::CountUp;
        assert_eq!(transition(v, RunState::Alarming, Action::Acknowledge), None);
        assert_eq!(transition(v, RunState::Alarming, Action::Frame), None);

        let mut c = Controller::count_up(ClockFormat::HhMmSs);
        c.dispatch(Action::Start);
        for _ in 0..10_000 {
            assert!(c.dispatch(Action::Tick).is_empty());
        }
        assert_eq!(c.state(), RunState::Running);
        assert_eq!(c.display(), "02:46:40");
    }

    #[test]
    fn test_unlisted_pairs_change_nothing() {
        let states = [
            RunState::Idle,
            RunState::Running,
            RunState::Paused,
            RunState::Alarming,
        ];
        for state in states {
            for action in all_actions() {
                if transition(Variant::Countdown, state, action).is_some() {
                    continue;
                }
                let mut c = countdown_in(state);
                let before = c.clock().value();
                let effects = c.dispatch(action);
                assert!(effects.is_empty(), "{state:?} + {action:?} produced {effects:?}");
                assert_eq!(c.state(), state, "{state:?} + {action:?} changed state");
                assert_eq!(c.clock().value(), before, "{state:?} + {action:?} changed clock");
            }
        }
    }

    #[test]
    fn test_start_with_zero_is_ignored() {
        let mut c = countdown();
        assert!(c.dispatch(Action::Start).is_empty());
        assert_eq!(c.state(), RunState::Idle);
        assert!(c.dispatch(Action::Toggle).is_empty());
        assert_eq!(c.state(), RunState::Idle);
    }

    #[test]
    fn test_count_up_starts_from_zero() {
        let mut c = Controller::count_up(ClockFormat::HhMmSs);
        assert_eq!(c.dispatch(Action::Toggle), vec![Effect::ArmTicks(TICK_INTERVAL)]);
        assert_eq!(c.state(), RunState::Running);
    }

    #[test]
    fn test_five_minute_scenario() {
        let mut c = countdown();
        c.dispatch(Action::Set(Hms::new(0, 5, 0)));
        assert_eq!(c.display(), "00:05:00");

        assert_eq!(c.dispatch(Action::Start), vec![Effect::ArmTicks(TICK_INTERVAL)]);
        assert_eq!(c.state(), RunState::Running);

        for _ in 0..299 {
            assert!(c.dispatch(Action::Tick).is_empty());
        }
        let effects = c.dispatch(Action::Tick);
        assert_eq!(
            effects,
            vec![
                Effect::DisarmTicks,
                Effect::ArmAnimator(Duration::from_millis(50)),
                Effect::Beep
            ]
        );
        assert_eq!(c.display(), "00:00:00");
        assert_eq!(c.state(), RunState::Alarming);

        assert_eq!(c.dispatch(Action::Acknowledge), vec![Effect::DisarmAnimator]);
        assert_eq!(c.state(), RunState::Idle);
        assert_eq!(c.display(), "00:00:00");
    }

    #[test]
    fn test_pause_preserves_value() {
        let mut c = countdown_in(RunState::Running);
        c.dispatch(Action::Tick);
        c.dispatch(Action::Tick);
        assert_eq!(c.dispatch(Action::Pause), vec![Effect::DisarmTicks]);
        assert_eq!(c.display(), "00:00:08");
        // A stale tick after pausing is ignored.
        assert!(c.dispatch(Action::Tick).is_empty());
        assert_eq!(c.display(), "00:00:08");
        assert_eq!(c.dispatch(Action::Resume), vec![Effect::ArmTicks(TICK_INTERVAL)]);
        assert_eq!(c.state(), RunState::Running);
    }

    #[test]
    fn test_reset_restores_zero() {
        for state in [RunState::Running, RunState::Paused] {
            let mut c = countdown_in(state);
            assert_eq!(c.dispatch(Action::Reset), vec![Effect::DisarmTicks]);
            assert_eq!(c.state(), RunState::Idle);
            assert!(c.clock().is_zero());
        }
    }

    #[test]
    fn test_presets_only_in_idle() {
        let mut c = countdown_in(RunState::Running);
        c.dispatch(Action::Set(Hms::new(0, 20, 0)));
        assert_eq!(c.display(), "00:00:10");
    }

    #[test]
    fn test_acknowledge_resets_animation_after_any_number_of_frames() {
        for frames in [0usize, 1, 3, 50, 1001] {
            let mut c = countdown_in(RunState::Alarming);
            for _ in 0..frames {
                c.dispatch(Action::Frame);
            }
            c.dispatch(Action::Acknowledge);
            assert_eq!(c.state(), RunState::Idle);
            assert_eq!(c.animator().transform(), Transform::NEUTRAL);
            assert_eq!(c.transform(), Transform::NEUTRAL);
        }
    }

    #[test]
    fn test_frames_beep_near_centre() {
        let mut c = countdown_in(RunState::Alarming);
        // Angles: 9, 15, 6, -3, ...
        assert!(c.dispatch(Action::Frame).is_empty());
        assert!(c.dispatch(Action::Frame).is_empty());
        assert_eq!(c.dispatch(Action::Frame), vec![Effect::Beep]);
        assert_eq!(c.dispatch(Action::Frame), vec![Effect::Beep]);
        assert_eq!(c.transform().angle, -3);
    }

    #[test]
    fn test_controls_per_state() {
        let idle = controls(Variant::Countdown, RunState::Idle);
        assert!(idle.presets && idle.start && !idle.reset && !idle.acknowledge);
        assert_eq!(idle.toggle, None);

        let running = controls(Variant::Countdown, RunState::Running);
        assert!(!running.presets && !running.start && running.reset);
        assert_eq!(running.toggle, Some("Pause"));

        assert_eq!(
            controls(Variant::Countdown, RunState::Paused).toggle,
            Some("Continue")
        );

        let alarming = controls(Variant::Countdown, RunState::Alarming);
        assert!(alarming.acknowledge && !alarming.reset && alarming.toggle.is_none());

        assert_eq!(controls(Variant::CountUp, RunState::Idle).toggle, Some("Start"));
        assert_eq!(controls(Variant::CountUp, RunState::Running).toggle, Some("Pause"));
        assert!(controls(Variant::CountUp, RunState::Paused).reset);
    }
}
