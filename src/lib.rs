//! # termdesk
//!
//! Small terminal desktop programs built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs):
//!
//! - `hello`: a titled window that waits to be closed
//! - `countdown`: a countdown timer with presets, pause/continue and an
//!   animated, ringing alarm
//! - `stopwatch`: a count-up timer with a date header and running total
//! - `notepad`: a multi-tab, multi-window plain-text notepad
//!
//! ## Timer lifecycle
//!
//! Both timers share one [`lifecycle::Controller`]. It owns the
//! [`clock::Clock`], the [`lifecycle::RunState`] and the
//! [`animator::AlarmAnimator`], and every input goes through
//! [`lifecycle::Controller::dispatch`], which consults the explicit
//! transition table and returns the [`lifecycle::Effect`]s the program has
//! to carry out (arming tick drivers, ringing the bell):
//!
//! ```rust
//! use termdesk::animator::AlarmSettings;
//! use termdesk::clock::{ClockFormat, Hms};
//! use termdesk::lifecycle::{Action, Controller, Effect, RunState, TICK_INTERVAL};
//!
//! let mut timer = Controller::countdown(ClockFormat::HhMmSs, &AlarmSettings::default());
//! timer.dispatch(Action::Set(Hms::new(0, 0, 1)));
//! assert_eq!(timer.dispatch(Action::Start), vec![Effect::ArmTicks(TICK_INTERVAL)]);
//!
//! let effects = timer.dispatch(Action::Tick);
//! assert_eq!(timer.state(), RunState::Alarming);
//! assert!(effects.contains(&Effect::Beep));
//! ```
//!
//! ## Key bindings
//!
//! Programs declare their keys with [`key::Binding`] and list them for the
//! [`help`] line through [`key::KeyMap`]:
//!
//! ```rust
//! use termdesk::key::{Binding, KeyMap};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! struct Keys {
//!     save: Binding,
//!     quit: Binding,
//! }
//!
//! impl KeyMap for Keys {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.save, &self.quit]
//!     }
//!
//!     fn full_help(&self) -> Vec<Vec<&Binding>> {
//!         vec![vec![&self.save], vec![&self.quit]]
//!     }
//! }
//!
//! let keys = Keys {
//!     save: Binding::new(vec![(KeyCode::Char('s'), KeyModifiers::CONTROL)])
//!         .with_help("ctrl+s", "save"),
//!     quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
//! };
//! let line = termdesk::help::Model::new().view(&keys);
//! assert!(strip_ansi_escapes::strip_str(&line).contains("ctrl+s save"));
//! ```

pub mod animator;
pub mod app;
pub mod bell;
pub mod clock;
pub mod config;
pub mod context;
pub mod document;
pub mod driver;
pub mod editor;
pub mod error;
pub mod help;
pub mod key;
pub mod lifecycle;
pub mod logging;
pub mod notepad;
pub mod preset;
pub mod render;

pub use error::{Error, Result};
pub use lifecycle::{Action, Controller, Effect, RunState, Variant};
