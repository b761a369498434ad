//! The count-up timer.
//!
//! Shows today's date, the elapsed time in the block font and a running
//! total in hours and minutes. One key starts, pauses and continues;
//! another resets to zero.

use crate::animator::Transform;
use crate::app::{combine, frame};
use crate::clock::Hms;
use crate::config::{self, StopwatchConfig};
use crate::driver::{TickDriver, TickMsg};
use crate::help;
use crate::key::{Binding, KeyMap};
use crate::lifecycle::{Action, Controller, Effect};
use crate::render::{BannerRenderer, TransformedText};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg, WindowSizeMsg};
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyModifiers};

pub const TITLE: &str = "Timer";

const DEFAULT_WIDTH: usize = 60;
const DEFAULT_HEIGHT: usize = 16;

/// `yyyy.MM.dd. ddd`, e.g. `2024.03.09. Sat`.
pub fn date_header(date: NaiveDate) -> String {
    date.format("%Y.%m.%d. %a").to_string()
}

/// Elapsed time as `NNH NNM`; hours are not wrapped.
pub fn total_label(elapsed: Hms) -> String {
    let total = elapsed.total_secs();
    format!("{:02}H {:02}M", total / 3600, total % 3600 / 60)
}

#[derive(Debug, Clone)]
pub struct StopwatchKeys {
    pub toggle: Binding,
    pub reset: Binding,
    pub quit: Binding,
}

impl Default for StopwatchKeys {
    fn default() -> Self {
        Self {
            toggle: Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
                .with_help("space", "start"),
            reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
            quit: Binding::new(vec![
                (KeyCode::Char('q'), KeyModifiers::NONE),
                (KeyCode::Esc, KeyModifiers::NONE),
                (KeyCode::Char('c'), KeyModifiers::CONTROL),
            ])
            .with_help("q", "quit"),
        }
    }
}

impl KeyMap for StopwatchKeys {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.toggle, &self.reset, &self.quit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.toggle, &self.reset], vec![&self.quit]]
    }
}

/// The stopwatch program.
pub struct Stopwatch {
    controller: Controller,
    ticks: TickDriver,
    renderer: BannerRenderer,
    keys: StopwatchKeys,
    help: help::Model,
    today: NaiveDate,
    width: usize,
    height: usize,
}

impl Stopwatch {
    pub fn new(config: &StopwatchConfig, today: NaiveDate) -> Self {
        let mut stopwatch = Self {
            controller: Controller::count_up(config.format),
            ticks: TickDriver::new(),
            renderer: BannerRenderer::new(),
            keys: StopwatchKeys::default(),
            help: help::Model::new(),
            today,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        };
        stopwatch.sync_keys();
        stopwatch
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Text of the start/pause/continue control.
    pub fn toggle_label(&self) -> &'static str {
        self.controller.controls().toggle.unwrap_or("Start")
    }

    fn sync_keys(&mut self) {
        let label = self.toggle_label().to_lowercase();
        self.keys.toggle.set_help("space", label);
    }

    fn dispatch(&mut self, action: Action) -> Option<Cmd> {
        let mut cmds = Vec::new();
        for effect in self.controller.dispatch(action) {
            match effect {
                Effect::ArmTicks(interval) => cmds.push(self.ticks.arm(interval)),
                Effect::DisarmTicks => self.ticks.disarm(),
                // A count-up timer never alarms.
                Effect::ArmAnimator(_) | Effect::DisarmAnimator | Effect::Beep => {}
            }
        }
        self.sync_keys();
        combine(cmds)
    }
}

impl Model for Stopwatch {
    fn init() -> (Self, Option<Cmd>) {
        let stopwatch = Stopwatch::new(&config::get().stopwatch, Local::now().date_naive());
        (stopwatch, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if !self.ticks.accepts(tick) {
                return None;
            }
            self.today = Local::now().date_naive();
            let mut cmds: Vec<Cmd> = self.dispatch(Action::Tick).into_iter().collect();
            cmds.extend(self.ticks.next());
            return combine(cmds);
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if self.keys.quit.matches(key) {
                tracing::info!("stopwatch closed");
                return Some(quit());
            }
            if self.keys.toggle.matches(key) {
                return self.dispatch(Action::Toggle);
            }
            if self.keys.reset.matches(key) {
                return self.dispatch(Action::Reset);
            }
            return None;
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = size.width as usize;
            self.height = size.height as usize;
        }
        None
    }

    fn view(&self) -> String {
        let mut body = vec![String::new(), format!("  {}", date_header(self.today)), String::new()];
        let banner = self
            .renderer
            .render(&self.controller.display(), Transform::NEUTRAL);
        body.extend(banner.lines().map(|l| format!("  {l}")));
        body.push(String::new());
        body.push(format!(
            "  TOTAL {}",
            total_label(self.controller.clock().value())
        ));
        body.push(String::new());
        body.push(format!("  [{}]  [Reset]", self.toggle_label()));
        body.push(String::new());
        body.push(format!("  {}", self.help.view(&self.keys)));

        frame(TITLE, &body.join("\n"), self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::RunState;

    fn key(c: char) -> Msg {
        Box::new(KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        })
    }

    fn stopwatch() -> Stopwatch {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        Stopwatch::new(&StopwatchConfig::default(), day)
    }

    fn tick(s: &mut Stopwatch) -> Option<Cmd> {
        let msg = s.ticks.tick_msg();
        s.update(Box::new(msg))
    }

    #[test]
    fn test_date_header() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(date_header(day), "2024.03.09. Sat");
    }

    #[test]
    fn test_total_label() {
        assert_eq!(total_label(Hms::ZERO), "00H 00M");
        assert_eq!(total_label(Hms::new(1, 5, 59)), "01H 05M");
        assert_eq!(total_label(Hms::new(123, 0, 0)), "123H 00M");
    }

    #[test]
    fn test_toggle_label_follows_state() {
        let mut s = stopwatch();
        assert_eq!(s.toggle_label(), "Start");
        assert!(s.update(key(' ')).is_some());
        assert_eq!(s.toggle_label(), "Pause");
        s.update(key(' '));
        assert_eq!(s.toggle_label(), "Continue");
        assert_eq!(s.controller().state(), RunState::Paused);
        s.update(key(' '));
        assert_eq!(s.toggle_label(), "Pause");
    }

    #[test]
    fn test_counts_up_and_resets() {
        let mut s = stopwatch();
        s.update(key(' '));
        for _ in 0..61 {
            assert!(tick(&mut s).is_some());
        }
        assert_eq!(s.controller().display(), "00:01:01");
        let view = strip_ansi_escapes::strip_str(s.view());
        assert!(view.contains("TOTAL 00H 01M"));
        assert!(view.contains("[Pause]"));

        s.update(key('r'));
        assert_eq!(s.controller().state(), RunState::Idle);
        assert_eq!(s.controller().display(), "00:00:00");
        assert_eq!(s.toggle_label(), "Start");
        assert!(tick(&mut s).is_none());
    }

    #[test]
    fn test_start_from_zero_allowed() {
        let mut s = stopwatch();
        s.update(Box::new(KeyMsg {
            key: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(s.controller().state(), RunState::Running);
    }

    #[test]
    fn test_view_shows_date_and_controls() {
        let view = strip_ansi_escapes::strip_str(stopwatch().view());
        assert!(view.contains("2024.03.09. Sat"));
        assert!(view.contains("TOTAL 00H 00M"));
        assert!(view.contains("[Start]  [Reset]"));
    }

    #[test]
    fn test_quit() {
        assert!(stopwatch().update(key('q')).is_some());
    }
}
