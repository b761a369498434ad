//! The countdown timer ("Final Timer").
//!
//! A preset sets the clock, start runs it down once per second, and at zero
//! the time starts to rock and flash while the bell rings until OK is
//! pressed. Which controls are offered follows the run state:
//!
//! | state    | controls                   |
//! |----------|----------------------------|
//! | idle     | presets, Start             |
//! | running  | Pause, Delete              |
//! | paused   | Continue, Delete           |
//! | alarming | OK                         |

use crate::app::{combine, frame};
use crate::bell::{Bell, TerminalBell};
use crate::config::{self, CountdownConfig};
use crate::driver::{TickDriver, TickMsg};
use crate::help;
use crate::key::{Binding, KeyMap};
use crate::lifecycle::{Action, Controller, Controls, Effect};
use crate::preset::PresetSelector;
use crate::render::{BannerRenderer, TransformedText};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};

pub const TITLE: &str = "Final Timer";

const DEFAULT_WIDTH: usize = 60;
const DEFAULT_HEIGHT: usize = 16;

/// Key bindings of the countdown.
#[derive(Debug, Clone)]
pub struct CountdownKeys {
    pub presets: Binding,
    pub start: Binding,
    pub toggle: Binding,
    pub reset: Binding,
    pub acknowledge: Binding,
    pub help: Binding,
    pub quit: Binding,
}

impl CountdownKeys {
    /// Bindings for `preset_count` presets on the digit keys.
    pub fn new(preset_count: usize) -> Self {
        let count = preset_count.min(9);
        let digits: Vec<KeyCode> = ('1'..='9').take(count).map(KeyCode::Char).collect();
        let preset_help = match count {
            0 => String::new(),
            1 => "1".to_string(),
            n => format!("1-{n}"),
        };

        Self {
            presets: Binding::new(digits).with_help(preset_help, "preset"),
            start: Binding::new(vec![KeyCode::Enter, KeyCode::Char('s')]).with_help("enter", "start"),
            toggle: Binding::new(vec![KeyCode::Char(' '), KeyCode::Char('p')])
                .with_help("space", "pause"),
            reset: Binding::new(vec![KeyCode::Char('d'), KeyCode::Delete])
                .with_help("d", "delete"),
            acknowledge: Binding::new(vec![KeyCode::Enter, KeyCode::Char('o')])
                .with_help("enter", "OK"),
            help: Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            quit: Binding::new(vec![
                (KeyCode::Char('q'), KeyModifiers::NONE),
                (KeyCode::Esc, KeyModifiers::NONE),
                (KeyCode::Char('c'), KeyModifiers::CONTROL),
            ])
            .with_help("q", "quit"),
        }
    }

    /// Enables exactly the bindings whose controls are visible.
    fn sync(&mut self, controls: &Controls) {
        self.presets.set_enabled(controls.presets);
        self.start.set_enabled(controls.start);
        self.toggle.set_enabled(controls.toggle.is_some());
        if let Some(label) = controls.toggle {
            self.toggle.set_help("space", label.to_lowercase());
        }
        self.reset.set_enabled(controls.reset);
        self.acknowledge.set_enabled(controls.acknowledge);
    }
}

impl KeyMap for CountdownKeys {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.presets,
            &self.start,
            &self.toggle,
            &self.reset,
            &self.acknowledge,
            &self.help,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.presets, &self.start, &self.acknowledge],
            vec![&self.toggle, &self.reset],
            vec![&self.help, &self.quit],
        ]
    }
}

/// The countdown program.
pub struct Countdown {
    controller: Controller,
    presets: PresetSelector,
    ticks: TickDriver,
    frames: TickDriver,
    bell: Box<dyn Bell>,
    renderer: Box<dyn TransformedText>,
    keys: CountdownKeys,
    help: help::Model,
    width: usize,
    height: usize,
}

impl Countdown {
    /// A countdown idle at zero.
    pub fn new(
        config: &CountdownConfig,
        bell: Box<dyn Bell>,
        renderer: Box<dyn TransformedText>,
    ) -> Self {
        let controller = Controller::countdown(config.format, &config.alarm);
        let presets = PresetSelector::new(config.presets.clone());
        let mut keys = CountdownKeys::new(presets.len());
        keys.sync(&controller.controls());

        Self {
            controller,
            presets,
            ticks: TickDriver::new(),
            frames: TickDriver::new(),
            bell,
            renderer,
            keys,
            help: help::Model::new().with_width(DEFAULT_WIDTH - 4),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Feeds one action through the controller and performs its effects.
    pub fn dispatch(&mut self, action: Action) -> Option<Cmd> {
        let effects = self.controller.dispatch(action);
        let cmds = self.apply(effects);
        self.keys.sync(&self.controller.controls());
        combine(cmds)
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Vec<Cmd> {
        let mut cmds = Vec::new();
        for effect in effects {
            match effect {
                Effect::ArmTicks(interval) => cmds.push(self.ticks.arm(interval)),
                Effect::DisarmTicks => self.ticks.disarm(),
                Effect::ArmAnimator(interval) => cmds.push(self.frames.arm(interval)),
                Effect::DisarmAnimator => self.frames.disarm(),
                Effect::Beep => self.bell.ring(),
            }
        }
        cmds
    }

    fn on_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.keys.quit.matches(key) {
            tracing::info!("countdown closed");
            return Some(quit());
        }
        if self.keys.help.matches(key) {
            self.help.show_all = !self.help.show_all;
            return None;
        }

        let action = if self.keys.presets.matches(key) {
            let KeyCode::Char(c) = key.key else {
                return None;
            };
            let index = c.to_digit(10)? as usize;
            let preset = self.presets.get(index.checked_sub(1)?)?;
            tracing::info!(preset = %preset.label, "preset chosen");
            Action::Set(preset.duration())
        } else if self.keys.start.matches(key) {
            Action::Start
        } else if self.keys.acknowledge.matches(key) {
            Action::Acknowledge
        } else if self.keys.toggle.matches(key) {
            Action::Toggle
        } else if self.keys.reset.matches(key) {
            Action::Reset
        } else {
            return None;
        };
        self.dispatch(action)
    }

    fn on_tick(&mut self, msg: &TickMsg) -> Option<Cmd> {
        if self.ticks.accepts(msg) {
            let mut cmds = Vec::new();
            if let Some(cmd) = self.dispatch(Action::Tick) {
                cmds.push(cmd);
            }
            cmds.extend(self.ticks.next());
            combine(cmds)
        } else if self.frames.accepts(msg) {
            let mut cmds = Vec::new();
            if let Some(cmd) = self.dispatch(Action::Frame) {
                cmds.push(cmd);
            }
            cmds.extend(self.frames.next());
            combine(cmds)
        } else {
            None
        }
    }

    fn buttons(&self) -> String {
        let controls = self.controller.controls();
        let mut buttons: Vec<String> = Vec::new();
        if controls.presets {
            for (i, preset) in self.presets.presets().iter().enumerate().take(9) {
                buttons.push(format!("[{}] {}", i + 1, preset.label));
            }
        }
        if controls.start {
            buttons.push("[Start]".to_string());
        }
        if let Some(label) = controls.toggle {
            buttons.push(format!("[{label}]"));
        }
        if controls.reset {
            buttons.push("[Delete]".to_string());
        }
        if controls.acknowledge {
            buttons.push("[OK]".to_string());
        }
        buttons.join("  ")
    }
}

impl Model for Countdown {
    fn init() -> (Self, Option<Cmd>) {
        let countdown = Countdown::new(
            &config::get().countdown,
            Box::new(TerminalBell),
            Box::new(BannerRenderer::new()),
        );
        (countdown, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            return self.on_tick(tick);
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.on_key(key);
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = size.width as usize;
            self.height = size.height as usize;
            self.help.width = self.width.saturating_sub(4);
        }
        None
    }

    fn view(&self) -> String {
        let mut body = vec![String::new(), format!("  {}", self.controller.state()), String::new()];
        let banner = self
            .renderer
            .render(&self.controller.display(), self.controller.transform());
        body.extend(banner.lines().map(|l| format!("  {l}")));
        body.push(String::new());
        body.push(format!("  {}", self.buttons()));
        body.push(String::new());
        body.extend(self.help.view(&self.keys).lines().map(|l| format!("  {l}")));

        frame(TITLE, &body.join("\n"), self.width, self.height)
    }
}
