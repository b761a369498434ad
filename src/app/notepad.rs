//! The notepad program: any number of windows, each with tabs.
//!
//! Windows live in an [`AppContext`]; F6 moves focus between them and the
//! program ends when the last one closes. Dialogs of the focused window
//! (path entry, save/discard/cancel, confirmations, warnings) are drawn on
//! its bottom line and take all keys until answered.

use crate::app::frame;
use crate::config;
use crate::context::AppContext;
use crate::help;
use crate::key::{Binding, KeyMap};
use crate::notepad::{Command, Flow, Notepad, NotepadSettings, Outcome, Prompt, Reply, SaveChoice};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use std::path::PathBuf;

const DEFAULT_WIDTH: usize = 80;
const DEFAULT_HEIGHT: usize = 24;

/// Rows taken by the border, tab bar, status, dialog and help lines.
const CHROME_ROWS: usize = 6;

/// Splits `;`-separated paths, dropping blanks.
pub fn parse_paths(input: &str) -> Vec<PathBuf> {
    input
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn ctrl(c: char) -> (KeyCode, KeyModifiers) {
    (KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn ctrl_shift(c: char) -> (KeyCode, KeyModifiers) {
    (KeyCode::Char(c), KeyModifiers::CONTROL | KeyModifiers::SHIFT)
}

fn with(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    (code, modifiers)
}

/// Menu shortcuts of the notepad.
#[derive(Debug, Clone)]
pub struct NotepadKeys {
    pub new_tab: Binding,
    pub close_tab: Binding,
    pub next_tab: Binding,
    pub prev_tab: Binding,
    pub move_tab_left: Binding,
    pub move_tab_right: Binding,
    pub new_window: Binding,
    pub switch_window: Binding,
    pub open: Binding,
    pub save: Binding,
    pub save_as: Binding,
    pub close_window: Binding,
    pub zoom_in: Binding,
    pub zoom_out: Binding,
    pub zoom_reset: Binding,
    pub help: Binding,
}

impl Default for NotepadKeys {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        Self {
            new_tab: Binding::new(vec![ctrl('t')]).with_help("ctrl+t", "new tab"),
            close_tab: Binding::new(vec![ctrl('w')]).with_help("ctrl+w", "close tab"),
            next_tab: Binding::new(vec![with(KeyCode::Right, KeyModifiers::CONTROL)])
                .with_help("ctrl+→", "next tab"),
            prev_tab: Binding::new(vec![with(KeyCode::Left, KeyModifiers::CONTROL)])
                .with_help("ctrl+←", "previous tab"),
            move_tab_left: Binding::new(vec![with(KeyCode::Left, KeyModifiers::ALT)])
                .with_help("alt+←", "move tab left"),
            move_tab_right: Binding::new(vec![with(KeyCode::Right, KeyModifiers::ALT)])
                .with_help("alt+→", "move tab right"),
            new_window: Binding::new(vec![ctrl('n'), ctrl_shift('N')])
                .with_help("ctrl+n", "new window"),
            switch_window: Binding::new(vec![with(KeyCode::F(6), none)])
                .with_help("f6", "switch window"),
            open: Binding::new(vec![ctrl('o')]).with_help("ctrl+o", "open"),
            save: Binding::new(vec![ctrl('s')]).with_help("ctrl+s", "save"),
            save_as: Binding::new(vec![
                ctrl_shift('s'),
                ctrl_shift('S'),
                with(KeyCode::F(12), none),
            ])
            .with_help("f12", "save as"),
            close_window: Binding::new(vec![ctrl('q')]).with_help("ctrl+q", "close window"),
            zoom_in: Binding::new(vec![ctrl('='), ctrl('+')]).with_help("ctrl+=", "zoom in"),
            zoom_out: Binding::new(vec![ctrl('-')]).with_help("ctrl+-", "zoom out"),
            zoom_reset: Binding::new(vec![ctrl('0')]).with_help("ctrl+0", "default zoom"),
            help: Binding::new(vec![with(KeyCode::F(1), none)]).with_help("f1", "help"),
        }
    }
}

impl NotepadKeys {
    /// The menu command bound to `key`. Save-as is checked before save so
    /// that ctrl+shift+s is not taken for ctrl+s.
    pub fn command(&self, key: &KeyMsg) -> Option<Command> {
        let table = [
            (&self.save_as, Command::SaveAs),
            (&self.save, Command::Save),
            (&self.open, Command::Open),
            (&self.new_tab, Command::NewTab),
            (&self.close_tab, Command::CloseCurrentTab),
            (&self.next_tab, Command::NextTab),
            (&self.prev_tab, Command::PrevTab),
            (&self.move_tab_left, Command::MoveTabLeft),
            (&self.move_tab_right, Command::MoveTabRight),
            (&self.new_window, Command::NewWindow),
            (&self.close_window, Command::CloseWindow),
            (&self.zoom_in, Command::ZoomIn),
            (&self.zoom_out, Command::ZoomOut),
            (&self.zoom_reset, Command::RestoreZoom),
        ];
        table
            .into_iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, command)| command)
    }
}

impl KeyMap for NotepadKeys {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.open,
            &self.save,
            &self.new_tab,
            &self.close_tab,
            &self.close_window,
            &self.help,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.open, &self.save, &self.save_as, &self.close_window],
            vec![
                &self.new_tab,
                &self.close_tab,
                &self.next_tab,
                &self.prev_tab,
                &self.move_tab_left,
                &self.move_tab_right,
            ],
            vec![
                &self.new_window,
                &self.switch_window,
                &self.zoom_in,
                &self.zoom_out,
                &self.zoom_reset,
                &self.help,
            ],
        ]
    }
}

/// The notepad program.
pub struct NotepadApp {
    windows: AppContext<Notepad>,
    settings: NotepadSettings,
    keys: NotepadKeys,
    help: help::Model,
    /// Text typed into a path dialog.
    input: String,
    width: usize,
    height: usize,
}

impl NotepadApp {
    /// One window with one untitled tab.
    pub fn new(settings: NotepadSettings) -> Self {
        let mut windows = AppContext::new();
        windows.open(Notepad::new(settings.clone()));
        let mut app = Self {
            windows,
            settings,
            keys: NotepadKeys::default(),
            help: help::Model::new(),
            input: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        };
        app.layout();
        app
    }

    pub fn windows(&self) -> &AppContext<Notepad> {
        &self.windows
    }

    /// The focused window.
    pub fn active(&self) -> Option<&Notepad> {
        self.windows.active()
    }

    fn layout(&mut self) {
        let width = self.width.saturating_sub(2);
        let height = self.height.saturating_sub(CHROME_ROWS);
        self.help.width = width;
        for (_, pad) in self.windows.iter_mut() {
            pad.resize(width, height);
        }
    }

    fn on_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if let Some(prompt) = self.active().and_then(Notepad::prompt).cloned() {
            let reply = self.reply_for(&prompt, key)?;
            let flow = self.windows.active_mut()?.answer(reply);
            return self.follow(flow);
        }

        if self.keys.help.matches(key) {
            self.help.show_all = !self.help.show_all;
            return None;
        }
        if self.keys.switch_window.matches(key) {
            self.windows.focus_next();
            return None;
        }
        if let Some(command) = self.keys.command(key) {
            let flow = self.windows.active_mut()?.run(command);
            return self.follow(flow);
        }
        self.windows.active_mut()?.handle_key(key);
        None
    }

    /// Turns a key into an answer for the open dialog. Editing keys of the
    /// path dialogs change the input and give no answer yet.
    fn reply_for(&mut self, prompt: &Prompt, key: &KeyMsg) -> Option<Reply> {
        match prompt {
            Prompt::OpenPaths | Prompt::SavePath { .. } => {
                let open = matches!(prompt, Prompt::OpenPaths);
                match key.key {
                    KeyCode::Enter => {
                        let text = std::mem::take(&mut self.input);
                        Some(if open {
                            Reply::Paths(parse_paths(&text))
                        } else {
                            let text = text.trim();
                            Reply::Path((!text.is_empty()).then(|| PathBuf::from(text)))
                        })
                    }
                    KeyCode::Esc => {
                        self.input.clear();
                        Some(if open {
                            Reply::Paths(Vec::new())
                        } else {
                            Reply::Path(None)
                        })
                    }
                    KeyCode::Backspace => {
                        self.input.pop();
                        None
                    }
                    KeyCode::Char(c)
                        if !key
                            .modifiers
                            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                    {
                        self.input.push(c);
                        None
                    }
                    _ => None,
                }
            }
            Prompt::SaveChanges { .. } => match key.key {
                KeyCode::Char('s') | KeyCode::Char('y') | KeyCode::Enter => {
                    Some(Reply::Choice(SaveChoice::Save))
                }
                KeyCode::Char('d') | KeyCode::Char('n') => Some(Reply::Choice(SaveChoice::Discard)),
                KeyCode::Char('c') | KeyCode::Esc => Some(Reply::Choice(SaveChoice::Cancel)),
                _ => None,
            },
            Prompt::ConfirmClose => match key.key {
                KeyCode::Char('y') | KeyCode::Enter => Some(Reply::Confirm(true)),
                KeyCode::Char('n') | KeyCode::Esc => Some(Reply::Confirm(false)),
                _ => None,
            },
            Prompt::Warning { .. } => match key.key {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Reply::Dismiss),
                _ => None,
            },
        }
    }

    fn follow(&mut self, flow: Flow) -> Option<Cmd> {
        match flow {
            Flow::Prompt(Prompt::SavePath { suggested }) => {
                self.input = suggested;
                None
            }
            Flow::Prompt(_) => {
                self.input.clear();
                None
            }
            Flow::Done(Outcome::Nothing) => None,
            Flow::Done(Outcome::OpenWindow) => {
                self.windows.open(Notepad::new(self.settings.clone()));
                self.layout();
                None
            }
            Flow::Done(Outcome::CloseWindow) => {
                let id = self.windows.active_id()?;
                self.windows.close(id);
                if self.windows.is_empty() {
                    tracing::info!("last notepad window closed");
                    return Some(quit());
                }
                None
            }
        }
    }

    fn tab_bar(&self, pad: &Notepad) -> String {
        let selected = Style::new().reverse(true);
        pad.tab_labels()
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let text = format!(" {label} ");
                if i == pad.current_index() {
                    selected.render(&text)
                } else {
                    text
                }
            })
            .collect::<Vec<_>>()
            .join("│")
    }

    fn dialog_line(&self, prompt: Option<&Prompt>) -> String {
        match prompt {
            None => String::new(),
            Some(Prompt::OpenPaths) => format!("Open (paths separated by ;): {}▏", self.input),
            Some(Prompt::SavePath { .. }) => format!("Save as: {}▏", self.input),
            Some(Prompt::SaveChanges { name }) => {
                format!("Save changes to {name}? [s]ave [d]iscard [c]ancel")
            }
            Some(Prompt::ConfirmClose) => "Really close? [y]es [n]o".to_string(),
            Some(Prompt::Warning { message }) => {
                format!("Warning: {}  [enter]", message.replace('\n', "; "))
            }
        }
    }
}

impl Model for NotepadApp {
    fn init() -> (Self, Option<Cmd>) {
        (NotepadApp::new(config::get().notepad.clone()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.on_key(key);
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = size.width as usize;
            self.height = size.height as usize;
            self.layout();
        }
        None
    }

    fn view(&self) -> String {
        let Some(pad) = self.active() else {
            return String::new();
        };

        let mut title = pad.title();
        if self.windows.len() > 1 {
            title = format!(
                "{title} [{}/{}]",
                self.windows.active_index() + 1,
                self.windows.len()
            );
        }

        let mut body = vec![self.tab_bar(pad)];
        match pad.current() {
            Some(doc) => {
                body.push(doc.editor().view());
                let (row, col) = doc.editor().cursor();
                body.push(format!(
                    "Ln {}, Col {}  ·  {}pt",
                    row + 1,
                    col + 1,
                    doc.font_size()
                ));
            }
            None => body.push(String::new()),
        }
        body.push(self.dialog_line(pad.prompt()));
        body.push(self.help.view(&self.keys));

        frame(&title, &body.join("\n"), self.width, self.height)
    }
}
