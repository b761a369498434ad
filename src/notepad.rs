//! One notepad window: its tabs and the flows that may need the user.
//!
//! Commands that can be answered immediately (new tab, zoom, switching
//! tabs) return [`Flow::Done`] straight away. Commands that need a decision
//! (save with no file name, unsaved changes, closing the window) return
//! [`Flow::Prompt`]; the window then waits for [`Notepad::answer`] and
//! refuses other commands until the flow finishes. The view draws whatever
//! [`Notepad::prompt`] returns as a modal dialog.
//!
//! ```rust
//! use termdesk::notepad::{Command, Flow, Notepad, NotepadSettings, Outcome, Prompt, Reply};
//!
//! let mut pad = Notepad::new(NotepadSettings::default());
//! pad.current_mut().unwrap().insert_str("draft");
//!
//! // Closing the only tab closes the window, which asks first.
//! assert!(matches!(pad.run(Command::CloseWindow), Flow::Prompt(Prompt::ConfirmClose)));
//! assert!(matches!(pad.answer(Reply::Confirm(true)), Flow::Prompt(Prompt::SaveChanges { .. })));
//! ```

use crate::document::{Document, DEFAULT_UNTITLED};
use crate::error::DocumentError;
use bubbletea_rs::KeyMsg;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tunables of the notepad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotepadSettings {
    /// Default point size; zoom restore returns here.
    pub font_size: u16,
    /// Points added or removed per zoom step.
    pub zoom_step: u16,
    /// Name of documents without a file.
    pub untitled: String,
    /// Suffix of the window title.
    pub app_name: String,
}

impl Default for NotepadSettings {
    fn default() -> Self {
        Self {
            font_size: 11,
            zoom_step: 2,
            untitled: DEFAULT_UNTITLED.to_string(),
            app_name: "Notepad".to_string(),
        }
    }
}

/// Menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add an untitled tab and switch to it.
    NewTab,
    /// Ask the application for another window.
    NewWindow,
    /// Open one or more files.
    Open,
    /// Save the current tab, asking for a path if it has none.
    Save,
    /// Save the current tab under a new path.
    SaveAs,
    /// Close the tab at the index.
    CloseTab(usize),
    /// Close the current tab.
    CloseCurrentTab,
    /// Close this window.
    CloseWindow,
    /// Larger text in the current tab.
    ZoomIn,
    /// Smaller text in the current tab.
    ZoomOut,
    /// Default text size in the current tab.
    RestoreZoom,
    /// Switch to the next tab.
    NextTab,
    /// Switch to the previous tab.
    PrevTab,
    /// Move the current tab one place left.
    MoveTabLeft,
    /// Move the current tab one place right.
    MoveTabRight,
}

/// A question for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Which files to open.
    OpenPaths,
    /// Where to save.
    SavePath {
        /// Proposed file name.
        suggested: String,
    },
    /// Save, discard or cancel unsaved changes to the named tab.
    SaveChanges {
        /// Tab name without the `*`.
        name: String,
    },
    /// "Really close?" yes/no.
    ConfirmClose,
    /// A failure to acknowledge.
    Warning {
        /// What went wrong, naming the file.
        message: String,
    },
}

/// Answer to a save/discard/cancel question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    /// Save, then go on.
    Save,
    /// Drop the changes and go on.
    Discard,
    /// Stop the whole operation.
    Cancel,
}

/// The user's answer to a [`Prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Files chosen for [`Prompt::OpenPaths`]; empty cancels.
    Paths(Vec<PathBuf>),
    /// Target for [`Prompt::SavePath`]; `None` cancels.
    Path(Option<PathBuf>),
    /// Answer to [`Prompt::SaveChanges`].
    Choice(SaveChoice),
    /// Answer to [`Prompt::ConfirmClose`].
    Confirm(bool),
    /// Acknowledges a [`Prompt::Warning`].
    Dismiss,
}

/// What the application must do once a flow finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing beyond redrawing.
    Nothing,
    /// Open another window.
    OpenWindow,
    /// Close this window.
    CloseWindow,
}

/// Result of a command or an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// The window waits for an answer to this.
    Prompt(Prompt),
    /// The flow is over.
    Done(Outcome),
}

/// Where a flow continues once unsaved changes are dealt with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Then {
    Nothing,
    OpenDialog,
    RemoveTab(usize),
    /// Tabs `0..remaining` still need checking, last first.
    CloseWindow { remaining: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    OpenPaths,
    SavePath(Then),
    SaveChoice(Then),
    ConfirmClose,
    Warning,
}

/// A notepad window.
#[derive(Debug, Clone)]
pub struct Notepad {
    tabs: Vec<Document>,
    current: usize,
    settings: NotepadSettings,
    pending: Option<(Pending, Prompt)>,
    editor_size: Option<(usize, usize)>,
}

impl Notepad {
    /// A window with one untitled tab.
    pub fn new(settings: NotepadSettings) -> Self {
        let mut pad = Self {
            tabs: Vec::new(),
            current: 0,
            settings,
            pending: None,
            editor_size: None,
        };
        pad.add_tab(Document::new(pad.settings.font_size));
        pad
    }

    /// The settings this window was created with.
    pub fn settings(&self) -> &NotepadSettings {
        &self.settings
    }

    /// All tabs in display order.
    pub fn tabs(&self) -> &[Document] {
        &self.tabs
    }

    /// Index of the current tab.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current tab.
    pub fn current(&self) -> Option<&Document> {
        self.tabs.get(self.current)
    }

    /// The current tab, mutably.
    pub fn current_mut(&mut self) -> Option<&mut Document> {
        self.tabs.get_mut(self.current)
    }

    /// Tab texts, with `*` on modified tabs.
    pub fn tab_labels(&self) -> Vec<String> {
        self.tabs
            .iter()
            .map(|d| d.tab_label(&self.settings.untitled))
            .collect()
    }

    /// `"<name>[*] - Notepad"`, or just the application name without tabs.
    pub fn title(&self) -> String {
        match self.current() {
            Some(doc) => format!(
                "{} - {}",
                doc.tab_label(&self.settings.untitled),
                self.settings.app_name
            ),
            None => self.settings.app_name.clone(),
        }
    }

    /// Sets the text area size of every tab, and of tabs opened later.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.editor_size = Some((width, height));
        for doc in &mut self.tabs {
            doc.editor_mut().set_dimensions(width, height);
        }
    }

    /// The question the window is waiting on, if any.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.pending.as_ref().map(|(_, prompt)| prompt)
    }

    /// Sends an editing key to the current tab. Ignored while a prompt is
    /// open. Returns whether the text changed.
    pub fn handle_key(&mut self, key: &KeyMsg) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.current_mut()
            .map(|doc| doc.handle_key(key))
            .unwrap_or(false)
    }

    /// Runs a menu command. While a prompt is open, commands are refused and
    /// the open prompt is returned again.
    pub fn run(&mut self, command: Command) -> Flow {
        if let Some((_, prompt)) = &self.pending {
            return Flow::Prompt(prompt.clone());
        }
        tracing::debug!(?command, "notepad command");

        match command {
            Command::NewTab => {
                self.add_tab(Document::new(self.settings.font_size));
                Flow::Done(Outcome::Nothing)
            }
            Command::NewWindow => Flow::Done(Outcome::OpenWindow),
            Command::Open => self.maybe_save(Then::OpenDialog),
            Command::Save => {
                if self.tabs.is_empty() {
                    return Flow::Done(Outcome::Nothing);
                }
                self.save_current(Then::Nothing)
            }
            Command::SaveAs => {
                if self.tabs.is_empty() {
                    return Flow::Done(Outcome::Nothing);
                }
                self.ask_save_path(Then::Nothing)
            }
            Command::CloseTab(index) => self.close_tab(index),
            Command::CloseCurrentTab => self.close_tab(self.current),
            Command::CloseWindow => self.ask(Pending::ConfirmClose, Prompt::ConfirmClose),
            Command::ZoomIn => {
                let step = self.settings.zoom_step;
                if let Some(doc) = self.current_mut() {
                    doc.set_font_size(doc.font_size().saturating_add(step));
                }
                Flow::Done(Outcome::Nothing)
            }
            Command::ZoomOut => {
                let step = self.settings.zoom_step;
                if let Some(doc) = self.current_mut() {
                    doc.set_font_size(doc.font_size().saturating_sub(step));
                }
                Flow::Done(Outcome::Nothing)
            }
            Command::RestoreZoom => {
                let size = self.settings.font_size;
                if let Some(doc) = self.current_mut() {
                    doc.set_font_size(size);
                }
                Flow::Done(Outcome::Nothing)
            }
            Command::NextTab => {
                if !self.tabs.is_empty() {
                    self.current = (self.current + 1) % self.tabs.len();
                }
                Flow::Done(Outcome::Nothing)
            }
            Command::PrevTab => {
                if !self.tabs.is_empty() {
                    self.current = (self.current + self.tabs.len() - 1) % self.tabs.len();
                }
                Flow::Done(Outcome::Nothing)
            }
            Command::MoveTabLeft => {
                if self.current > 0 && self.current < self.tabs.len() {
                    self.tabs.swap(self.current, self.current - 1);
                    self.current -= 1;
                }
                Flow::Done(Outcome::Nothing)
            }
            Command::MoveTabRight => {
                if self.current + 1 < self.tabs.len() {
                    self.tabs.swap(self.current, self.current + 1);
                    self.current += 1;
                }
                Flow::Done(Outcome::Nothing)
            }
        }
    }

    /// Answers the open prompt. A reply of the wrong kind re-asks the same
    /// question; a reply with no prompt open does nothing.
    pub fn answer(&mut self, reply: Reply) -> Flow {
        let Some((pending, prompt)) = self.pending.take() else {
            return Flow::Done(Outcome::Nothing);
        };
        tracing::debug!(?prompt, ?reply, "prompt answered");

        match (pending, reply) {
            (Pending::OpenPaths, Reply::Paths(paths)) => {
                let errors = self.open_paths(&paths);
                if errors.is_empty() {
                    Flow::Done(Outcome::Nothing)
                } else {
                    let message = errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("\n");
                    self.warn(message)
                }
            }
            (Pending::SavePath(then), Reply::Path(Some(path))) => self.write_current(path, then),
            (Pending::SavePath(_), Reply::Path(None)) => Flow::Done(Outcome::Nothing),
            (Pending::SaveChoice(then), Reply::Choice(choice)) => match choice {
                SaveChoice::Save => self.save_current(then),
                SaveChoice::Discard => self.continue_with(then),
                SaveChoice::Cancel => Flow::Done(Outcome::Nothing),
            },
            (Pending::ConfirmClose, Reply::Confirm(true)) => {
                let remaining = self.tabs.len();
                self.continue_with(Then::CloseWindow { remaining })
            }
            (Pending::ConfirmClose, Reply::Confirm(false)) => Flow::Done(Outcome::Nothing),
            (Pending::Warning, Reply::Dismiss) => Flow::Done(Outcome::Nothing),
            (pending, _) => self.ask(pending, prompt),
        }
    }

    /// Opens each path as UTF-8 text.
    ///
    /// A single file replaces the current tab when that tab is untitled,
    /// empty and unmodified; otherwise every file gets a new tab. Files that
    /// fail to load are skipped and their errors returned.
    pub fn open_paths(&mut self, paths: &[PathBuf]) -> Vec<DocumentError> {
        let mut errors = Vec::new();
        for path in paths {
            let content = match Document::read(path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(error = %e, "open failed");
                    errors.push(e);
                    continue;
                }
            };
            tracing::info!(path = %path.display(), "document opened");

            let reuse = paths.len() == 1 && self.current().is_some_and(Document::is_pristine);
            if reuse {
                if let Some(doc) = self.current_mut() {
                    doc.load(path.clone(), &content);
                    continue;
                }
            }
            let doc = Document::with_content(Some(path.clone()), &content, self.settings.font_size);
            self.add_tab(doc);
        }
        errors
    }

    fn add_tab(&mut self, mut doc: Document) {
        if let Some((width, height)) = self.editor_size {
            doc.editor_mut().set_dimensions(width, height);
        }
        self.tabs.push(doc);
        self.current = self.tabs.len() - 1;
    }

    fn close_tab(&mut self, index: usize) -> Flow {
        if index >= self.tabs.len() {
            return Flow::Done(Outcome::Nothing);
        }
        self.current = index;
        if self.tabs.len() == 1 {
            // The last tab takes the window with it; the window flow asks
            // about unsaved changes itself.
            return self.ask(Pending::ConfirmClose, Prompt::ConfirmClose);
        }
        self.maybe_save(Then::RemoveTab(index))
    }

    fn maybe_save(&mut self, then: Then) -> Flow {
        match self.current() {
            Some(doc) if doc.is_modified() => {
                let name = doc.display_name(&self.settings.untitled);
                self.ask(Pending::SaveChoice(then), Prompt::SaveChanges { name })
            }
            _ => self.continue_with(then),
        }
    }

    fn save_current(&mut self, then: Then) -> Flow {
        match self.current().and_then(|d| d.path().map(|p| p.to_path_buf())) {
            Some(path) => self.write_current(path, then),
            None => self.ask_save_path(then),
        }
    }

    fn ask_save_path(&mut self, then: Then) -> Flow {
        let suggested = match self.current().and_then(Document::path) {
            Some(_) => self
                .current()
                .map(|d| d.display_name(&self.settings.untitled))
                .unwrap_or_default(),
            None => format!("{}.txt", self.settings.untitled),
        };
        self.ask(Pending::SavePath(then), Prompt::SavePath { suggested })
    }

    fn write_current(&mut self, path: PathBuf, then: Then) -> Flow {
        let Some(doc) = self.current_mut() else {
            return Flow::Done(Outcome::Nothing);
        };
        match doc.save_to(&path) {
            Ok(()) => self.continue_with(then),
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.warn(e.to_string())
            }
        }
    }

    fn continue_with(&mut self, then: Then) -> Flow {
        match then {
            Then::Nothing => Flow::Done(Outcome::Nothing),
            Then::OpenDialog => self.ask(Pending::OpenPaths, Prompt::OpenPaths),
            Then::RemoveTab(index) => {
                if index < self.tabs.len() {
                    self.tabs.remove(index);
                    if self.current >= self.tabs.len() {
                        self.current = self.tabs.len().saturating_sub(1);
                    }
                }
                Flow::Done(Outcome::Nothing)
            }
            Then::CloseWindow { remaining: 0 } => {
                tracing::info!("notepad window closing");
                Flow::Done(Outcome::CloseWindow)
            }
            Then::CloseWindow { remaining } => {
                self.current = remaining - 1;
                self.maybe_save(Then::CloseWindow {
                    remaining: remaining - 1,
                })
            }
        }
    }

    fn warn(&mut self, message: String) -> Flow {
        self.ask(Pending::Warning, Prompt::Warning { message })
    }

    fn ask(&mut self, pending: Pending, prompt: Prompt) -> Flow {
        self.pending = Some((pending, prompt.clone()));
        Flow::Prompt(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn pad() -> Notepad {
        Notepad::new(NotepadSettings::default())
    }

    fn dirty_pad() -> Notepad {
        let mut p = pad();
        p.current_mut().unwrap().insert_str("draft");
        p
    }

    #[test]
    fn test_new_window_has_one_untitled_tab() {
        let p = pad();
        assert_eq!(p.tab_labels(), vec!["Untitled"]);
        assert_eq!(p.title(), "Untitled - Notepad");
        assert!(p.prompt().is_none());
    }

    #[test]
    fn test_title_tracks_dirty_flag() {
        let p = dirty_pad();
        assert_eq!(p.title(), "Untitled* - Notepad");
        assert_eq!(p.tab_labels(), vec!["Untitled*"]);
    }

    #[test]
    fn test_new_tab_becomes_current() {
        let mut p = pad();
        assert_eq!(p.run(Command::NewTab), Flow::Done(Outcome::Nothing));
        assert_eq!(p.tabs().len(), 2);
        assert_eq!(p.current_index(), 1);
    }

    #[test]
    fn test_new_window_is_an_outcome() {
        assert_eq!(pad().run(Command::NewWindow), Flow::Done(Outcome::OpenWindow));
    }

    #[test]
    fn test_save_untitled_asks_for_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let mut p = dirty_pad();
        assert_eq!(
            p.run(Command::Save),
            Flow::Prompt(Prompt::SavePath {
                suggested: "Untitled.txt".into()
            })
        );
        assert_eq!(
            p.answer(Reply::Path(Some(path.clone()))),
            Flow::Done(Outcome::Nothing)
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "draft");
        assert_eq!(p.title(), "a.txt - Notepad");
    }

    #[test]
    fn test_save_with_path_writes_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.txt");
        fs::write(&path, "old").unwrap();
        let mut p = pad();
        assert!(p.open_paths(&[path.clone()]).is_empty());
        p.current_mut().unwrap().insert_str("new ");
        assert_eq!(p.run(Command::Save), Flow::Done(Outcome::Nothing));
        assert_eq!(fs::read_to_string(&path).unwrap(), "new old");
        assert!(!p.current().unwrap().is_modified());
    }

    #[test]
    fn test_save_as_unwritable_path_warns_and_stays_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no-such-dir").join("x.txt");
        let mut p = dirty_pad();
        assert!(matches!(p.run(Command::SaveAs), Flow::Prompt(Prompt::SavePath { .. })));
        let flow = p.answer(Reply::Path(Some(bad)));
        match flow {
            Flow::Prompt(Prompt::Warning { message }) => assert!(message.contains("x.txt")),
            other => panic!("expected a warning, got {other:?}"),
        }
        assert!(p.current().unwrap().is_modified());
        assert!(p.current().unwrap().path().is_none());
        assert_eq!(p.answer(Reply::Dismiss), Flow::Done(Outcome::Nothing));
        assert!(p.prompt().is_none());
    }

    #[test]
    fn test_save_as_cancel_changes_nothing() {
        let mut p = dirty_pad();
        p.run(Command::SaveAs);
        assert_eq!(p.answer(Reply::Path(None)), Flow::Done(Outcome::Nothing));
        assert!(p.current().unwrap().is_modified());
    }

    #[test]
    fn test_commands_refused_while_prompting() {
        let mut p = dirty_pad();
        let first = p.run(Command::SaveAs);
        assert_eq!(p.run(Command::NewTab), first);
        assert_eq!(p.tabs().len(), 1);
    }

    #[test]
    fn test_wrong_reply_reasks() {
        let mut p = pad();
        p.run(Command::CloseWindow);
        assert_eq!(p.answer(Reply::Dismiss), Flow::Prompt(Prompt::ConfirmClose));
        assert_eq!(p.prompt(), Some(&Prompt::ConfirmClose));
    }

    #[test]
    fn test_open_reuses_pristine_tab_for_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.txt");
        fs::write(&path, "hello").unwrap();
        let mut p = pad();
        assert_eq!(p.run(Command::Open), Flow::Prompt(Prompt::OpenPaths));
        assert_eq!(p.answer(Reply::Paths(vec![path])), Flow::Done(Outcome::Nothing));
        assert_eq!(p.tabs().len(), 1);
        assert_eq!(p.tab_labels(), vec!["one.txt"]);
        assert_eq!(p.current().unwrap().text(), "hello");
    }

    #[test]
    fn test_open_many_files_uses_new_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "A").unwrap();
        fs::write(&b, "B").unwrap();
        let mut p = pad();
        assert!(p.open_paths(&[a, b]).is_empty());
        assert_eq!(p.tab_labels(), vec!["Untitled", "a.txt", "b.txt"]);
        assert_eq!(p.current_index(), 2);
    }

    #[test]
    fn test_open_failure_warns_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "ok").unwrap();
        let missing = dir.path().join("missing.txt");
        let mut p = pad();
        p.run(Command::Open);
        match p.answer(Reply::Paths(vec![missing, good])) {
            Flow::Prompt(Prompt::Warning { message }) => {
                assert!(message.contains("missing.txt"));
            }
            other => panic!("expected a warning, got {other:?}"),
        }
        assert!(p.tab_labels().contains(&"good.txt".to_string()));
    }

    #[test]
    fn test_open_with_unsaved_changes_asks_first() {
        let mut p = dirty_pad();
        assert_eq!(
            p.run(Command::Open),
            Flow::Prompt(Prompt::SaveChanges {
                name: "Untitled".into()
            })
        );
        assert_eq!(
            p.answer(Reply::Choice(SaveChoice::Discard)),
            Flow::Prompt(Prompt::OpenPaths)
        );
    }

    #[test]
    fn test_open_cancelled_at_save_question() {
        let mut p = dirty_pad();
        p.run(Command::Open);
        assert_eq!(
            p.answer(Reply::Choice(SaveChoice::Cancel)),
            Flow::Done(Outcome::Nothing)
        );
        assert!(p.prompt().is_none());
    }

    #[test]
    fn test_close_modified_tab_cancel_keeps_everything() {
        let mut p = pad();
        p.run(Command::NewTab);
        p.current_mut().unwrap().insert_str("text");
        assert!(matches!(
            p.run(Command::CloseCurrentTab),
            Flow::Prompt(Prompt::SaveChanges { .. })
        ));
        p.answer(Reply::Choice(SaveChoice::Cancel));
        assert_eq!(p.tabs().len(), 2);
        assert!(p.current().unwrap().is_modified());
    }

    #[test]
    fn test_close_modified_tab_discard_removes_it() {
        let mut p = pad();
        p.run(Command::NewTab);
        p.current_mut().unwrap().insert_str("text");
        p.run(Command::CloseTab(1));
        assert_eq!(
            p.answer(Reply::Choice(SaveChoice::Discard)),
            Flow::Done(Outcome::Nothing)
        );
        assert_eq!(p.tabs().len(), 1);
        assert_eq!(p.current_index(), 0);
    }

    #[test]
    fn test_close_clean_tab_needs_no_prompt() {
        let mut p = pad();
        p.run(Command::NewTab);
        assert_eq!(p.run(Command::CloseTab(0)), Flow::Done(Outcome::Nothing));
        assert_eq!(p.tabs().len(), 1);
    }

    #[test]
    fn test_close_last_tab_closes_window() {
        let mut p = pad();
        assert_eq!(p.run(Command::CloseCurrentTab), Flow::Prompt(Prompt::ConfirmClose));
        assert_eq!(p.answer(Reply::Confirm(true)), Flow::Done(Outcome::CloseWindow));
    }

    #[test]
    fn test_close_window_declined() {
        let mut p = dirty_pad();
        p.run(Command::CloseWindow);
        assert_eq!(p.answer(Reply::Confirm(false)), Flow::Done(Outcome::Nothing));
        assert!(p.current().unwrap().is_modified());
    }

    #[test]
    fn test_close_window_walks_tabs_last_first() {
        let mut p = pad();
        p.current_mut().unwrap().insert_str("first");
        p.run(Command::NewTab);
        p.run(Command::NewTab);
        p.current_mut().unwrap().insert_str("third");

        p.run(Command::CloseWindow);
        assert!(matches!(
            p.answer(Reply::Confirm(true)),
            Flow::Prompt(Prompt::SaveChanges { .. })
        ));
        assert_eq!(p.current_index(), 2);
        // The clean middle tab is skipped.
        assert!(matches!(
            p.answer(Reply::Choice(SaveChoice::Discard)),
            Flow::Prompt(Prompt::SaveChanges { .. })
        ));
        assert_eq!(p.current_index(), 0);
        assert_eq!(
            p.answer(Reply::Choice(SaveChoice::Discard)),
            Flow::Done(Outcome::CloseWindow)
        );
    }

    #[test]
    fn test_close_window_cancel_midway() {
        let mut p = dirty_pad();
        p.run(Command::NewTab);
        p.current_mut().unwrap().insert_str("x");
        p.run(Command::CloseWindow);
        p.answer(Reply::Confirm(true));
        p.answer(Reply::Choice(SaveChoice::Discard));
        assert_eq!(
            p.answer(Reply::Choice(SaveChoice::Cancel)),
            Flow::Done(Outcome::Nothing)
        );
        assert_eq!(p.tabs().len(), 2);
    }

    #[test]
    fn test_close_window_save_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = dirty_pad();
        p.run(Command::CloseWindow);
        p.answer(Reply::Confirm(true));
        assert!(matches!(
            p.answer(Reply::Choice(SaveChoice::Save)),
            Flow::Prompt(Prompt::SavePath { .. })
        ));
        let bad = dir.path().join("nope").join("f.txt");
        assert!(matches!(
            p.answer(Reply::Path(Some(bad))),
            Flow::Prompt(Prompt::Warning { .. })
        ));
        assert_eq!(p.answer(Reply::Dismiss), Flow::Done(Outcome::Nothing));
        assert!(p.current().unwrap().is_modified());
    }

    #[test]
    fn test_resize_applies_to_new_tabs() {
        let mut p = pad();
        p.resize(30, 4);
        p.run(Command::NewTab);
        for doc in p.tabs() {
            assert_eq!(doc.editor().view().split('\n').count(), 4);
        }
    }

    #[test]
    fn test_zoom() {
        let mut p = pad();
        p.run(Command::ZoomIn);
        p.run(Command::ZoomIn);
        assert_eq!(p.current().unwrap().font_size(), 15);
        for _ in 0..20 {
            p.run(Command::ZoomOut);
        }
        assert_eq!(p.current().unwrap().font_size(), 1);
        p.run(Command::RestoreZoom);
        assert_eq!(p.current().unwrap().font_size(), 11);
    }

    #[test]
    fn test_tab_navigation_and_moving() {
        let mut p = pad();
        p.run(Command::NewTab);
        p.current_mut().unwrap().insert_str("second");
        p.run(Command::NextTab);
        assert_eq!(p.current_index(), 0);
        p.run(Command::PrevTab);
        assert_eq!(p.current_index(), 1);
        p.run(Command::MoveTabLeft);
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.tab_labels(), vec!["Untitled*", "Untitled"]);
        p.run(Command::MoveTabLeft);
        assert_eq!(p.current_index(), 0);
        p.run(Command::MoveTabRight);
        assert_eq!(p.tab_labels(), vec!["Untitled", "Untitled*"]);
    }
}
