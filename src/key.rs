//! Key bindings.
//!
//! A [`Binding`] is a set of key presses that trigger one command, plus the
//! short help text shown for it. Programs group their bindings in a struct
//! and implement [`KeyMap`] so the help view can list them.
//!
//! ```rust
//! use termdesk::key::Binding;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let save = Binding::new(vec![(KeyCode::Char('s'), KeyModifiers::CONTROL)])
//!     .with_help("ctrl+s", "save");
//! let quit = Binding::new(vec![KeyCode::Char('q'), KeyCode::Esc]).with_help("q", "quit");
//! assert_eq!(save.help().desc, "save");
//! assert!(quit.enabled());
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// One key together with the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Required modifiers.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// Whether `msg` is this key press.
    ///
    /// Shift is not compared for character keys unless the binding asks for
    /// it, because terminals disagree on whether to report it.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        let mut pressed = msg.modifiers;
        if matches!(self.code, KeyCode::Char(_)) && !self.modifiers.contains(KeyModifiers::SHIFT) {
            pressed.remove(KeyModifiers::SHIFT);
        }
        pressed == self.modifiers
    }
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// The text the help view shows for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// How the key is written, e.g. `"ctrl+s"`.
    pub key: String,
    /// What it does.
    pub desc: String,
}

/// A named group of key presses.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Binds the given keys.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Replaces the help text in place.
    pub fn set_help(&mut self, key: impl Into<String>, desc: impl Into<String>) {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the binding is active. Disabled bindings never match and are
    /// left out of the help view.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// The help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// The bound key presses.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Bindings a program exposes to the help view.
pub trait KeyMap {
    /// Bindings for the one-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings for the expanded help, one column per group.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_plain_key_matches_without_modifiers() {
        let b = Binding::new(vec![KeyCode::Enter]);
        assert!(b.matches(&press(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!b.matches(&press(KeyCode::Enter, KeyModifiers::CONTROL)));
        assert!(!b.matches(&press(KeyCode::Esc, KeyModifiers::NONE)));
    }

    #[test]
    fn test_modifier_binding() {
        let b = Binding::new(vec![(KeyCode::Char('s'), KeyModifiers::CONTROL)]);
        assert!(b.matches(&press(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&press(KeyCode::Char('s'), KeyModifiers::NONE)));
        // shift is ignored for characters unless requested
        assert!(b.matches(&press(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
    }

    #[test]
    fn test_shift_binding_requires_shift() {
        let b = Binding::new(vec![(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        )]);
        assert!(!b.matches(&press(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(b.matches(&press(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit");
        b.set_enabled(false);
        assert!(!b.enabled());
        assert!(!b.matches(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert_eq!(b.help().key, "q");
    }

    #[test]
    fn test_empty_binding_is_disabled() {
        let b = Binding::new(Vec::<KeyCode>::new());
        assert!(!b.enabled());
    }
}
