//! Help line rendered from a [`KeyMap`].
//!
//! The short view lists bindings on one line separated by bullets and is
//! truncated with an ellipsis when it would exceed the width. The full view
//! lays each binding group out as a column.
//!
//! ```text
//! enter start • space pause • d delete • ? more • q quit
//! ```

use crate::key::{Binding, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles of the help view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Key names.
    pub key: Style,
    /// Descriptions.
    pub desc: Style,
    /// Separators and the ellipsis.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            key: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}

/// The help view.
#[derive(Debug, Clone)]
pub struct Model {
    /// Show the full, multi-column view.
    pub show_all: bool,
    /// Maximum width; 0 means unlimited.
    pub width: usize,
    /// Styles.
    pub styles: Styles,
    short_separator: String,
    full_separator: String,
    ellipsis: String,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            styles: Styles::default(),
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
        }
    }
}

impl Model {
    /// A short-view help model without width limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width limit.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the short or full view, depending on `show_all`.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// One line of `key desc` items.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        let mut out = String::new();
        let mut total_width = 0;
        for binding in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let item = format!("{}{}", sep, self.item(binding));
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.tail_if_full(total_width, item_width) {
                out.push_str(&tail);
                break;
            }
            total_width += item_width;
            out.push_str(&item);
        }
        out
    }

    /// Groups side by side, one binding per row.
    pub fn full_help_view(&self, groups: Vec<Vec<&Binding>>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        let mut columns: Vec<String> = Vec::new();
        let mut total_width = 0;
        for group in groups {
            let rows: Vec<String> = group
                .into_iter()
                .filter(|b| b.enabled())
                .map(|b| self.item(b))
                .collect();
            if rows.is_empty() {
                continue;
            }
            let column = rows.join("\n");
            let width = lipgloss::width_visible(&column);
            if let Some(tail) = self.tail_if_full(total_width, width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }
            total_width += width + lipgloss::width_visible(&separator);
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(column.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    fn item(&self, binding: &Binding) -> String {
        let help = binding.help();
        format!(
            "{} {}",
            self.styles.key.clone().inline(true).render(&help.key),
            self.styles.desc.clone().inline(true).render(&help.desc)
        )
    }

    fn tail_if_full(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(
            " {}",
            self.styles
                .separator
                .clone()
                .inline(true)
                .render(&self.ellipsis)
        );
        if total_width + lipgloss::width_visible(&tail) < self.width {
            Some(tail)
        } else {
            Some(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    struct Keys {
        start: Binding,
        quit: Binding,
        hidden: Binding,
    }

    impl Keys {
        fn new() -> Self {
            let mut hidden = Binding::new(vec![KeyCode::Char('x')]).with_help("x", "hidden");
            hidden.set_enabled(false);
            Self {
                start: Binding::new(vec![KeyCode::Enter]).with_help("enter", "start"),
                quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
                hidden,
            }
        }
    }

    impl KeyMap for Keys {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.start, &self.hidden, &self.quit]
        }

        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.start], vec![&self.quit, &self.hidden]]
        }
    }

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    #[test]
    fn test_short_view_skips_disabled() {
        let out = plain(&Model::new().view(&Keys::new()));
        assert_eq!(out, "enter start • q quit");
    }

    #[test]
    fn test_short_view_truncates() {
        let out = plain(&Model::new().with_width(14).view(&Keys::new()));
        assert!(out.starts_with("enter start"));
        assert!(!out.contains("quit"));
    }

    #[test]
    fn test_full_view_has_columns() {
        let mut help = Model::new();
        help.show_all = true;
        let out = plain(&help.view(&Keys::new()));
        assert!(out.contains("enter start"));
        assert!(out.contains("q quit"));
        assert!(!out.contains("hidden"));
    }
}
