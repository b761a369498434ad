//! Multi-line plain-text buffer with a cursor.
//!
//! Each notepad tab owns one [`Model`]. Lines are stored separately and the
//! cursor column counts characters, not bytes, so non-ASCII text edits
//! correctly. The view scrolls to keep the cursor row visible.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;

#[derive(Debug, Clone)]
pub struct Model {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    offset: usize,
    width: usize,
    height: usize,
    cursor_style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
            offset: 0,
            width: 80,
            height: 24,
            cursor_style: Style::new().reverse(true),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_index(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(i, _)| i).unwrap_or(s.len())
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.set_dimensions(width, height);
        self
    }

    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.scroll_to_cursor();
    }

    /// Replaces the whole text and moves the cursor to the start.
    /// `\r\n` line endings are read as `\n`.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into().replace("\r\n", "\n");
        self.lines = value.split('\n').map(str::to_string).collect();
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.offset = 0;
    }

    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// `(row, column)` of the cursor, both zero-based.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let line = &mut self.lines[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, ch);
        self.cursor_col += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert_char(ch);
        }
    }

    pub fn insert_newline(&mut self) {
        let line = &self.lines[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        let right = line[at..].to_string();
        self.lines[self.cursor_row].truncate(at);
        self.lines.insert(self.cursor_row + 1, right);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.scroll_to_cursor();
    }

    /// Backspace. Returns whether anything was removed.
    pub fn delete_char_backward(&mut self) -> bool {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let at = byte_index(line, self.cursor_col - 1);
            line.remove(at);
            self.cursor_col -= 1;
            true
        } else if self.cursor_row > 0 {
            let current = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = char_len(&self.lines[self.cursor_row]);
            self.lines[self.cursor_row].push_str(&current);
            self.scroll_to_cursor();
            true
        } else {
            false
        }
    }

    /// Delete. Returns whether anything was removed.
    pub fn delete_char_forward(&mut self) -> bool {
        let len = char_len(&self.lines[self.cursor_row]);
        if self.cursor_col < len {
            let line = &mut self.lines[self.cursor_row];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
            true
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
            true
        } else {
            false
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.clamp_col();
        }
        self.scroll_to_cursor();
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.clamp_col();
        }
        self.scroll_to_cursor();
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = char_len(&self.lines[self.cursor_row]);
        }
        self.scroll_to_cursor();
    }

    pub fn move_cursor_right(&mut self) {
        let len = char_len(&self.lines[self.cursor_row]);
        if self.cursor_col < len {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
        self.scroll_to_cursor();
    }

    pub fn cursor_line_start(&mut self) {
        self.cursor_col = 0;
    }

    pub fn cursor_line_end(&mut self) {
        self.cursor_col = char_len(&self.lines[self.cursor_row]);
    }

    pub fn page_up(&mut self) {
        for _ in 0..self.height {
            self.move_cursor_up();
        }
    }

    pub fn page_down(&mut self) {
        for _ in 0..self.height {
            self.move_cursor_down();
        }
    }

    fn clamp_col(&mut self) {
        let len = char_len(&self.lines[self.cursor_row]);
        if self.cursor_col > len {
            self.cursor_col = len;
        }
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor_row < self.offset {
            self.offset = self.cursor_row;
        } else if self.cursor_row >= self.offset + self.height {
            self.offset = self.cursor_row + 1 - self.height;
        }
    }

    /// Applies an editing key. Returns `true` when the text changed.
    ///
    /// Keys with control or alt held are left to the caller.
    pub fn update(&mut self, key: &KeyMsg) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.key {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Tab => {
                self.insert_char('\t');
                true
            }
            KeyCode::Backspace => self.delete_char_backward(),
            KeyCode::Delete => self.delete_char_forward(),
            KeyCode::Left => {
                self.move_cursor_left();
                false
            }
            KeyCode::Right => {
                self.move_cursor_right();
                false
            }
            KeyCode::Up => {
                self.move_cursor_up();
                false
            }
            KeyCode::Down => {
                self.move_cursor_down();
                false
            }
            KeyCode::Home => {
                self.cursor_line_start();
                false
            }
            KeyCode::End => {
                self.cursor_line_end();
                false
            }
            KeyCode::PageUp => {
                self.page_up();
                false
            }
            KeyCode::PageDown => {
                self.page_down();
                false
            }
            _ => false,
        }
    }

    /// The visible rows with the cursor drawn in reverse video.
    pub fn view(&self) -> String {
        let end = (self.offset + self.height).min(self.lines.len());
        let mut rows: Vec<String> = Vec::with_capacity(self.height);

        for row in self.offset..end {
            let line = self.lines[row].replace('\t', "    ");
            if row == self.cursor_row {
                // Tabs were expanded above, so map the cursor column through them.
                let raw = &self.lines[row];
                let col: usize = raw
                    .chars()
                    .take(self.cursor_col)
                    .map(|c| if c == '\t' { 4 } else { 1 })
                    .sum();
                let at = byte_index(&line, col);
                let (before, rest) = line.split_at(at);
                let mut chars = rest.chars();
                let under = chars.next().map(String::from).unwrap_or_else(|| " ".into());
                rows.push(format!(
                    "{}{}{}",
                    before,
                    self.cursor_style.render(&under),
                    chars.as_str()
                ));
            } else {
                rows.push(line);
            }
        }
        while rows.len() < self.height {
            rows.push(String::new());
        }
        rows.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn typed(s: &str) -> Model {
        let mut m = Model::new();
        m.insert_str(s);
        m
    }

    #[test]
    fn test_value_round_trips_trailing_newline() {
        let mut m = Model::new();
        m.set_value("first\nsecond\n");
        assert_eq!(m.line_count(), 3);
        assert_eq!(m.value(), "first\nsecond\n");
    }

    #[test]
    fn test_crlf_normalized() {
        let mut m = Model::new();
        m.set_value("a\r\nb");
        assert_eq!(m.value(), "a\nb");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut m = typed("메모장");
        assert_eq!(m.cursor(), (0, 3));
        m.move_cursor_left();
        m.insert_char('x');
        assert_eq!(m.value(), "메모x장");
        assert!(m.delete_char_backward());
        assert!(m.delete_char_forward());
        assert_eq!(m.value(), "메모");
    }

    #[test]
    fn test_newline_splits_and_backspace_joins() {
        let mut m = typed("hello");
        m.move_cursor_left();
        m.move_cursor_left();
        m.insert_newline();
        assert_eq!(m.value(), "hel\nlo");
        assert_eq!(m.cursor(), (1, 0));
        assert!(m.delete_char_backward());
        assert_eq!(m.value(), "hello");
        assert_eq!(m.cursor(), (0, 3));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut m = Model::new();
        assert!(!m.delete_char_backward());
        assert!(!m.delete_char_forward());
        assert!(m.is_empty());
    }

    #[test]
    fn test_update_reports_changes() {
        let mut m = Model::new();
        assert!(m.update(&key(KeyCode::Char('a'))));
        assert!(!m.update(&key(KeyCode::Left)));
        assert!(!m.update(&KeyMsg {
            key: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
        }));
        assert_eq!(m.value(), "a");
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut m = Model::new();
        m.set_value("long line\nab");
        m.cursor_line_end();
        m.move_cursor_down();
        assert_eq!(m.cursor(), (1, 2));
        m.move_cursor_up();
        assert_eq!(m.cursor(), (0, 2));
    }

    #[test]
    fn test_view_scrolls_to_cursor() {
        let mut m = Model::new().with_dimensions(20, 3);
        m.set_value("1\n2\n3\n4\n5");
        for _ in 0..4 {
            m.move_cursor_down();
        }
        let view = strip_ansi_escapes::strip_str(m.view());
        let rows: Vec<&str> = view.lines().collect();
        assert_eq!(rows, vec!["3", "4", "5"]);
    }

    #[test]
    fn test_view_pads_to_height() {
        let m = Model::new().with_dimensions(10, 4);
        let view = m.view();
        assert_eq!(view.split('\n').count(), 4);
    }
}
