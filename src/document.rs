//! A notepad document: text buffer, file path and dirty flag.
//!
//! The dirty flag is set by any edit that changes the text and cleared only
//! by a successful load or save. A failed save leaves it set.

use crate::editor::Model as Editor;
use crate::error::DocumentError;
use bubbletea_rs::KeyMsg;
use std::fs;
use std::path::{Path, PathBuf};

/// Name shown for documents that have never been saved.
pub const DEFAULT_UNTITLED: &str = "Untitled";

/// One open document.
#[derive(Debug, Clone)]
pub struct Document {
    editor: Editor,
    path: Option<PathBuf>,
    modified: bool,
    font_size: u16,
}

impl Document {
    /// An empty, untitled, unmodified document.
    pub fn new(font_size: u16) -> Self {
        Self {
            editor: Editor::new(),
            path: None,
            modified: false,
            font_size,
        }
    }

    /// A document holding `content` read from `path`; starts unmodified.
    pub fn with_content(path: Option<PathBuf>, content: &str, font_size: u16) -> Self {
        let mut editor = Editor::new();
        editor.set_value(content);
        Self {
            editor,
            path,
            modified: false,
            font_size,
        }
    }

    /// Reads `path` as UTF-8.
    pub fn read(path: &Path) -> Result<String, DocumentError> {
        fs::read_to_string(path).map_err(|source| DocumentError::Open {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the text with freshly loaded content and takes over `path`.
    pub fn load(&mut self, path: PathBuf, content: &str) {
        self.editor.set_value(content);
        self.path = Some(path);
        self.modified = false;
    }

    /// Writes the text to `path` as UTF-8. On success the document takes
    /// `path` as its own and becomes unmodified; on failure nothing changes.
    pub fn save_to(&mut self, path: &Path) -> Result<(), DocumentError> {
        fs::write(path, self.editor.value()).map_err(|source| DocumentError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        tracing::info!(path = %path.display(), "document saved");
        Ok(())
    }

    /// Routes an editing key to the buffer and marks the document modified
    /// when the text changed.
    pub fn handle_key(&mut self, key: &KeyMsg) -> bool {
        let changed = self.editor.update(key);
        if changed {
            self.modified = true;
        }
        changed
    }

    /// Inserts text at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        if !s.is_empty() {
            self.editor.insert_str(s);
            self.modified = true;
        }
    }

    /// The full text.
    pub fn text(&self) -> String {
        self.editor.value()
    }

    /// The buffer.
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The buffer, mutably. Edits made through it do not touch the dirty flag.
    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether there are unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Whether this is a fresh tab: no file, no text, no changes.
    pub fn is_pristine(&self) -> bool {
        self.path.is_none() && self.editor.is_empty() && !self.modified
    }

    /// File name, or `untitled` when there is no file.
    pub fn display_name(&self, untitled: &str) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| untitled.to_string())
    }

    /// The tab text: the display name, with `*` while modified.
    pub fn tab_label(&self, untitled: &str) -> String {
        let name = self.display_name(untitled);
        if self.modified {
            format!("{name}*")
        } else {
            name
        }
    }

    /// Point size of this tab's text.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Changes the point size; never below 1.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(c: char) -> KeyMsg {
        KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_new_document_is_pristine() {
        let doc = Document::new(11);
        assert!(doc.is_pristine());
        assert_eq!(doc.tab_label(DEFAULT_UNTITLED), "Untitled");
    }

    #[test]
    fn test_edits_set_dirty_flag() {
        let mut doc = Document::new(11);
        assert!(doc.handle_key(&key('a')));
        assert!(doc.is_modified());
        assert_eq!(doc.tab_label("Untitled"), "Untitled*");
        assert!(!doc.is_pristine());
    }

    #[test]
    fn test_cursor_moves_keep_clean() {
        let mut doc = Document::with_content(None, "abc", 11);
        doc.handle_key(&KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        });
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_save_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut doc = Document::new(11);
        doc.insert_str("안녕\nhello\n");
        doc.save_to(&path).unwrap();
        assert!(!doc.is_modified());
        assert_eq!(doc.path(), Some(path.as_path()));
        assert_eq!(doc.tab_label("Untitled"), "notes.txt");
        assert_eq!(Document::read(&path).unwrap(), "안녕\nhello\n");
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("notes.txt");
        let mut doc = Document::new(11);
        doc.insert_str("draft");
        let err = doc.save_to(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Save { .. }));
        assert!(doc.is_modified());
        assert!(doc.path().is_none());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::read(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn test_font_size_floor() {
        let mut doc = Document::new(11);
        doc.set_font_size(0);
        assert_eq!(doc.font_size(), 1);
    }
}
