//! Registry of the open windows of one process.
//!
//! Windows are owned by the registry rather than kept alive by a global
//! list. Each window gets a [`WindowId`] that stays valid until the window
//! is closed; ids are never reused. One window has focus at a time.

use std::sync::atomic::{AtomicU64, Ordering};

static LAST_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    LAST_ID.fetch_add(1, Ordering::Relaxed) + 1
}

/// Identifies a window for as long as it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

/// The open windows, in opening order, and which one has focus.
#[derive(Debug, Clone)]
pub struct AppContext<W> {
    windows: Vec<(WindowId, W)>,
    active: usize,
}

impl<W> Default for AppContext<W> {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            active: 0,
        }
    }
}

impl<W> AppContext<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a window and gives it focus.
    pub fn open(&mut self, window: W) -> WindowId {
        let id = WindowId(next_id());
        self.windows.push((id, window));
        self.active = self.windows.len() - 1;
        tracing::info!(window = id.0, open = self.windows.len(), "window opened");
        id
    }

    /// Removes a window and hands it back. Focus moves to the window opened
    /// just before it, if any.
    pub fn close(&mut self, id: WindowId) -> Option<W> {
        let index = self.index_of(id)?;
        let (_, window) = self.windows.remove(index);
        if self.active >= index && self.active > 0 {
            self.active -= 1;
        }
        tracing::info!(window = id.0, open = self.windows.len(), "window closed");
        Some(window)
    }

    pub fn get(&self, id: WindowId) -> Option<&W> {
        self.index_of(id).map(|i| &self.windows[i].1)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut W> {
        let i = self.index_of(id)?;
        Some(&mut self.windows[i].1)
    }

    /// Id of the focused window.
    pub fn active_id(&self) -> Option<WindowId> {
        self.windows.get(self.active).map(|(id, _)| *id)
    }

    /// The focused window.
    pub fn active(&self) -> Option<&W> {
        self.windows.get(self.active).map(|(_, w)| w)
    }

    pub fn active_mut(&mut self) -> Option<&mut W> {
        self.windows.get_mut(self.active).map(|(_, w)| w)
    }

    /// Moves focus to the next window, wrapping around.
    pub fn focus_next(&mut self) {
        if !self.windows.is_empty() {
            self.active = (self.active + 1) % self.windows.len();
        }
    }

    /// Position of the focused window among the open ones.
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Windows in opening order.
    pub fn iter(&self) -> impl Iterator<Item = (WindowId, &W)> {
        self.windows.iter().map(|(id, w)| (*id, w))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (WindowId, &mut W)> {
        self.windows.iter_mut().map(|(id, w)| (*id, w))
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|(wid, _)| *wid == id)
    }
}
