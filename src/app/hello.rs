//! The smallest program: a titled window that waits to be closed.

use crate::app::frame;
use crate::key::Binding;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

pub const TITLE: &str = "My APP";
pub const WIDTH: usize = 60;
pub const HEIGHT: usize = 20;

pub struct Hello {
    quit: Binding,
}

impl Hello {
    pub fn new() -> Self {
        Self {
            quit: Binding::new(vec![
                (KeyCode::Char('q'), KeyModifiers::NONE),
                (KeyCode::Esc, KeyModifiers::NONE),
                (KeyCode::Char('c'), KeyModifiers::CONTROL),
            ])
            .with_help("q", "quit"),
        }
    }
}

impl Default for Hello {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for Hello {
    fn init() -> (Self, Option<Cmd>) {
        tracing::info!("hello window shown");
        (Self::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.quit.matches(key) {
            tracing::info!("hello window closed");
            return Some(quit());
        }
        None
    }

    fn view(&self) -> String {
        let hint = format!("  press {} to {}", self.quit.help().key, self.quit.help().desc);
        frame(TITLE, &hint, WIDTH, HEIGHT)
    }
}
