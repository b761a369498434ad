//! The bubbletea models of the four programs and the code that starts them.
//!
//! Each binary is a thin `main` around [`startup`] and [`run`]:
//!
//! ```rust,no_run
//! use termdesk::app::{self, countdown::Countdown};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     app::startup("countdown")?;
//!     app::run::<Countdown>().await
//! }
//! ```

pub mod countdown;
pub mod hello;
pub mod notepad;
pub mod stopwatch;

use crate::config;
use crate::error::ConfigError;
use bubbletea_rs::{batch, Cmd, Model, Program};
use lipgloss_extras::lipgloss;
use unicode_width::UnicodeWidthStr;

/// Loads the configuration, stores it for the models and starts logging to
/// `<program>.log`. Only a broken config file is an error; a logging
/// failure is reported on stderr.
pub fn startup(program: &str) -> Result<(), ConfigError> {
    let config = config::load()?;
    crate::logging::init_or_warn(program, &config.log);
    config::init(config);
    Ok(())
}

/// Runs `M` full screen until it quits.
pub async fn run<M: Model + Send + 'static>() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<M>::builder().alt_screen(true).build()?;
    program.run().await?;
    tracing::info!("program exited");
    Ok(())
}

/// Folds the commands produced by one update into at most one.
pub(crate) fn combine(mut cmds: Vec<Cmd>) -> Option<Cmd> {
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(batch(cmds)),
    }
}

/// Draws a box of `width` x `height` cells with `title` in the top border
/// and `body` inside. Body rows may contain styling; longer rows are left
/// as they are, missing rows are blank.
pub fn frame(title: &str, body: &str, width: usize, height: usize) -> String {
    let width = width.max(4);
    let height = height.max(2);
    let inner = width - 2;

    let label = if title.is_empty() {
        String::new()
    } else {
        format!(" {title} ")
    };
    let label_width = UnicodeWidthStr::width(label.as_str());
    let mut out = Vec::with_capacity(height);
    if label_width < inner {
        out.push(format!(
            "┌─{}{}┐",
            label,
            "─".repeat(inner - 1 - label_width)
        ));
    } else {
        out.push(format!("┌{}┐", "─".repeat(inner)));
    }

    let mut rows = body.lines();
    for _ in 0..height - 2 {
        let row = rows.next().unwrap_or("");
        let pad = inner.saturating_sub(lipgloss::width_visible(row));
        out.push(format!("│{}{}│", row, " ".repeat(pad)));
    }
    out.push(format!("└{}┘", "─".repeat(inner)));
    out.join("\n")
}
