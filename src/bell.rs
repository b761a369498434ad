//! Audible cue.

use std::io::Write;

/// Something that can sound one short beep.
pub trait Bell: Send {
    /// Sounds one cue.
    fn ring(&mut self);
}

/// Rings the terminal bell by writing BEL to stderr.
///
/// The UI owns stdout, so the byte goes to the other stream attached to the
/// same terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Bell for TerminalBell {
    fn ring(&mut self) {
        let mut err = std::io::stderr();
        if let Err(e) = err.write_all(b"\x07").and_then(|_| err.flush()) {
            tracing::warn!(error = %e, "terminal bell failed");
        }
    }
}
