//! Drawing the clock text with a rotation and an opacity overlay.
//!
//! The alarm animation owns the angle and alpha; views only need something
//! that can draw text with that [`Transform`] applied. [`BannerRenderer`]
//! does it in a terminal: the text is set in a five-row block font, rows are
//! sheared sideways to approximate the rotation, and a white overlay of the
//! requested alpha is blended onto the background.

use crate::animator::Transform;
use lipgloss_extras::prelude::*;

/// Renders text under a rotation + opacity transform.
pub trait TransformedText: Send {
    /// Draws `text` rotated by `transform.angle` degrees with a white overlay
    /// of `transform.alpha`.
    fn render(&self, text: &str, transform: Transform) -> String;
}

const GLYPH_ROWS: usize = 5;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

fn glyph(c: char) -> [&'static str; GLYPH_ROWS] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => [" █ ", "██ ", " █ ", " █ ", "███"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => ["   ", "   ", "   ", "   ", "   "],
    }
}

/// Sets `text` in the block font, one string per row.
pub fn banner_rows(text: &str) -> Vec<String> {
    let glyphs: Vec<[&str; GLYPH_ROWS]> = text.chars().map(glyph).collect();
    (0..GLYPH_ROWS)
        .map(|row| {
            glyphs
                .iter()
                .map(|g| g[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Horizontal offset of each row for a rotation of `angle` degrees about
/// the middle row. Positive angles turn clockwise: upper rows move right.
pub fn shear_offsets(angle: i32, rows: usize) -> Vec<i32> {
    let slope = (angle as f64).to_radians().tan() * CELL_ASPECT;
    let centre = (rows as f64 - 1.0) / 2.0;
    (0..rows)
        .map(|row| ((centre - row as f64) * slope).round() as i32)
        .collect()
}

/// The block-font renderer used by the countdown.
#[derive(Debug, Clone)]
pub struct BannerRenderer {
    /// Style of the digits.
    pub style: Style,
}

impl BannerRenderer {
    /// A renderer drawing bold digits.
    pub fn new() -> Self {
        Self {
            style: Style::new().bold(true),
        }
    }
}

impl Default for BannerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformedText for BannerRenderer {
    fn render(&self, text: &str, transform: Transform) -> String {
        let rows = banner_rows(text);
        let offsets = shear_offsets(transform.angle, rows.len());
        let margin = offsets.iter().map(|o| o.abs()).max().unwrap_or(0);
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        let style = if transform.alpha > 0 {
            let level = transform.alpha;
            let overlay = format!("#{level:02x}{level:02x}{level:02x}");
            self.style.clone().background(Color::from(overlay.as_str()))
        } else {
            self.style.clone()
        };

        rows.iter()
            .zip(offsets)
            .map(|(row, offset)| {
                let left = (margin + offset).max(0) as usize;
                let right = (2 * margin as usize + width).saturating_sub(left + row.chars().count());
                let line = format!("{}{}{}", " ".repeat(left), row, " ".repeat(right));
                style.render(&line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
