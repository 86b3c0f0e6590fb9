//! One-line console progress display for collector loops.
//!
//! Purely observational: collectors call [`Progress::tick`] once per entity
//! and the display overwrites itself in place. Disabled entirely in quiet
//! mode, which is forced when the report itself goes to standard output.

use std::io::Write;
use std::thread;
use std::time::Duration;

const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];
const BAR_WIDTH: usize = 40;

/// Spinner state lives here explicitly; the glyph advances on every call
/// even when the counter has not moved.
pub struct Progress {
    enabled: bool,
    spin: usize,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, spin: 0 }
    }

    /// Announce the section a collector is about to walk
    pub fn section(&self, name: &str) {
        if !self.enabled {
            return;
        }
        println!("Getting statistics for {name}");
    }

    /// Advance the display to `current` out of `total` entities
    pub fn tick(&mut self, current: usize, total: usize) {
        if !self.enabled || total == 0 {
            return;
        }
        self.spin = (self.spin + 1) % GLYPHS.len();

        let mut out = std::io::stdout();
        let _ = write!(out, "{}\r", render_line(GLYPHS[self.spin], current, total));
        let _ = out.flush();

        if current == total {
            // let the 100% frame show before clearing the line
            thread::sleep(Duration::from_millis(300));
            let _ = writeln!(out, "Done{}", " ".repeat(50));
        }
    }
}

fn render_line(glyph: char, current: usize, total: usize) -> String {
    let percentage = 100 * current / total;
    let filled = percentage * BAR_WIDTH / 100;
    format!(
        "({})[{}{}] {:3} %",
        glyph,
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percentage
    )
}
