//! Terminal control: the escape sequences that bracket a session.
//!
//! The renderer owns drawing; this module owns the surrounding terminal
//! state — alternate screen, cursor, mouse reporting, raw mode. Sequences
//! are emitted directly; raw-mode toggling and size queries go through
//! crossterm.

use std::io::{self, Write};

use crossterm::terminal;
use geom::Expanse;
use tracing::debug;

use crate::error::{Error, Result};

/// Enter the alternate screen buffer.
const ALT_SCREEN_ON: &str = "\x1b[?1049h";
/// Leave the alternate screen buffer.
const ALT_SCREEN_OFF: &str = "\x1b[?1049l";
/// Show the cursor.
const CURSOR_SHOW: &str = "\x1b[?25h";
/// Hide the cursor.
const CURSOR_HIDE: &str = "\x1b[?25l";
/// Enable SGR mouse reporting, tracking, and extended coordinates.
const MOUSE_ON: &str = "\x1b[?1000;1003;1006;1015h";
/// Disable mouse reporting.
const MOUSE_OFF: &str = "\x1b[?1000;1003;1006;1015l";

/// Cursor shapes selectable via `ESC [ n SP q`. Some terminals swap the
/// blinking and steady variants, but the shape holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    BlinkingBlock = 0,
    SteadyBlock = 2,
    BlinkingUnderline = 3,
    SteadyUnderline = 4,
    BlinkingBar = 5,
    SteadyBar = 6,
}

fn wrap(e: io::Error) -> Error {
    Error::Terminal(e.to_string())
}

/// A handle over the controlling terminal. `start` and `stop` bracket a
/// session; everything else is a direct sequence write.
#[derive(Debug)]
pub struct Term {
    fp: io::Stderr,
}

impl Default for Term {
    fn default() -> Self {
        Self::new()
    }
}

impl Term {
    /// A handle writing to stderr.
    pub fn new() -> Self {
        Self { fp: io::stderr() }
    }

    /// The terminal's current dimensions.
    pub fn size() -> Result<Expanse> {
        let (w, h) = terminal::size().map_err(wrap)?;
        Ok(Expanse::new(w as i32, h as i32))
    }

    fn write(&mut self, s: &str) -> Result<()> {
        self.fp.write_all(s.as_bytes()).map_err(wrap)?;
        self.fp.flush().map_err(wrap)
    }

    /// Take control of the terminal: raw mode, alternate screen, mouse
    /// reporting, hidden cursor.
    pub fn start(&mut self) -> Result<()> {
        debug!("entering terminal session");
        terminal::enable_raw_mode().map_err(wrap)?;
        self.write(ALT_SCREEN_ON)?;
        self.write(MOUSE_ON)?;
        self.write(CURSOR_HIDE)?;
        Ok(())
    }

    /// Relinquish the terminal, restoring everything `start` changed.
    pub fn stop(&mut self) -> Result<()> {
        debug!("leaving terminal session");
        self.write(MOUSE_OFF)?;
        self.write(ALT_SCREEN_OFF)?;
        self.write(CURSOR_SHOW)?;
        terminal::disable_raw_mode().map_err(wrap)?;
        Ok(())
    }

    /// Show or hide the cursor.
    pub fn show_cursor(&mut self, show: bool) -> Result<()> {
        self.write(if show { CURSOR_SHOW } else { CURSOR_HIDE })
    }

    /// Select the cursor shape.
    pub fn set_cursor_shape(&mut self, shape: CursorShape) -> Result<()> {
        self.write(&format!("\x1b[{} q", shape as u8))
    }

    /// Set the terminal window title.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.write(&format!("\x1b]0;{title}\x07"))
    }

    /// Ring the terminal bell.
    pub fn bell(&mut self) -> Result<()> {
        self.write("\x07")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_shape_codes() {
        assert_eq!(CursorShape::BlinkingBlock as u8, 0);
        assert_eq!(CursorShape::SteadyBlock as u8, 2);
        assert_eq!(CursorShape::SteadyBar as u8, 6);
    }

    #[test]
    fn sequences_match_contract() {
        assert_eq!(ALT_SCREEN_ON, "\x1b[?1049h");
        assert_eq!(CURSOR_HIDE, "\x1b[?25l");
        assert_eq!(MOUSE_ON, "\x1b[?1000;1003;1006;1015h");
    }
}
