//! The differential ANSI renderer.
//!
//! A [`Renderer`] owns a shadow buffer of one `(fg, bg)` color pair per
//! terminal cell — the authoritative record of what is believed to be on
//! screen — and an accumulating frame string. Drawing primitives compare the
//! colors they are about to emit against the buffer and the last emitted
//! escape, so repainting an unchanged region costs nothing and adjacent
//! same-color cells share a single escape. The buffer stores no glyphs:
//! text is always re-emitted, only its color traffic is elided.
//!
//! A frame is a single write: primitives append to the frame string and
//! [`Renderer::draw`] hands it to the terminal in one call, or
//! [`Renderer::flush`] discards it.

use std::io::{self, Write};

use geom::Expanse;
use tracing::trace;

use crate::{
    draw::DrawCmd,
    error::Result,
    style::{AttrSet, Gradient, Rgb},
};

/// Reset all SGR state.
const RESET: &str = "\x1b[0m";

/// One terminal cell's believed color state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
}

/// How colors are encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit `38;2;r;g;b` escapes.
    #[default]
    TrueColor,
    /// Nearest entry of the 256-color palette, `38;5;n`.
    Ansi256,
    /// Nearest of the 16 basic colors, classic `30`–`37` / `90`–`97` codes.
    Ansi16,
}

fn color_seq(mode: ColorMode, c: Rgb, foreground: bool) -> String {
    match mode {
        ColorMode::TrueColor => {
            let base = if foreground { 38 } else { 48 };
            format!("\x1b[{base};2;{};{};{}m", c.r, c.g, c.b)
        }
        ColorMode::Ansi256 => {
            let base = if foreground { 38 } else { 48 };
            format!("\x1b[{base};5;{}m", c.nearest_ansi256())
        }
        ColorMode::Ansi16 => {
            let idx = c.nearest_ansi16();
            let code = match (foreground, idx < 8) {
                (true, true) => 30 + idx as u32,
                (true, false) => 90 + (idx - 8) as u32,
                (false, true) => 40 + idx as u32,
                (false, false) => 100 + (idx - 8) as u32,
            };
            format!("\x1b[{code}m")
        }
    }
}

fn attr_seq(attrs: &AttrSet, enable: bool) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let mut codes: Vec<u8> = Vec::new();
    let table: [(bool, u8, u8); 8] = [
        (attrs.bold, 1, 22),
        (attrs.faint, 2, 22),
        (attrs.italic, 3, 23),
        (attrs.underline, 4, 24),
        (attrs.blink, 5, 25),
        (attrs.reverse, 7, 27),
        (attrs.hidden, 8, 28),
        (attrs.strikethrough, 9, 29),
    ];
    for (on, set, unset) in table {
        if on {
            codes.push(if enable { set } else { unset });
        }
    }
    let joined = codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(";");
    format!("\x1b[{joined}m")
}

/// The cell-diffing terminal renderer.
pub struct Renderer {
    /// The accumulating frame string.
    out: String,
    /// Shadow buffer, row-major.
    cells: Vec<Cell>,
    size: Expanse,
    /// When set, rects without a background erase to the stored background
    /// instead of being skipped.
    transparent: bool,
    mode: ColorMode,
}

impl Renderer {
    /// Construct a renderer for a terminal of the given dimensions.
    pub fn new(w: i32, h: i32) -> Self {
        let size = Expanse::new(w, h);
        Self {
            out: String::new(),
            cells: vec![Cell::default(); size.area()],
            size,
            transparent: false,
            mode: ColorMode::default(),
        }
    }

    /// Reallocate the shadow buffer for new terminal dimensions, zeroing all
    /// cell state. Must be called on every terminal resize before drawing.
    pub fn resize(&mut self, w: i32, h: i32) {
        trace!(w, h, "renderer resize");
        self.size = Expanse::new(w, h);
        self.cells = vec![Cell::default(); self.size.area()];
    }

    /// Current buffer dimensions.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Toggle transparency mode.
    pub fn set_transparent(&mut self, on: bool) {
        self.transparent = on;
    }

    /// Select the wire color encoding.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// The believed state of a cell, if in bounds.
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        if x >= 0 && y >= 0 && x < self.size.w && y < self.size.h {
            Some(&self.cells[(y * self.size.w + x) as usize])
        } else {
            None
        }
    }

    /// The frame accumulated so far.
    pub fn pending(&self) -> &str {
        &self.out
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            x >= 0 && y >= 0 && x < self.size.w && y < self.size.h,
            "cell ({x},{y}) outside {:?}",
            self.size
        );
        let cx = x.clamp(0, self.size.w - 1);
        let cy = y.clamp(0, self.size.h - 1);
        (cy * self.size.w + cx) as usize
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.out.push_str(&format!("\x1b[{};{}H", y + 1, x + 1));
    }

    fn put_fg(&mut self, c: Rgb, last: &mut Option<Rgb>) {
        if *last != Some(c) {
            let seq = color_seq(self.mode, c, true);
            self.out.push_str(&seq);
            *last = Some(c);
        }
    }

    fn put_bg(&mut self, c: Rgb, last: &mut Option<Rgb>) {
        if *last != Some(c) {
            let seq = color_seq(self.mode, c, false);
            self.out.push_str(&seq);
            *last = Some(c);
        }
    }

    /// Paint every row with a vertically interpolated background and erase
    /// it to end of line.
    pub fn clear(&mut self, bg: &Gradient) {
        if self.size.w <= 0 || self.size.h <= 0 {
            return;
        }
        for y in 0..self.size.h {
            let col = bg.at(y as f32 / self.size.h as f32);
            for x in 0..self.size.w {
                let i = self.idx(x, y);
                self.cells[i].bg = col;
            }
            self.move_to(0, y);
            let seq = color_seq(self.mode, col, false);
            self.out.push_str(&seq);
            self.out.push_str("\x1b[K");
        }
        self.out.push_str(RESET);
    }

    /// Blank a region using the stored background of each row, leaving cell
    /// state untouched.
    pub fn clear_region(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if self.size.w <= 0 || self.size.h <= 0 || w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let x1 = (x + w).min(self.size.w);
        if x0 >= x1 {
            return;
        }
        let mut last_bg = None;
        let mut wrote = false;
        for row in 0..h {
            let cy = y + row;
            if cy < 0 {
                continue;
            }
            if cy >= self.size.h {
                break;
            }
            let col = self.cells[self.idx(x0, cy)].bg;
            self.move_to(x0, cy);
            self.put_bg(col, &mut last_bg);
            for _ in x0..x1 {
                self.out.push(' ');
            }
            wrote = true;
        }
        if wrote {
            self.out.push_str(RESET);
        }
    }

    /// Draw a string with per-character color interpolation across its
    /// length. Missing colors read the shadow buffer, so text composes over
    /// painted backgrounds. Color escapes are only emitted when the color
    /// differs from the previously emitted one.
    pub fn text(
        &mut self,
        x: i32,
        y: i32,
        s: &str,
        fg: Option<&Gradient>,
        bg: Option<&Gradient>,
        attrs: AttrSet,
    ) {
        if self.size.w <= 0 || self.size.h <= 0 || y < 0 || y >= self.size.h {
            return;
        }
        let len = s.chars().count();
        if len == 0 {
            return;
        }
        let mut moved = false;
        let mut last_fg = None;
        let mut last_bg = None;
        for (i, ch) in s.chars().enumerate() {
            let cx = x + i as i32;
            if cx < 0 {
                continue;
            }
            if cx >= self.size.w {
                break;
            }
            if !moved {
                self.move_to(cx, y);
                let seq = attr_seq(&attrs, true);
                self.out.push_str(&seq);
                moved = true;
            }
            let f = i as f32 / len as f32;
            let idx = self.idx(cx, y);
            let fgc = fg.map_or(self.cells[idx].fg, |g| g.at(f));
            let bgc = bg.map_or(self.cells[idx].bg, |g| g.at(f));
            if fg.is_some() {
                self.cells[idx].fg = fgc;
            }
            if bg.is_some() {
                self.cells[idx].bg = bgc;
            }
            self.put_bg(bgc, &mut last_bg);
            self.put_fg(fgc, &mut last_fg);
            self.out.push(ch);
        }
        if moved {
            let seq = attr_seq(&attrs, false);
            self.out.push_str(&seq);
            self.out.push_str(RESET);
        }
    }

    /// Fill a rectangle with a vertically interpolated background. Only
    /// cells whose stored background differs are repainted: an identical
    /// repaint emits nothing at all, and a solid fill costs at most one
    /// escape per contiguous changed run.
    ///
    /// Without a background this erases to the stored background when
    /// transparency mode is on, and is otherwise a no-op.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, bg: Option<&Gradient>) {
        if self.size.w <= 0 || self.size.h <= 0 {
            return;
        }
        let Some(bg) = bg else {
            if self.transparent {
                self.clear_region(x, y, w, h);
            }
            return;
        };
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let x1 = (x + w).min(self.size.w);
        if x0 >= x1 {
            return;
        }
        let mut last_bg = None;
        let mut wrote = false;
        for row in 0..h {
            let cy = y + row;
            if cy < 0 {
                continue;
            }
            if cy >= self.size.h {
                break;
            }
            let col = bg.at(row as f32 / h as f32);
            let mut run_start: Option<i32> = None;
            for cx in x0..=x1 {
                let stale = cx < x1 && {
                    let i = self.idx(cx, cy);
                    self.cells[i].bg != col
                };
                if stale {
                    if run_start.is_none() {
                        run_start = Some(cx);
                    }
                    let i = self.idx(cx, cy);
                    self.cells[i].bg = col;
                } else if let Some(start) = run_start.take() {
                    self.move_to(start, cy);
                    self.put_bg(col, &mut last_bg);
                    for _ in start..cx {
                        self.out.push(' ');
                    }
                    wrote = true;
                }
            }
        }
        if wrote {
            self.out.push_str(RESET);
        }
    }

    /// Draw a vertical run of a box-drawing glyph with interpolated colors.
    pub fn vline(
        &mut self,
        x: i32,
        y: i32,
        len: i32,
        fg: &Gradient,
        bg: Option<&Gradient>,
        glyph: char,
    ) {
        if self.size.w <= 0 || self.size.h <= 0 || x < 0 || x >= self.size.w || len <= 0 {
            return;
        }
        let mut last_fg = None;
        let mut last_bg = None;
        let mut wrote = false;
        for i in 0..len {
            let cy = y + i;
            if cy < 0 {
                continue;
            }
            if cy >= self.size.h {
                break;
            }
            let f = i as f32 / len as f32;
            let fgc = fg.at(f);
            let idx = self.idx(x, cy);
            let bgc = bg.map_or(self.cells[idx].bg, |g| g.at(f));
            self.cells[idx].fg = fgc;
            if bg.is_some() {
                self.cells[idx].bg = bgc;
            }
            self.move_to(x, cy);
            self.put_fg(fgc, &mut last_fg);
            self.put_bg(bgc, &mut last_bg);
            self.out.push(glyph);
            wrote = true;
        }
        if wrote {
            self.out.push_str(RESET);
        }
    }

    /// Draw a horizontal run of a glyph with interpolated colors.
    pub fn hline(
        &mut self,
        x: i32,
        y: i32,
        len: i32,
        fg: &Gradient,
        bg: Option<&Gradient>,
        glyph: char,
    ) {
        if self.size.w <= 0 || self.size.h <= 0 || y < 0 || y >= self.size.h || len <= 0 {
            return;
        }
        let mut last_fg = None;
        let mut last_bg = None;
        let mut moved = false;
        for i in 0..len {
            let cx = x + i;
            if cx < 0 {
                continue;
            }
            if cx >= self.size.w {
                break;
            }
            if !moved {
                self.move_to(cx, y);
                moved = true;
            }
            let f = i as f32 / len as f32;
            let fgc = fg.at(f);
            let idx = self.idx(cx, y);
            let bgc = bg.map_or(self.cells[idx].bg, |g| g.at(f));
            self.cells[idx].fg = fgc;
            if bg.is_some() {
                self.cells[idx].bg = bgc;
            }
            self.put_fg(fgc, &mut last_fg);
            self.put_bg(bgc, &mut last_bg);
            self.out.push(glyph);
        }
        if moved {
            self.out.push_str(RESET);
        }
    }

    /// Draw a titled box: optional fill, a `╭─ title ─╮` top border, two
    /// vertical borders, and a `╰─╯` bottom border.
    pub fn frame(&mut self, x: i32, y: i32, w: i32, h: i32, title: &str, fg: &Gradient, bg: Option<&Gradient>) {
        if w <= 0 || h <= 0 {
            return;
        }
        if bg.is_some() {
            self.rect(x, y, w, h, bg);
        }
        let inner = (w - 1).max(0) as usize;
        let mut top = String::from("╭");
        if !title.is_empty() {
            top.push_str("─ ");
            top.push_str(title);
            top.push(' ');
        }
        let mut top: String = top.chars().take(inner).collect();
        while top.chars().count() < inner {
            top.push('─');
        }
        top.push('╮');
        self.text(x, y, &top, Some(fg), None, AttrSet::default());
        self.vline(x, y + 1, h - 2, &Gradient::solid(fg.start), None, '│');
        self.vline(x + w - 1, y + 1, h - 2, &Gradient::solid(fg.end), None, '│');
        if h >= 2 {
            let mut bottom = String::from("╰");
            for _ in 0..(w - 2).max(0) {
                bottom.push('─');
            }
            bottom.push('╯');
            self.text(x, y + h - 1, &bottom, Some(fg), None, AttrSet::default());
        }
    }

    /// Apply one extracted draw command.
    pub fn apply(&mut self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Rect {
                x,
                y,
                w,
                h,
                title,
                fg,
                bg,
                ..
            } => {
                if let Some(title) = title {
                    let fg = fg.unwrap_or(Gradient::solid(Rgb::WHITE));
                    self.frame(*x, *y, *w, *h, title, &fg, bg.as_ref());
                } else {
                    self.rect(*x, *y, *w, *h, bg.as_ref());
                }
            }
            DrawCmd::Text {
                x,
                y,
                text,
                fg,
                bg,
                attrs,
                ..
            } => {
                self.text(*x, *y, text, fg.as_ref(), bg.as_ref(), *attrs);
            }
            DrawCmd::HLine {
                x,
                y,
                w,
                fg,
                bg,
                glyph,
                ..
            } => {
                self.hline(*x, *y, *w, fg, bg.as_ref(), *glyph);
            }
        }
    }

    /// Write the accumulated frame to a stream in a single call and clear
    /// the accumulator.
    pub fn draw_to<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let frame = std::mem::take(&mut self.out);
        trace!(bytes = frame.len(), "frame write");
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Write the accumulated frame to the terminal.
    pub fn draw(&mut self) -> Result<()> {
        let mut err = io::stderr();
        self.draw_to(&mut err)
    }

    /// Discard the accumulated frame without writing it.
    pub fn flush(&mut self) {
        self.out.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Gradient {
        Gradient::hex("#ff0000")
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn rect_paints_and_updates_cells() {
        let mut r = Renderer::new(20, 5);
        r.rect(2, 1, 5, 3, Some(&red()));
        assert_eq!(r.cell(2, 1).unwrap().bg, Rgb::new(255, 0, 0));
        assert_eq!(r.cell(6, 3).unwrap().bg, Rgb::new(255, 0, 0));
        assert_eq!(r.cell(7, 1).unwrap().bg, Rgb::BLACK);
        // A solid fill shares one escape across its changed runs.
        assert_eq!(count(r.pending(), "\x1b[48;2;255;0;0m"), 1);
    }

    #[test]
    fn identical_repaint_emits_nothing() {
        let mut r = Renderer::new(20, 5);
        r.rect(2, 1, 5, 3, Some(&red()));
        r.flush();
        r.rect(2, 1, 5, 3, Some(&red()));
        assert_eq!(r.pending(), "");
    }

    #[test]
    fn single_changed_cell_costs_one_escape() {
        let mut r = Renderer::new(20, 5);
        r.rect(2, 1, 5, 3, Some(&red()));
        r.flush();
        // Disturb one cell, then repaint the same rect.
        r.rect(4, 2, 1, 1, Some(&Gradient::hex("#0000ff")));
        r.flush();
        r.rect(2, 1, 5, 3, Some(&red()));
        assert_eq!(count(r.pending(), "\x1b[48;2;255;0;0m"), 1);
        // Exactly one cursor move and one blank glyph for the stale cell.
        assert_eq!(count(r.pending(), "\x1b["), 3); // move + color + reset
    }

    #[test]
    fn text_compresses_color_runs() {
        let mut r = Renderer::new(20, 5);
        r.text(0, 0, "hello", Some(&Gradient::hex("#fff")), None, AttrSet::default());
        // Solid fg over uniform stored bg: one fg escape, one bg escape.
        assert_eq!(count(r.pending(), "\x1b[38;2;255;255;255m"), 1);
        assert_eq!(count(r.pending(), "\x1b[48;2;0;0;0m"), 1);
        assert!(r.pending().contains("hello"));
        assert_eq!(r.cell(0, 0).unwrap().fg, Rgb::WHITE);
        // The buffer's bg was read, not written.
        assert_eq!(r.cell(0, 0).unwrap().bg, Rgb::BLACK);
    }

    #[test]
    fn text_gradient_interpolates_per_char() {
        let mut r = Renderer::new(20, 5);
        let g = Gradient::span("#000000", "#ffffff");
        r.text(0, 0, "abcd", Some(&g), None, AttrSet::default());
        assert_eq!(r.cell(0, 0).unwrap().fg, Rgb::BLACK);
        assert_eq!(r.cell(1, 0).unwrap().fg, g.at(0.25));
        // Distinct colors per char force one escape each.
        assert_eq!(count(r.pending(), "\x1b[38;2;"), 4);
    }

    #[test]
    fn text_clips_to_buffer() {
        let mut r = Renderer::new(5, 2);
        r.text(3, 0, "long", Some(&red()), None, AttrSet::default());
        assert!(r.pending().contains("lo"));
        assert!(!r.pending().contains("lon"));
        r.flush();
        r.text(0, 7, "off", Some(&red()), None, AttrSet::default());
        assert_eq!(r.pending(), "");
    }

    #[test]
    fn text_attrs_wrap_output() {
        let mut r = Renderer::new(20, 2);
        let attrs = AttrSet::default().with(crate::style::Attr::Bold).with(crate::style::Attr::Underline);
        r.text(0, 0, "hi", Some(&red()), None, attrs);
        assert!(r.pending().contains("\x1b[1;4m"));
        assert!(r.pending().contains("\x1b[22;24m"));
    }

    #[test]
    fn clear_interpolates_rows() {
        let mut r = Renderer::new(4, 2);
        let g = Gradient::span("#000000", "#ffffff");
        r.clear(&g);
        assert_eq!(r.cell(0, 0).unwrap().bg, g.at(0.0));
        assert_eq!(r.cell(0, 1).unwrap().bg, g.at(0.5));
        assert_eq!(count(r.pending(), "\x1b[K"), 2);
    }

    #[test]
    fn clear_region_uses_stored_background() {
        let mut r = Renderer::new(10, 3);
        r.rect(0, 0, 10, 3, Some(&red()));
        r.flush();
        r.clear_region(2, 1, 4, 1);
        assert!(r.pending().contains("\x1b[48;2;255;0;0m"));
        assert!(r.pending().contains("    "));
    }

    #[test]
    fn transparent_rect_erases_without_background() {
        let mut r = Renderer::new(10, 3);
        r.rect(0, 0, 10, 3, Some(&red()));
        r.flush();
        r.rect(1, 1, 3, 1, None);
        assert_eq!(r.pending(), "");
        r.set_transparent(true);
        r.rect(1, 1, 3, 1, None);
        assert!(r.pending().contains("   "));
    }

    #[test]
    fn vline_draws_glyphs() {
        let mut r = Renderer::new(10, 6);
        r.vline(3, 1, 4, &red(), None, '│');
        assert_eq!(count(r.pending(), "│"), 4);
        assert_eq!(r.cell(3, 1).unwrap().fg, Rgb::new(255, 0, 0));
        // Solid color: a single fg escape despite four cursor moves.
        assert_eq!(count(r.pending(), "\x1b[38;2;255;0;0m"), 1);
    }

    #[test]
    fn box_scenario() {
        let mut r = Renderer::new(20, 6);
        r.frame(0, 0, 10, 4, "Hi", &Gradient::hex("#fff"), None);
        let top: String = "╭─ Hi ───╮".into();
        assert!(r.pending().contains(&top));
        assert!(r.pending().contains("╰────────╯"));
        // Two borders of height 2 each.
        assert_eq!(count(r.pending(), "│"), 4);
        // Left border starts at row 2 col 1; right border at col 10.
        assert!(r.pending().contains("\x1b[2;1H"));
        assert!(r.pending().contains("\x1b[2;10H"));
    }

    #[test]
    fn color_mode_quantizes() {
        let mut r = Renderer::new(10, 2);
        r.set_color_mode(ColorMode::Ansi16);
        r.text(0, 0, "x", Some(&red()), None, AttrSet::default());
        assert!(r.pending().contains("\x1b[91m"));
        r.flush();
        r.set_color_mode(ColorMode::Ansi256);
        r.text(1, 0, "x", Some(&red()), None, AttrSet::default());
        assert!(r.pending().contains("\x1b[38;5;9m"));
    }

    #[test]
    fn resize_zeroes_state() {
        let mut r = Renderer::new(10, 2);
        r.rect(0, 0, 10, 2, Some(&red()));
        r.resize(8, 3);
        assert_eq!(r.size(), Expanse::new(8, 3));
        assert_eq!(r.cell(0, 0).unwrap().bg, Rgb::BLACK);
        assert!(r.cell(9, 0).is_none());
    }

    #[test]
    fn draw_writes_once_and_clears() {
        let mut r = Renderer::new(5, 1);
        r.text(0, 0, "hey", Some(&red()), None, AttrSet::default());
        let mut sink: Vec<u8> = Vec::new();
        r.draw_to(&mut sink).unwrap();
        assert!(!sink.is_empty());
        assert_eq!(r.pending(), "");
    }

    #[test]
    fn flush_discards_frame() {
        let mut r = Renderer::new(5, 1);
        r.text(0, 0, "hey", Some(&red()), None, AttrSet::default());
        assert!(!r.pending().is_empty());
        r.flush();
        assert_eq!(r.pending(), "");
    }
}
