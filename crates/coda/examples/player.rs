//! A mock music-player screen driven by the toolkit: track list, sidebar
//! with queue, and a playbar with transport buttons and a scrubber. Input
//! decoding comes from crossterm; everything drawn goes through the layout
//! engine and the diffing renderer.
//!
//! Keys: j/k or arrows select, enter plays, space pauses, q quits. The
//! transport buttons and track rows are clickable.

use std::time::Duration;

use coda::{
    Center, Dir, Gradient, Node, Padding, Renderer, Size, Style, Term, draw, layout, tree,
    z_sorted,
};
use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use geom::Rect;
use scopeguard::defer;

struct Track {
    title: &'static str,
    artist: &'static str,
    album: &'static str,
    length: u64,
}

const TRACKS: &[Track] = &[
    Track { title: "First Light", artist: "Marion Vale", album: "Daybreak", length: 214 },
    Track { title: "Glass Harbor", artist: "Marion Vale", album: "Daybreak", length: 187 },
    Track { title: "Meridian", artist: "The Slow Signal", album: "Wavelengths", length: 243 },
    Track { title: "Undertow", artist: "The Slow Signal", album: "Wavelengths", length: 198 },
    Track { title: "Northern Line", artist: "Cass Elder", album: "Transit Maps", length: 225 },
    Track { title: "Paper Atlas", artist: "Cass Elder", album: "Transit Maps", length: 261 },
    Track { title: "Half Remembered", artist: "Cass Elder", album: "Transit Maps", length: 176 },
    Track { title: "Static Bloom", artist: "Foxglove Unit", album: "Greenhouse", length: 233 },
];

struct App {
    selected: usize,
    playing: usize,
    position: u64,
    paused: bool,
}

impl App {
    fn new() -> Self {
        Self {
            selected: 0,
            playing: 0,
            position: 0,
            paused: true,
        }
    }

    fn theme_bg() -> Gradient {
        Gradient::span("#232526", "#414345")
    }

    fn playbar(&self) -> Node {
        let t = &TRACKS[self.playing];
        let white = Gradient::hex("#fff");
        let button = |label: &str, id: &str| {
            Node::button(
                Style::new()
                    .with_fg(Gradient::hex("#000"))
                    .with_bg(Gradient::hex("#fff"))
                    .with_w(Size::fixed(6))
                    .with_h(Size::fixed(1)),
                label,
            )
            .with_id(id)
        };
        Node::panel(
            Style::new()
                .with_h(Size::fixed(3))
                .with_padding(Padding::new(1, 0, 1, 1))
                .with_child_gap(1)
                .not_clickable(),
        )
        .with_id("playbar")
        .with_children(vec![
            Node::panel(
                Style::new()
                    .with_w(Size::fixed(20))
                    .with_h(Size::fixed(1))
                    .with_child_gap(1)
                    .not_clickable(),
            )
            .with_children(vec![
                button("<<", "previous"),
                button(if self.paused { "|>" } else { "||" }, "play-pause"),
                button(">>", "forward"),
            ]),
            Node::text(
                Style::new().with_fg(white).with_w(Size::fixed(5)).with_h(Size::fixed(1)),
                clock(self.position),
            ),
            Node::hprogress(
                Style::new()
                    .with_fg(Gradient::hex("#fff"))
                    .with_bg(Gradient::hex("#888"))
                    .with_h(Size::fixed(1))
                    .with_thin(),
                self.position,
                t.length,
            )
            .with_id("scrubber"),
            Node::text(
                Style::new().with_fg(white).with_w(Size::fixed(5)).with_h(Size::fixed(1)),
                clock(t.length),
            ),
        ])
    }

    fn track_rows(&self) -> Vec<Node> {
        TRACKS
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let selected = i == self.selected;
                let fg = if i == self.playing {
                    Gradient::hex("#1ED760")
                } else if selected {
                    Gradient::hex("#000")
                } else {
                    Gradient::hex("#DFDFDF")
                };
                let mut style = Style::new().with_h(Size::fixed(1)).with_child_gap(1);
                if selected {
                    style = style.with_bg(Gradient::hex("#fff"));
                }
                Node::panel(style)
                    .with_id(format!("track:{i}"))
                    .with_children(vec![
                        Node::text(
                            Style::new().with_fg(fg).with_w(Size::fixed(24)).not_clickable(),
                            t.title,
                        ),
                        Node::text(
                            Style::new().with_fg(fg).with_w(Size::fixed(18)).not_clickable(),
                            t.artist,
                        ),
                        Node::text(Style::new().with_fg(fg).not_clickable(), t.album),
                    ])
            })
            .collect()
    }

    fn sidebar(&self) -> Node {
        let now = &TRACKS[self.playing];
        Node::panel(
            Style::new()
                .with_w(Size::fixed(30))
                .with_child_dir(Dir::Vertical)
                .not_clickable(),
        )
        .with_children(vec![
            Node::panel(
                Style::new()
                    .with_title("Active")
                    .with_child_dir(Dir::Vertical)
                    .with_child_gap(1)
                    .with_h(Size::fixed(18))
                    .with_center(Center::HORIZONTAL)
                    .not_clickable(),
            )
            .with_children(vec![
                Node::image(
                    Style::new()
                        .with_w(Size::fixed(26))
                        .with_h(Size::fixed(11))
                        .with_bg(Gradient::hex("#323232")),
                ),
                Node::panel(Style::new().with_child_dir(Dir::Vertical).not_clickable())
                    .with_children(vec![
                        Node::text(
                            Style::new().with_fg(Gradient::hex("#DFDFDF")).with_h(Size::fixed(1)),
                            now.title,
                        )
                        .with_id("now-title"),
                        Node::text(
                            Style::new().with_fg(Gradient::hex("#1ED760")).with_h(Size::fixed(1)),
                            now.artist,
                        )
                        .with_id("now-artist"),
                    ]),
            ]),
            Node::scroll_panel(
                Style::new().with_title("Queue").with_child_dir(Dir::Vertical),
                self.playing.saturating_sub(1),
            )
            .with_id("queue")
            .with_children(
                TRACKS
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        let marker = if i == self.playing { "> " } else { "  " };
                        Node::text(
                            Style::new()
                                .with_fg(Gradient::hex("#fff"))
                                .with_h(Size::fixed(1))
                                .not_clickable(),
                            format!("{marker}{}", t.title),
                        )
                    })
                    .collect(),
            ),
        ])
    }

    fn ui(&self) -> Node {
        Node::panel(
            Style::new()
                .with_child_dir(Dir::Vertical)
                .with_bg(Self::theme_bg())
                .not_clickable(),
        )
        .with_id("root")
        .with_children(vec![
            Node::panel(Style::new().not_clickable()).with_children(vec![
                Node::panel(Style::new().with_title("Tracks").with_child_dir(Dir::Vertical))
                    .with_id("tracks")
                    .with_children(self.track_rows()),
                self.sidebar(),
            ]),
            self.playbar(),
        ])
    }

    fn render(&self, rend: &mut Renderer) -> coda::Result<()> {
        let size = rend.size();
        let tree = self.ui();
        let placed = layout(&tree, Rect::new(0, 0, size.w, size.h));
        for cmd in z_sorted(draw(&placed)) {
            rend.apply(&cmd);
        }
        rend.draw()
    }

    fn handle_click(&mut self, placed: &coda::Placed, x: i32, y: i32) {
        let Some(hit) = tree::click(placed, x, y) else {
            return;
        };
        let Some(id) = hit.id.as_deref() else {
            return;
        };
        match id {
            "play-pause" => self.paused = !self.paused,
            "previous" => {
                self.playing = if self.playing == 0 { TRACKS.len() - 1 } else { self.playing - 1 };
                self.position = 0;
            }
            "forward" => {
                self.playing = (self.playing + 1) % TRACKS.len();
                self.position = 0;
            }
            _ => {
                if let Some(i) = id.strip_prefix("track:").and_then(|s| s.parse().ok()) {
                    self.selected = i;
                    self.playing = i;
                    self.position = 0;
                    self.paused = false;
                }
            }
        }
    }

    fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.position += 1;
        if self.position >= TRACKS[self.playing].length {
            self.playing = (self.playing + 1) % TRACKS.len();
            self.position = 0;
        }
    }
}

fn clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn main() -> coda::Result<()> {
    color_backtrace::install();

    let mut term = Term::new();
    term.start()?;
    term.set_title("coda player")?;
    defer! {
        let mut term = Term::new();
        let _ = term.stop();
    }

    let size = Term::size()?;
    let mut rend = Renderer::new(size.w, size.h);
    let mut app = App::new();
    app.render(&mut rend)?;

    loop {
        // Drive the scrubber once a second when idle.
        if !event::poll(Duration::from_secs(1)).map_err(coda::Error::from)? {
            app.tick();
            app.render(&mut rend)?;
            continue;
        }
        let placed = layout(
            &app.ui(),
            Rect::new(0, 0, rend.size().w, rend.size().h),
        );
        match event::read().map_err(coda::Error::from)? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Up | KeyCode::Char('k') => {
                    app.selected = app.selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.selected = (app.selected + 1).min(TRACKS.len() - 1);
                }
                KeyCode::Enter => {
                    app.playing = app.selected;
                    app.position = 0;
                    app.paused = false;
                }
                KeyCode::Char(' ') => app.paused = !app.paused,
                _ => {}
            },
            Event::Mouse(m) => {
                if let MouseEventKind::Down(MouseButton::Left) = m.kind {
                    app.handle_click(&placed, m.column as i32, m.row as i32);
                }
            }
            Event::Resize(w, h) => {
                rend.resize(w as i32, h as i32);
            }
            _ => {}
        }
        app.render(&mut rend)?;
    }

    Ok(())
}
