//! Draw-command extraction.
//!
//! Walks a positioned tree and flattens it into primitive commands for the
//! renderer. Commands are collected depth-first, a node's own commands ahead
//! of its children's; callers stable-sort by z ([`z_sorted`]) before handing
//! the list to the renderer, so insertion order breaks ties.

use crate::{
    layout::Placed,
    node::Kind,
    style::{AttrSet, Gradient, Rgb},
};

/// Left cap glyph of a button pill.
pub const BUTTON_CAP_LEFT: char = '\u{e0b6}';
/// Right cap glyph of a button pill.
pub const BUTTON_CAP_RIGHT: char = '\u{e0b4}';

/// A primitive drawing operation, resolved to absolute coordinates and
/// concrete colors.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// A filled rectangle; with a title it renders as a titled box.
    Rect {
        id: Option<String>,
        z: i32,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        title: Option<String>,
        fg: Option<Gradient>,
        bg: Option<Gradient>,
    },
    /// A single line of text.
    Text {
        id: Option<String>,
        z: i32,
        x: i32,
        y: i32,
        text: String,
        fg: Option<Gradient>,
        bg: Option<Gradient>,
        attrs: AttrSet,
    },
    /// A horizontal run of a single glyph.
    HLine {
        id: Option<String>,
        z: i32,
        x: i32,
        y: i32,
        w: i32,
        fg: Gradient,
        bg: Option<Gradient>,
        glyph: char,
    },
}

impl DrawCmd {
    /// The command's z-order.
    pub fn z(&self) -> i32 {
        match self {
            Self::Rect { z, .. } | Self::Text { z, .. } | Self::HLine { z, .. } => *z,
        }
    }
}

/// Flatten a positioned tree into draw commands. Nodes with a non-positive
/// extent emit nothing themselves but their children are still visited, so
/// floating descendants of collapsed nodes render.
pub fn draw(node: &Placed) -> Vec<DrawCmd> {
    let mut out = Vec::new();
    emit(node, &mut out);
    out
}

/// Stable-sort commands by z. Ties keep their relative insertion order,
/// which preserves the parent-before-child paint order within a layer.
pub fn z_sorted(mut cmds: Vec<DrawCmd>) -> Vec<DrawCmd> {
    cmds.sort_by_key(DrawCmd::z);
    cmds
}

fn emit(node: &Placed, out: &mut Vec<DrawCmd>) {
    let r = node.rect;
    if r.w > 0 && r.h > 0 {
        match &node.kind {
            Kind::Panel | Kind::ScrollPanel { .. } | Kind::Image => {
                out.push(DrawCmd::Rect {
                    id: node.id.clone(),
                    z: node.z,
                    x: r.tl.x,
                    y: r.tl.y,
                    w: r.w,
                    h: r.h,
                    title: node.style.title.clone(),
                    fg: node.style.fg,
                    bg: node.style.bg,
                });
            }
            Kind::Text { text } => {
                out.push(DrawCmd::Text {
                    id: node.id.clone(),
                    z: node.z,
                    x: r.tl.x,
                    y: r.tl.y,
                    text: text.chars().take(r.w as usize).collect(),
                    fg: node.style.fg,
                    bg: node.style.bg,
                    attrs: node.style.attrs,
                });
            }
            Kind::HProgress { value, total } => {
                let glyph = if node.style.thin { '─' } else { '━' };
                let filled = if *total == 0 {
                    0
                } else {
                    (r.w as f64 * *value as f64 / *total as f64).floor() as i32
                };
                out.push(DrawCmd::HLine {
                    id: node.id.clone(),
                    z: node.z,
                    x: r.tl.x,
                    y: r.tl.y,
                    w: r.w,
                    fg: node.style.bg.unwrap_or(Gradient::solid(Rgb::BLACK)),
                    bg: None,
                    glyph,
                });
                out.push(DrawCmd::HLine {
                    id: node.id.clone(),
                    z: node.z,
                    x: r.tl.x,
                    y: r.tl.y,
                    w: filled.min(r.w),
                    fg: node.style.fg.unwrap_or(Gradient::solid(Rgb::WHITE)),
                    bg: None,
                    glyph,
                });
            }
            Kind::Button { label } => {
                let bg = node.style.bg.unwrap_or(Gradient::solid(Rgb::WHITE));
                let mid = r.tl.y + (r.h - 1) / 2;
                out.push(DrawCmd::Rect {
                    id: node.id.clone(),
                    z: node.z,
                    x: r.tl.x + 1,
                    y: r.tl.y,
                    w: r.w - 2,
                    h: r.h,
                    title: None,
                    fg: node.style.fg,
                    bg: Some(bg),
                });
                out.push(DrawCmd::Text {
                    id: node.id.clone(),
                    z: node.z,
                    x: r.tl.x,
                    y: mid,
                    text: BUTTON_CAP_LEFT.to_string(),
                    fg: Some(Gradient::solid(bg.start)),
                    bg: None,
                    attrs: AttrSet::default(),
                });
                out.push(DrawCmd::Text {
                    id: node.id.clone(),
                    z: node.z,
                    x: r.right() - 1,
                    y: mid,
                    text: BUTTON_CAP_RIGHT.to_string(),
                    fg: Some(Gradient::solid(bg.end)),
                    bg: None,
                    attrs: AttrSet::default(),
                });
                let inner = (r.w - 2).max(0) as usize;
                let label: String = label.chars().take(inner).collect();
                let off = (inner.saturating_sub(label.chars().count())) / 2;
                out.push(DrawCmd::Text {
                    id: node.id.clone(),
                    z: node.z,
                    x: r.tl.x + 1 + off as i32,
                    y: mid,
                    text: label,
                    fg: node.style.fg,
                    bg: None,
                    attrs: node.style.attrs,
                });
            }
        }
    }
    for child in &node.children {
        emit(child, out);
    }
}
