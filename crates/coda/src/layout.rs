//! The layout engine.
//!
//! A single stateless pass: [`layout`] consumes a content tree plus an
//! available rectangle and produces a parallel tree of positioned nodes.
//! Nothing is retained between calls and the input tree is never mutated,
//! so repeated layouts of the same tree always agree.

use geom::Rect;
use tracing::trace;

use crate::{
    node::{Kind, Node},
    style::{Dir, Gradient, Size, Style},
};

/// A content node with its computed screen rectangle and effective z.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    /// Identifier carried over from the content node.
    pub id: Option<String>,
    /// The node variant.
    pub kind: Kind,
    /// Style record, with the foreground resolved through inheritance.
    pub style: Style,
    /// Absolute position and extent. Extents may be non-positive, in which
    /// case the node draws nothing but its children are still present.
    pub rect: Rect,
    /// Effective z: the node's own z plus all ancestors'.
    pub z: i32,
    /// Positioned children.
    pub children: Vec<Placed>,
}

/// Marks, per axis, whether the available extent handed to a node was
/// produced by percentage resolution in the parent. A percentage-sized node
/// then takes the extent as-is instead of shrinking a second time.
#[derive(Debug, Clone, Copy, Default)]
struct FromPct {
    w: bool,
    h: bool,
}

/// The outcome of resolving a [`Size`] against available space.
enum Resolved {
    /// Fully determined before leftover distribution.
    Consume(i32),
    /// Claims leftover space with this weight.
    Grow(f32),
}

fn resolve(size: Size, avail: i32, from_pct: bool) -> Resolved {
    match size {
        Size::Static(n) => Resolved::Consume(n),
        Size::Percentage(f) => {
            if from_pct {
                Resolved::Consume(avail)
            } else {
                // Rounds up, uniformly, so adjacent percentage children
                // close 1-cell gaps. The epsilon keeps binary float noise
                // from pushing exact products past the next integer.
                let exact = avail as f64 * f.clamp(0.0, 1.0) as f64;
                Resolved::Consume((exact - 1e-6).ceil() as i32)
            }
        }
        Size::Grow(weight) => Resolved::Grow(weight),
    }
}

/// Resolve a floating position component. Grow has no meaning here and
/// anchors at the content origin.
fn resolve_pos(size: Size, extent: i32) -> i32 {
    match resolve(size, extent, false) {
        Resolved::Consume(n) => n,
        Resolved::Grow(_) => 0,
    }
}

fn main_size(style: &Style, dir: Dir) -> Size {
    match dir {
        Dir::Horizontal => style.w,
        Dir::Vertical => style.h,
    }
}

fn cross_size(style: &Style, dir: Dir) -> Size {
    match dir {
        Dir::Horizontal => style.h,
        Dir::Vertical => style.w,
    }
}

/// Narrowing-only edge adjustment: a slot may not extend past its container.
/// This is not a true clip rectangle; extents may go negative once the flow
/// cursor has passed the container's edge.
fn clip_to(slot: Rect, container: &Rect) -> Rect {
    Rect::new(
        slot.tl.x,
        slot.tl.y,
        slot.w.min(container.right() - slot.tl.x),
        slot.h.min(container.bottom() - slot.tl.y),
    )
}

/// Lay out a content tree within an available rectangle, producing the
/// positioned tree for this frame.
pub fn layout(node: &Node, avail: Rect) -> Placed {
    trace!(w = avail.w, h = avail.h, "layout pass");
    place(node, avail, FromPct::default(), None, 0, false)
}

fn place(
    node: &Node,
    avail: Rect,
    from_pct: FromPct,
    inherited_fg: Option<Gradient>,
    base_z: i32,
    floated: bool,
) -> Placed {
    let style = &node.style;

    // A title reserves a one-cell border on all sides before children are
    // laid out. The inflation is local to this pass; the input style is
    // untouched.
    let pad = if style.title.is_some() {
        style.padding.inflate(1)
    } else {
        style.padding
    };

    // Floating nodes sit outside flow and keep their requested extent even
    // when the parent has collapsed; flow nodes narrow to the slot.
    let w = match resolve(style.w, avail.w, from_pct.w) {
        Resolved::Consume(n) if floated => n,
        Resolved::Consume(n) => n.min(avail.w),
        Resolved::Grow(_) => avail.w,
    };
    let h = match resolve(style.h, avail.h, from_pct.h) {
        Resolved::Consume(n) if floated => n,
        Resolved::Consume(n) => n.min(avail.h),
        Resolved::Grow(_) => avail.h,
    };

    let rect = Rect::new(avail.tl.x, avail.tl.y, w, h);
    let z = base_z + style.z;
    let fg = style.fg.or(inherited_fg);
    let content = rect.inset(pad.left, pad.top, pad.right, pad.bottom);

    // When this node's own extent came from a percentage, a percentage-sized
    // child takes the content extent as-is: without this, nested percentage
    // chains shrink twice.
    let own_pct = FromPct {
        w: matches!(style.w, Size::Percentage(_)),
        h: matches!(style.h, Size::Percentage(_)),
    };

    // A vertical scroll panel drops its first `offset` in-flow children for
    // this frame. Scrolling is child-granular; there is no sub-row offset.
    let skip = match node.kind {
        Kind::ScrollPanel { offset } if style.child_dir == Dir::Vertical => offset,
        _ => 0,
    };
    let mut skipped = 0;
    let visible: Vec<&Node> = node
        .children
        .iter()
        .filter(|c| {
            if c.style.position.is_none() && skipped < skip {
                skipped += 1;
                false
            } else {
                true
            }
        })
        .collect();

    let dir = style.child_dir;
    let (main_extent, cross_extent) = match dir {
        Dir::Horizontal => (content.w, content.h),
        Dir::Vertical => (content.h, content.w),
    };

    // First pass: consume-type children resolve now, grow children pool
    // their weights. Free space is whatever remains after consumes and the
    // inter-child gap reservation.
    let mut main_sizes: Vec<Option<i32>> = Vec::with_capacity(visible.len());
    let mut flow_count = 0;
    let mut grow_total = 0.0f32;
    let mut free = main_extent;
    for child in &visible {
        if child.style.position.is_some() {
            main_sizes.push(None);
            continue;
        }
        flow_count += 1;
        let own_pct_main = match dir {
            Dir::Horizontal => own_pct.w,
            Dir::Vertical => own_pct.h,
        };
        match resolve(main_size(&child.style, dir), main_extent, own_pct_main) {
            Resolved::Consume(n) => {
                free -= n;
                main_sizes.push(Some(n));
            }
            Resolved::Grow(_) => {
                grow_total += grow_weight(&child.style, dir);
                main_sizes.push(None);
            }
        }
    }
    free -= style.child_gap * flow_count;

    // Second pass: distribute the leftover across grow children. With no
    // grow children the pool is never divided. Negative leftover is not
    // clamped; undersized slots flow through as negative extents.
    for (i, child) in visible.iter().enumerate() {
        if child.style.position.is_some() || main_sizes[i].is_some() {
            continue;
        }
        let weight = grow_weight(&child.style, dir);
        main_sizes[i] = Some(if grow_total > 0.0 {
            // Multiply before dividing: the quotient is then correctly
            // rounded and exact shares floor cleanly.
            (weight as f64 * free as f64 / grow_total as f64).floor() as i32
        } else {
            0
        });
    }

    let used: i32 = style.child_gap * flow_count
        + main_sizes
            .iter()
            .zip(&visible)
            .filter(|(_, c)| c.style.position.is_none())
            .map(|(s, _)| s.unwrap_or(0))
            .sum::<i32>();

    let (center_main, center_cross) = match dir {
        Dir::Horizontal => (style.center.horizontal, style.center.vertical),
        Dir::Vertical => (style.center.vertical, style.center.horizontal),
    };

    let mut cursor = match dir {
        Dir::Horizontal => content.tl.x,
        Dir::Vertical => content.tl.y,
    };
    if center_main {
        cursor += (main_extent - used) / 2;
    }

    let mut children = Vec::with_capacity(visible.len());
    for (i, child) in visible.iter().enumerate() {
        if let Some((px, py)) = child.style.position {
            // Floating: full content extent as available space, placed at
            // the resolved position, no flow participation.
            let ox = resolve_pos(px, content.w);
            let oy = resolve_pos(py, content.h);
            let slot = Rect::new(
                content.tl.x + ox,
                content.tl.y + oy,
                content.w,
                content.h,
            );
            children.push(place(child, slot, own_pct, fg, z, true));
            continue;
        }

        let main = main_sizes[i].unwrap_or(0);
        let cross_sz = cross_size(&child.style, dir);
        let own_pct_cross = match dir {
            Dir::Horizontal => own_pct.h,
            Dir::Vertical => own_pct.w,
        };
        let cross = match resolve(cross_sz, cross_extent, own_pct_cross) {
            Resolved::Consume(n) => n,
            Resolved::Grow(_) => cross_extent,
        };
        let cross_off = if center_cross {
            (cross_extent - cross) / 2
        } else {
            0
        };

        let slot = match dir {
            Dir::Horizontal => Rect::new(cursor, content.tl.y + cross_off, main, cross),
            Dir::Vertical => Rect::new(content.tl.x + cross_off, cursor, cross, main),
        };
        let main_pct = matches!(main_size(&child.style, dir), Size::Percentage(_));
        let cross_pct = matches!(cross_sz, Size::Percentage(_));
        let from = match dir {
            Dir::Horizontal => FromPct {
                w: main_pct,
                h: cross_pct,
            },
            Dir::Vertical => FromPct {
                w: cross_pct,
                h: main_pct,
            },
        };
        children.push(place(child, clip_to(slot, &content), from, fg, z, false));
        cursor += main + style.child_gap;
    }

    let mut style = style.clone();
    style.fg = fg;
    Placed {
        id: node.id.clone(),
        kind: node.kind.clone(),
        style,
        rect,
        z,
        children,
    }
}

/// A grow child's weight along the flow axis. Negative weights count as
/// zero.
fn grow_weight(style: &Style, dir: Dir) -> f32 {
    match main_size(style, dir) {
        Size::Grow(w) => w.max(0.0),
        _ => 0.0,
    }
}
