//! Styling: colors, sizing, and the per-node style record.

mod color;

use std::ops::BitOr;

pub use color::{Gradient, Rgb};

/// A text attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Attr {
    Bold,
    Faint,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
}

/// A set of active text attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct AttrSet {
    pub bold: bool,
    pub faint: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink: bool,
    pub reverse: bool,
    pub hidden: bool,
    pub strikethrough: bool,
}

impl AttrSet {
    /// Construct a set with a single attribute turned on.
    pub fn new(attr: Attr) -> Self {
        Self::default().with(attr)
    }

    /// Is this attribute set empty?
    pub fn is_empty(&self) -> bool {
        !(self.bold
            || self.faint
            || self.italic
            || self.underline
            || self.blink
            || self.reverse
            || self.hidden
            || self.strikethrough)
    }

    /// A helper for progressive construction of attribute sets.
    pub fn with(mut self, attr: Attr) -> Self {
        match attr {
            Attr::Bold => self.bold = true,
            Attr::Faint => self.faint = true,
            Attr::Italic => self.italic = true,
            Attr::Underline => self.underline = true,
            Attr::Blink => self.blink = true,
            Attr::Reverse => self.reverse = true,
            Attr::Hidden => self.hidden = true,
            Attr::Strikethrough => self.strikethrough = true,
        };
        self
    }
}

/// How a node claims space along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// An exact cell count.
    Static(i32),
    /// A fraction of the parent's available space, clamped to 0..=1.
    Percentage(f32),
    /// A share of leftover space, weighted among grow siblings.
    Grow(f32),
}

impl Size {
    /// An exact cell count.
    pub fn fixed(n: i32) -> Self {
        Self::Static(n)
    }

    /// A fraction of the parent's available space.
    pub fn percentage(f: f32) -> Self {
        Self::Percentage(f)
    }

    /// Claim leftover space with weight 1.
    pub fn grow() -> Self {
        Self::Grow(1.0)
    }

    /// Claim leftover space with an explicit weight.
    pub fn weighted(weight: f32) -> Self {
        Self::Grow(weight)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::Grow(1.0)
    }
}

/// Space reserved inside a node's edges, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Padding {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Padding {
    /// Explicit padding per edge.
    pub fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// The same padding on all four edges.
    pub fn uniform(n: i32) -> Self {
        Self::new(n, n, n, n)
    }

    /// Uniform padding with left/right doubled, compensating for terminal
    /// cells being roughly twice as tall as they are wide.
    pub fn normalized(n: i32) -> Self {
        Self::new(n, n, n * 2, n * 2)
    }

    /// Grow every edge by `n`.
    pub fn inflate(&self, n: i32) -> Self {
        Self::new(self.top + n, self.bottom + n, self.left + n, self.right + n)
    }
}

/// The axis along which a parent places its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Dir {
    #[default]
    Horizontal,
    Vertical,
}

/// Which axes children are centered on. Flags combine with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Center {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Center {
    /// No centering.
    pub const NONE: Self = Self {
        horizontal: false,
        vertical: false,
    };
    /// Center along the horizontal axis.
    pub const HORIZONTAL: Self = Self {
        horizontal: true,
        vertical: false,
    };
    /// Center along the vertical axis.
    pub const VERTICAL: Self = Self {
        horizontal: false,
        vertical: true,
    };
    /// Center on both axes.
    pub const BOTH: Self = Self {
        horizontal: true,
        vertical: true,
    };
}

impl BitOr for Center {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            horizontal: self.horizontal || rhs.horizontal,
            vertical: self.vertical || rhs.vertical,
        }
    }
}

/// The style record attached to every content node.
///
/// Every field has an explicit default; builders below chain in the usual
/// way. `title` implies a one-cell border on all sides at layout time and
/// box-drawing at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Width sizing.
    pub w: Size,
    /// Height sizing.
    pub h: Size,
    /// Foreground ramp; inherited from the parent when absent.
    pub fg: Option<Gradient>,
    /// Background ramp; absent means transparent.
    pub bg: Option<Gradient>,
    /// Inner padding.
    pub padding: Padding,
    /// Axis along which children are placed.
    pub child_dir: Dir,
    /// Cells of spacing between children.
    pub child_gap: i32,
    /// Child centering axes.
    pub center: Center,
    /// Whether hit-testing may return this node.
    pub clickable: bool,
    /// Box title; reserves a one-cell border.
    pub title: Option<String>,
    /// Use thin glyphs for progress bars.
    pub thin: bool,
    /// Text attributes for text nodes.
    pub attrs: AttrSet,
    /// Floating placement; opts the node out of normal flow.
    pub position: Option<(Size, Size)>,
    /// Z offset, additive with ancestors.
    pub z: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            w: Size::default(),
            h: Size::default(),
            fg: None,
            bg: None,
            padding: Padding::default(),
            child_dir: Dir::Horizontal,
            child_gap: 0,
            center: Center::NONE,
            clickable: true,
            title: None,
            thin: false,
            attrs: AttrSet::default(),
            position: None,
            z: 0,
        }
    }
}

impl Style {
    /// A default style record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_w(mut self, w: Size) -> Self {
        self.w = w;
        self
    }

    pub fn with_h(mut self, h: Size) -> Self {
        self.h = h;
        self
    }

    /// Set both axes at once.
    pub fn with_size(mut self, w: Size, h: Size) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    /// Claim leftover space on both axes with the given weight.
    pub fn with_grow(mut self, weight: f32) -> Self {
        self.w = Size::Grow(weight);
        self.h = Size::Grow(weight);
        self
    }

    pub fn with_fg(mut self, fg: Gradient) -> Self {
        self.fg = Some(fg);
        self
    }

    pub fn with_bg(mut self, bg: Gradient) -> Self {
        self.bg = Some(bg);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_child_dir(mut self, dir: Dir) -> Self {
        self.child_dir = dir;
        self
    }

    pub fn with_child_gap(mut self, gap: i32) -> Self {
        self.child_gap = gap;
        self
    }

    pub fn with_center(mut self, center: Center) -> Self {
        self.center = center;
        self
    }

    /// Exclude this node from hit-testing.
    pub fn not_clickable(mut self) -> Self {
        self.clickable = false;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Thin progress-bar glyphs.
    pub fn with_thin(mut self) -> Self {
        self.thin = true;
        self
    }

    pub fn with_attr(mut self, attr: Attr) -> Self {
        self.attrs = self.attrs.with(attr);
        self
    }

    /// Float the node at an explicit position instead of in flow.
    pub fn with_position(mut self, x: Size, y: Size) -> Self {
        self.position = Some((x, y));
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }
}
