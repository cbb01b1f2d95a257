//! Content tree construction.
//!
//! Application code rebuilds a [`Node`] tree from scratch every frame and
//! hands it to [`crate::layout`]. Nodes are plain values: no identity is
//! retained across frames beyond the optional `id` string.

use crate::style::Style;

/// What a content node is, with its variant-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// A container that lays out its children.
    Panel,
    /// A vertical container that skips its first `offset` children.
    ScrollPanel {
        /// Count of leading children scrolled out of view.
        offset: usize,
    },
    /// A single line of text.
    Text {
        /// The string to draw, truncated to the node's width.
        text: String,
    },
    /// Reserved space for album art. Fills like a panel.
    Image,
    /// A horizontal progress bar.
    HProgress {
        /// Progress numerator.
        value: u64,
        /// Progress denominator. Zero renders an empty bar.
        total: u64,
    },
    /// A clickable pill-shaped button.
    Button {
        /// The button label.
        label: String,
    },
}

/// A node in the content tree: style, children, and an optional identifier
/// for later lookup in the positioned tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identifier for hit-test dispatch and lookup.
    pub id: Option<String>,
    /// The node variant.
    pub kind: Kind,
    /// Style record.
    pub style: Style,
    /// Child nodes, in placement order.
    pub children: Vec<Node>,
}

impl Node {
    fn new(kind: Kind, style: Style) -> Self {
        Self {
            id: None,
            kind,
            style,
            children: Vec::new(),
        }
    }

    /// A container panel.
    pub fn panel(style: Style) -> Self {
        Self::new(Kind::Panel, style)
    }

    /// A scrolling panel with `offset` children scrolled out of view.
    pub fn scroll_panel(style: Style, offset: usize) -> Self {
        Self::new(Kind::ScrollPanel { offset }, style)
    }

    /// A text line.
    pub fn text(style: Style, text: impl Into<String>) -> Self {
        Self::new(Kind::Text { text: text.into() }, style)
    }

    /// An image placeholder.
    pub fn image(style: Style) -> Self {
        Self::new(Kind::Image, style)
    }

    /// A horizontal progress bar showing `value` of `total`.
    pub fn hprogress(style: Style, value: u64, total: u64) -> Self {
        Self::new(Kind::HProgress { value, total }, style)
    }

    /// A button with a label.
    pub fn button(style: Style, label: impl Into<String>) -> Self {
        Self::new(
            Kind::Button {
                label: label.into(),
            },
            style,
        )
    }

    /// Attach an identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach children.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Append a single child.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }
}
