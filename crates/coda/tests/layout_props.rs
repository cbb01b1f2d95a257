//! Property tests over the layout engine's space distribution.

use coda::{Node, Size, Style, layout};
use geom::Rect;
use proptest::prelude::*;

proptest! {
    /// Equal-weight grow children each receive floor(F/N); the rounding
    /// shortfall is strictly less than the child count.
    #[test]
    fn grow_distribution_is_fair(free in 0i32..300, n in 1usize..12) {
        let tree = Node::panel(Style::new())
            .with_children((0..n).map(|_| Node::panel(Style::new())).collect());
        let placed = layout(&tree, Rect::new(0, 0, free, 1));
        let each = free / n as i32;
        let mut sum = 0;
        for child in &placed.children {
            prop_assert_eq!(child.rect.w, each);
            sum += child.rect.w;
        }
        prop_assert!(sum <= free);
        prop_assert!(free - sum < n as i32);
    }

    /// Consume-only children never overrun the parent's content extent,
    /// and flow placement keeps every child inside the right edge.
    #[test]
    fn consume_children_conserve_space(
        widths in prop::collection::vec(0i32..40, 1..8),
        extent in 1i32..120,
        gap in 0i32..4,
    ) {
        let tree = Node::panel(Style::new().with_child_gap(gap)).with_children(
            widths
                .iter()
                .map(|&w| Node::panel(Style::new().with_w(Size::fixed(w))))
                .collect(),
        );
        let placed = layout(&tree, Rect::new(0, 0, extent, 1));
        for child in &placed.children {
            prop_assert!(child.rect.right() <= extent);
        }
    }

    /// Percentage sizing is clamped: anything above 1 behaves as 1 and
    /// anything at or below 0 resolves to zero width.
    #[test]
    fn percentage_clamps(f in -2.0f32..4.0, extent in 1i32..200) {
        let tree = Node::panel(Style::new()).with_children(vec![Node::panel(
            Style::new().with_w(Size::percentage(f)),
        )]);
        let placed = layout(&tree, Rect::new(0, 0, extent, 1));
        let w = placed.children[0].rect.w;
        if f <= 0.0 {
            prop_assert_eq!(w, 0);
        } else if f >= 1.0 {
            prop_assert_eq!(w, extent);
        } else {
            prop_assert!(w >= 0 && w <= extent);
        }
    }

    /// Layout is a pure function: two passes over one tree agree exactly.
    #[test]
    fn layout_is_deterministic(w in 1i32..100, h in 1i32..40) {
        let tree = Node::panel(Style::new().with_title("t")).with_children(vec![
            Node::panel(Style::new().with_w(Size::fixed(7))),
            Node::panel(Style::new()),
        ]);
        let a = layout(&tree, Rect::new(0, 0, w, h));
        let b = layout(&tree, Rect::new(0, 0, w, h));
        prop_assert_eq!(a, b);
    }
}
