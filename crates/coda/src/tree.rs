//! Queries over a positioned tree: containment, click resolution, and
//! identifier lookup.

use crate::layout::Placed;

/// Containment test used by hit-testing. Bounds are inclusive on all four
/// edges, matching the pointer coordinates the mouse protocol reports.
pub fn in_range(node: &Placed, x: i32, y: i32) -> bool {
    x >= node.rect.tl.x
        && x <= node.rect.tl.x + node.rect.w
        && y >= node.rect.tl.y
        && y <= node.rect.tl.y + node.rect.h
}

/// The topmost clickable node at a point, or `None`.
///
/// Candidates are collected depth-first with siblings visited in ascending
/// z, and the last candidate with the highest effective z wins: a deeper
/// node beats its ancestors at equal z because it is collected later.
pub fn click<'a>(root: &'a Placed, x: i32, y: i32) -> Option<&'a Placed> {
    let mut hits: Vec<&Placed> = Vec::new();
    collect(root, x, y, &mut hits);
    let mut best: Option<&Placed> = None;
    for hit in hits {
        if best.is_none_or(|b| hit.z >= b.z) {
            best = Some(hit);
        }
    }
    best
}

fn collect<'a>(node: &'a Placed, x: i32, y: i32, out: &mut Vec<&'a Placed>) {
    if node.style.clickable && in_range(node, x, y) {
        out.push(node);
    }
    let mut order: Vec<usize> = (0..node.children.len()).collect();
    order.sort_by_key(|&i| node.children[i].z);
    for i in order {
        collect(&node.children[i], x, y, out);
    }
}

/// Pre-order depth-first search for a node by identifier. A miss is not an
/// error; callers treat it as "not on screen this frame".
pub fn element_by_id<'a>(root: &'a Placed, id: &str) -> Option<&'a Placed> {
    if root.id.as_deref() == Some(id) {
        return Some(root);
    }
    for child in &root.children {
        if let Some(found) = element_by_id(child, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::layout,
        node::Node,
        style::{Size, Style},
    };
    use geom::Rect;

    fn fixed(w: i32, h: i32) -> Style {
        Style::new().with_w(Size::fixed(w)).with_h(Size::fixed(h))
    }

    #[test]
    fn in_range_is_inclusive() {
        let tree = Node::panel(fixed(10, 4));
        let p = layout(&tree, Rect::new(0, 0, 40, 10));
        assert!(in_range(&p, 0, 0));
        assert!(in_range(&p, 10, 4));
        assert!(!in_range(&p, 11, 4));
        assert!(!in_range(&p, -1, 0));
    }

    #[test]
    fn click_prefers_higher_z() {
        // Two overlapping floating panels; the z=1 panel wins at a shared
        // point.
        let tree = Node::panel(Style::new()).with_children(vec![
            Node::panel(fixed(10, 10).with_position(Size::fixed(0), Size::fixed(0))).with_id("low"),
            Node::panel(
                fixed(10, 10)
                    .with_position(Size::fixed(0), Size::fixed(0))
                    .with_z(1),
            )
            .with_id("high"),
        ]);
        let p = layout(&tree, Rect::new(0, 0, 40, 20));
        let hit = click(&p, 5, 5).unwrap();
        assert_eq!(hit.id.as_deref(), Some("high"));
    }

    #[test]
    fn click_prefers_descendants_at_equal_z() {
        let tree = Node::panel(Style::new()).with_children(vec![
            Node::panel(Style::new())
                .with_id("outer")
                .with_children(vec![Node::button(fixed(8, 1), "Play").with_id("play")]),
        ]);
        let p = layout(&tree, Rect::new(0, 0, 40, 10));
        let hit = click(&p, 2, 0).unwrap();
        assert_eq!(hit.id.as_deref(), Some("play"));
    }

    #[test]
    fn click_skips_unclickable() {
        let tree = Node::panel(Style::new().not_clickable()).with_children(vec![
            Node::text(fixed(10, 1).not_clickable(), "label").with_id("label"),
        ]);
        let p = layout(&tree, Rect::new(0, 0, 40, 10));
        assert!(click(&p, 1, 0).is_none());
    }

    #[test]
    fn click_outside_everything() {
        let tree = Node::panel(fixed(10, 4));
        let p = layout(&tree, Rect::new(0, 0, 40, 10));
        assert!(click(&p, 30, 8).is_none());
    }

    #[test]
    fn element_lookup() {
        let tree = Node::panel(Style::new()).with_children(vec![
            Node::panel(Style::new()).with_id("sidebar").with_children(vec![
                Node::text(Style::new(), "now playing").with_id("title"),
            ]),
        ]);
        let p = layout(&tree, Rect::new(0, 0, 40, 10));
        assert!(element_by_id(&p, "sidebar").is_some());
        assert_eq!(
            element_by_id(&p, "title").unwrap().id.as_deref(),
            Some("title")
        );
        assert!(element_by_id(&p, "missing").is_none());
    }
}
