//! Interactive reordering for the rectangle-packing algorithm.
//!
//! Dropping a node onto a sibling asks the server to move it to that
//! sibling's slot. Dropping it elsewhere reshapes the drawing, which is
//! expressed as a new aspect ratio for the parent.

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::geometry::{Point, Rect};
use crate::interactive::actions::Action;
use crate::interactive::overlay::Frame;

const ASPECT_RATIO_EPSILON: f64 = 1e-3;

/// The first sibling other than `target` whose absolute bounds contain
/// `drop_point`.
pub fn hovered_sibling(
    frame: &Frame<'_>,
    nodes: &[NodeIndex],
    target: NodeIndex,
    drop_point: Point,
) -> Option<NodeIndex> {
    nodes
        .iter()
        .copied()
        .filter(|&n| n != target)
        .find(|&n| frame.scene.absolute_bounds(n).contains(drop_point))
}

fn bounding_box<F>(nodes: &[NodeIndex], bounds: F) -> Option<Rect>
where
    F: Fn(NodeIndex) -> Rect,
{
    nodes.iter().map(|&n| bounds(n)).reduce(|a, b| a.union(&b))
}

fn aspect_ratio(rect: Rect) -> Option<f64> {
    (rect.height > 0.0).then(|| rect.width / rect.height)
}

/// Width over height of the siblings' drawing, from pre-drag positions.
pub fn origin_aspect_ratio(frame: &Frame<'_>, nodes: &[NodeIndex]) -> Option<f64> {
    bounding_box(nodes, |n| Rect::from_parts(frame.origin(n), frame.size(n)))
        .and_then(aspect_ratio)
}

/// Width over height of the siblings' drawing, from live positions.
pub fn live_aspect_ratio(frame: &Frame<'_>, nodes: &[NodeIndex]) -> Option<f64> {
    bounding_box(nodes, |n| Rect::from_parts(frame.position(n), frame.size(n)))
        .and_then(aspect_ratio)
}

/// Decide the action for a rect-packing drop at `drop_point` (absolute
/// diagram coordinates).
pub fn set_generate_rect_pack_action(
    frame: &Frame<'_>,
    nodes: &[NodeIndex],
    target: NodeIndex,
    parent: NodeIndex,
    drop_point: Point,
) -> Action {
    let Some(target_props) = frame.scene.rect_pack(target) else {
        return Action::Refresh;
    };

    if let Some(hit) = hovered_sibling(frame, nodes, target, drop_point) {
        let Some(other) = frame.scene.rect_pack(hit) else {
            return Action::Refresh;
        };
        let order = other.actual_position();
        if order == target_props.actual_position() {
            return Action::Refresh;
        }
        let action = Action::RectPackSetPositionConstraint {
            id: frame.id(target).to_string(),
            order,
        };
        debug!(?action, swap_with = frame.id(hit), "rect packing drop decided");
        return action;
    }

    let (Some(before), Some(after)) = (
        origin_aspect_ratio(frame, nodes),
        live_aspect_ratio(frame, nodes),
    ) else {
        return Action::Refresh;
    };
    let stored = frame
        .scene
        .node(parent)
        .level
        .as_ref()
        .and_then(|l| l.aspect_ratio);
    let unchanged = (after - before).abs() < ASPECT_RATIO_EPSILON
        || stored.is_some_and(|s| (after - s).abs() < ASPECT_RATIO_EPSILON);
    if unchanged {
        return Action::Refresh;
    }
    let action = Action::SetAspectRatio {
        id: frame.id(parent).to_string(),
        aspect_ratio: after,
    };
    debug!(?action, "rect packing aspect ratio changed");
    action
}

#[cfg(test)]
#[path = "../../tests/rust/test_rectpack.rs"]
mod tests;
