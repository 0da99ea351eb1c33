//! Where a dragged node would land: candidate layer, slot inside the layer,
//! and the corrections needed to stay consistent with constraints already
//! set on other nodes.

use petgraph::graph::NodeIndex;

use super::layers::{Layer, nodes_of_layer};
use crate::geometry::Direction;
use crate::interactive::overlay::Frame;
use crate::scene::SceneGraph;

/// Index of the layer the node's centre currently falls into.
///
/// The first layer whose far border lies beyond the centre wins, so a centre
/// in front of the first layer resolves to layer 0. A centre behind the last
/// layer implies a new trailing layer (`layers.len()`), unless the node is
/// already the only occupant of the last layer.
pub fn resolve_layer_of_node(
    frame: &Frame<'_>,
    node: NodeIndex,
    nodes: &[NodeIndex],
    layers: &[Layer],
    direction: Direction,
) -> usize {
    let c = direction.primary(frame.center(node));
    for (i, layer) in layers.iter().enumerate() {
        let before_end = if direction.is_reversed() {
            c > layer.end
        } else {
            c < layer.end
        };
        if before_end {
            return i;
        }
    }

    if let Some(last) = layers.len().checked_sub(1) {
        let last_nodes = nodes_of_layer(frame, nodes, last);
        if last_nodes.len() == 1 && last_nodes[0] == node && frame.is_selected(node) {
            return last;
        }
    }
    layers.len()
}

/// Correct a candidate layer for layer constraints that pushed other nodes
/// beyond their natural layer.
///
/// Among the other nodes at or before the candidate whose constraint exceeds
/// their `layer_id`, the one with the largest constraint shifts the
/// candidate by the same offset.
pub fn resolve_actual_layer(
    frame: &Frame<'_>,
    node: NodeIndex,
    nodes: &[NodeIndex],
    candidate: usize,
) -> usize {
    let mut best: Option<(usize, usize)> = None;
    for &n in nodes {
        if n == node {
            continue;
        }
        let Some(props) = frame.layered(n) else {
            continue;
        };
        let Some(cons) = props.layer_cons else {
            continue;
        };
        if props.layer_id <= candidate
            && cons > props.layer_id
            && best.is_none_or(|(max_cons, _)| cons > max_cons)
        {
            best = Some((cons, props.layer_id));
        }
    }
    match best {
        Some((max_cons, layer_id)) => max_cons + (candidate - layer_id),
        None => candidate,
    }
}

/// Sort `layer_nodes` along the in-layer axis and return `target`'s slot.
///
/// A member gets its sorted index; a non-member gets the index of the first
/// node lying beyond it (its insertion point).
pub fn resolve_position_in_layer(
    frame: &Frame<'_>,
    layer_nodes: &mut [NodeIndex],
    target: NodeIndex,
    direction: Direction,
) -> usize {
    let coord = |n: NodeIndex| direction.secondary(frame.position(n));
    layer_nodes.sort_by(|a, b| coord(*a).total_cmp(&coord(*b)));

    if let Some(i) = layer_nodes.iter().position(|&n| n == target) {
        return i;
    }
    let t = coord(target);
    layer_nodes
        .iter()
        .position(|&n| t < coord(n))
        .unwrap_or(layer_nodes.len())
}

/// Correct a candidate slot for a position constraint on the node above it.
///
/// If that neighbour has been pinned further down than its natural slot,
/// the target has to land behind the pin. When the target takes over the
/// neighbour's natural slot it snaps onto the pin itself.
pub fn resolve_actual_target_index(
    frame: &Frame<'_>,
    candidate: usize,
    already_in_layer: bool,
    layer_nodes: &[NodeIndex],
) -> usize {
    let Some(upper_idx) = candidate.checked_sub(1) else {
        return candidate;
    };
    let Some(&upper) = layer_nodes.get(upper_idx) else {
        return candidate;
    };
    let Some(props) = frame.layered(upper) else {
        return candidate;
    };
    match props.pos_cons {
        Some(cons) if cons > props.pos_id => {
            if already_in_layer && props.pos_id == candidate {
                cons
            } else {
                cons + 1
            }
        }
        _ => candidate,
    }
}

/// A layer is forbidden for `node` if a node it shares an edge with sits in
/// that layer and carries a layer constraint.
pub fn is_layer_forbidden(scene: &SceneGraph, node: NodeIndex, layer: usize) -> bool {
    scene.connected(node).into_iter().any(|other| {
        other != node
            && scene
                .layered(other)
                .is_some_and(|p| p.layer_id == layer && p.layer_cons.is_some())
    })
}

#[cfg(test)]
#[path = "../../../tests/rust/test_layered_position.rs"]
mod tests;
