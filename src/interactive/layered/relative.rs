//! Relative in-layer constraints: "X directly follows Y" instead of an
//! absolute slot.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use serde::Serialize;
use tracing::debug;

use super::layers::{Layer, nodes_of_layer};
use super::position::{resolve_layer_of_node, resolve_position_in_layer};
use crate::interactive::actions::Action;
use crate::interactive::overlay::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelCons {
    SuccessorOf,
    PredecessorOf,
    Undefined,
}

/// Relation the dragged `node` would get towards `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeConstraintData {
    pub rel_cons: RelCons,
    pub node: NodeIndex,
    pub target: Option<NodeIndex>,
}

impl RelativeConstraintData {
    pub fn undefined(node: NodeIndex) -> Self {
        Self {
            rel_cons: RelCons::Undefined,
            node,
            target: None,
        }
    }
}

/// Work out which neighbour the dragged `target` should be linked to.
///
/// The closer of the two neighbours around the candidate slot wins; the
/// result is downgraded to `Undefined` when the pairing is forbidden.
pub fn determine_relative_constraint(
    frame: &Frame<'_>,
    nodes: &[NodeIndex],
    layers: &[Layer],
    target: NodeIndex,
) -> RelativeConstraintData {
    let undefined = RelativeConstraintData::undefined(target);
    if layers.is_empty() || frame.layered(target).is_none() {
        return undefined;
    }
    let direction = frame.direction(target);
    let layer = resolve_layer_of_node(frame, target, nodes, layers, direction);
    let mut layer_nodes = nodes_of_layer(frame, nodes, layer);
    let member = layer_nodes.contains(&target);
    let slot = resolve_position_in_layer(frame, &mut layer_nodes, target, direction);

    let pred = slot.checked_sub(1).map(|i| layer_nodes[i]);
    let succ_slot = if member { slot + 1 } else { slot };
    let succ = layer_nodes.get(succ_slot).copied();

    let center = direction.secondary(frame.center(target));
    let (rel_cons, neighbour) = match (pred, succ) {
        (Some(p), Some(s)) => {
            let far_edge = direction.secondary(frame.position(p))
                + direction.secondary_extent(frame.size(p));
            let near_edge = direction.secondary(frame.position(s));
            if (center - far_edge).abs() <= (near_edge - center).abs() {
                (RelCons::SuccessorOf, p)
            } else {
                (RelCons::PredecessorOf, s)
            }
        }
        (Some(p), None) => (RelCons::SuccessorOf, p),
        (None, Some(s)) => (RelCons::PredecessorOf, s),
        (None, None) => return undefined,
    };

    if is_relative_constraint_forbidden(frame, nodes, target, neighbour) {
        debug!(
            node = frame.id(target),
            neighbour = frame.id(neighbour),
            "relative constraint vetoed"
        );
        return undefined;
    }
    RelativeConstraintData {
        rel_cons,
        node: target,
        target: Some(neighbour),
    }
}

/// `before` and `after` (in that order) are joined by a relative constraint.
fn linked(frame: &Frame<'_>, before: NodeIndex, after: NodeIndex) -> bool {
    let (Some(b), Some(a)) = (frame.layered(before), frame.layered(after)) else {
        return false;
    };
    b.in_layer_pred_of.as_deref() == Some(frame.id(after))
        || a.in_layer_succ_of.as_deref() == Some(frame.id(before))
}

/// Maximal run of relatively-constrained nodes around `node`.
///
/// `layer_siblings` are sorted by `pos_id` and walked outwards from `node`
/// until the first gap.
pub fn get_chain(
    frame: &Frame<'_>,
    node: NodeIndex,
    layer_siblings: &[NodeIndex],
) -> Vec<NodeIndex> {
    let mut sorted: Vec<NodeIndex> = layer_siblings
        .iter()
        .copied()
        .filter(|&n| frame.layered(n).is_some())
        .collect();
    sorted.sort_by_key(|&n| frame.layered(n).map(|p| p.pos_id));

    let Some(i) = sorted.iter().position(|&n| n == node) else {
        return vec![node];
    };
    let mut start = i;
    while start > 0 && linked(frame, sorted[start - 1], sorted[start]) {
        start -= 1;
    }
    let mut end = i;
    while end + 1 < sorted.len() && linked(frame, sorted[end], sorted[end + 1]) {
        end += 1;
    }
    sorted[start..=end].to_vec()
}

fn chain_of(frame: &Frame<'_>, nodes: &[NodeIndex], node: NodeIndex) -> Vec<NodeIndex> {
    let siblings = match frame.layer_id(node) {
        Some(layer) => nodes_of_layer(frame, nodes, layer),
        None => vec![node],
    };
    get_chain(frame, node, &siblings)
}

/// Linking `a` and `b` is forbidden when an edge already joins a member of
/// `a`'s chain to a member of `b`'s chain.
pub fn is_relative_constraint_forbidden(
    frame: &Frame<'_>,
    nodes: &[NodeIndex],
    a: NodeIndex,
    b: NodeIndex,
) -> bool {
    let chain_a = chain_of(frame, nodes, a);
    let chain_b = chain_of(frame, nodes, b);

    let reaches = |from: &[NodeIndex], into: &[NodeIndex]| {
        let connected: HashSet<NodeIndex> = from
            .iter()
            .flat_map(|&n| frame.scene.connected(n))
            .collect();
        into.iter().any(|n| connected.contains(n))
    };
    reaches(&chain_a, &chain_b) || reaches(&chain_b, &chain_a)
}

/// Turn resolved relative data into the action to dispatch.
///
/// Undefined data, or a link that already exists, gives `Refresh`.
pub fn relative_constraint_action(frame: &Frame<'_>, data: &RelativeConstraintData) -> Action {
    let (Some(reference), Some(props)) = (data.target, frame.layered(data.node)) else {
        return Action::Refresh;
    };
    let id = frame.id(data.node).to_string();
    let reference_id = frame.id(reference);
    let referenced_node = reference_id.to_string();
    match data.rel_cons {
        RelCons::SuccessorOf if props.in_layer_succ_of.as_deref() != Some(reference_id) => {
            Action::SetInLayerSuccessorOfConstraint {
                id,
                referenced_node,
            }
        }
        RelCons::PredecessorOf if props.in_layer_pred_of.as_deref() != Some(reference_id) => {
            Action::SetInLayerPredecessorOfConstraint {
                id,
                referenced_node,
            }
        }
        _ => Action::Refresh,
    }
}

#[cfg(test)]
#[path = "../../../tests/rust/test_layered_relative.rs"]
mod tests;
