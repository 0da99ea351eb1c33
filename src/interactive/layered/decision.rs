//! The single constraint action a layered drag commits on release.

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::layers::{Layer, nodes_of_layer};
use super::position::{
    is_layer_forbidden, resolve_actual_layer, resolve_actual_target_index,
    resolve_layer_of_node, resolve_position_in_layer,
};
use crate::geometry::Direction;
use crate::interactive::actions::Action;
use crate::interactive::overlay::Frame;

/// Resolved placement of a dragged node, before any action is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Candidate layer in this frame's numbering.
    pub layer: usize,
    /// Candidate slot inside that layer.
    pub position: usize,
    /// Layer constraint value after correcting for existing constraints.
    pub layer_cons: usize,
    /// Position constraint value after correcting for existing constraints.
    pub pos_cons: usize,
    /// The corrected layer is vetoed by a constrained neighbour.
    pub forbidden: bool,
}

pub fn resolve_placement(
    frame: &Frame<'_>,
    nodes: &[NodeIndex],
    layers: &[Layer],
    target: NodeIndex,
) -> Placement {
    let direction = frame.direction(target);
    let layer = resolve_layer_of_node(frame, target, nodes, layers, direction);
    let mut layer_nodes = nodes_of_layer(frame, nodes, layer);
    let already_in_layer = layer_nodes.contains(&target);
    let position = resolve_position_in_layer(frame, &mut layer_nodes, target, direction);
    let pos_cons = resolve_actual_target_index(frame, position, already_in_layer, &layer_nodes);
    let layer_cons = resolve_actual_layer(frame, target, nodes, layer);
    let forbidden = is_layer_forbidden(frame.scene, target, layer_cons);
    Placement {
        layer,
        position,
        layer_cons,
        pos_cons,
        forbidden,
    }
}

/// The node's centre lies above or below the band of `layer`, so only the
/// layer should be pinned. A new trailing layer uses the envelope of all bands.
pub fn should_only_set_layer(
    frame: &Frame<'_>,
    target: NodeIndex,
    layers: &[Layer],
    layer: usize,
    direction: Direction,
) -> bool {
    let (top, bottom) = match layers.get(layer) {
        Some(l) => (l.top_border, l.bottom_border),
        None => {
            if layers.is_empty() {
                return false;
            }
            layers.iter().fold((f64::MAX, f64::MIN), |(t, b), l| {
                (t.min(l.top_border), b.max(l.bottom_border))
            })
        }
    };
    let c = direction.secondary(frame.center(target));
    c < top || c > bottom
}

/// Decide which constraint a drag of `target` commits.
///
/// Priority: forbidden veto, layer change (layer only or static), position
/// change, nothing changed. Change detection compares the candidate layer and
/// slot against the node's current `layer_id`/`pos_id`; the corrected values
/// are what the action carries.
pub fn decide_action(
    frame: &Frame<'_>,
    nodes: &[NodeIndex],
    layers: &[Layer],
    target: NodeIndex,
) -> Action {
    let Some(props) = frame.layered(target) else {
        return Action::Refresh;
    };
    if layers.is_empty() {
        return Action::Refresh;
    }
    let direction = frame.direction(target);
    let placement = resolve_placement(frame, nodes, layers, target);
    let id = frame.id(target).to_string();

    if placement.forbidden {
        debug!(node = %id, layer = placement.layer_cons, "placement vetoed: layer forbidden");
        return Action::Refresh;
    }

    let action = if placement.layer != props.layer_id {
        if should_only_set_layer(frame, target, layers, placement.layer, direction) {
            Action::SetLayerConstraint {
                id,
                layer: placement.layer,
                layer_cons: placement.layer_cons,
            }
        } else {
            Action::SetStaticConstraint {
                id,
                layer: placement.layer,
                layer_cons: placement.layer_cons,
                position: placement.position,
                pos_cons: placement.pos_cons,
            }
        }
    } else if placement.position != props.pos_id {
        Action::SetPositionConstraint {
            id,
            position: placement.position,
            pos_cons: placement.pos_cons,
        }
    } else {
        Action::Refresh
    };
    debug!(?action, "layered drag decided");
    action
}

#[cfg(test)]
#[path = "../../../tests/rust/test_layered_decision.rs"]
mod tests;
