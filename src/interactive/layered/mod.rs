//! Interactive constraints for the layered algorithm.
//!
//! Submodules:
//! - layers: per-frame layer bands
//! - position: candidate layer/slot and their corrections
//! - decision: the absolute constraint committed on release
//! - relative: in-layer successor/predecessor constraints

pub mod decision;
pub mod layers;
pub mod position;
pub mod relative;

pub use decision::{Placement, decide_action, resolve_placement, should_only_set_layer};
pub use layers::{LAYER_PADDING, Layer, ONE_LAYER_PADDING, compute_layers, nodes_of_layer};
pub use position::{
    is_layer_forbidden, resolve_actual_layer, resolve_actual_target_index, resolve_layer_of_node,
    resolve_position_in_layer,
};
pub use relative::{
    RelCons, RelativeConstraintData, determine_relative_constraint, get_chain,
    is_relative_constraint_forbidden, relative_constraint_action,
};

use petgraph::graph::NodeIndex;

use crate::interactive::overlay::Frame;

/// Live feedback for one frame of a layered drag.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredFeedback {
    pub layers: Vec<Layer>,
    /// Layers (frame numbering, including a new trailing one) the node may
    /// not enter.
    pub forbidden_layers: Vec<usize>,
    pub placement: Placement,
    pub relative: RelativeConstraintData,
}

pub fn layered_feedback(
    frame: &Frame<'_>,
    nodes: &[NodeIndex],
    target: NodeIndex,
) -> LayeredFeedback {
    let direction = frame.direction(target);
    let layers = compute_layers(frame, nodes, direction);
    let forbidden_layers = (0..=layers.len())
        .filter(|&l| {
            let actual = resolve_actual_layer(frame, target, nodes, l);
            is_layer_forbidden(frame.scene, target, actual)
        })
        .collect();
    let placement = resolve_placement(frame, nodes, &layers, target);
    let relative = determine_relative_constraint(frame, nodes, &layers, target);
    LayeredFeedback {
        layers,
        forbidden_layers,
        placement,
        relative,
    }
}
