//! Constraint actions emitted towards the layout server.
//!
//! Each variant is a plain serializable record; transporting it is the
//! host's job. `Refresh` doubles as the snap-back signal when a drag does
//! not change anything or is vetoed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    Refresh,
    SetLayerConstraint {
        id: String,
        layer: usize,
        layer_cons: usize,
    },
    SetPositionConstraint {
        id: String,
        position: usize,
        pos_cons: usize,
    },
    SetStaticConstraint {
        id: String,
        layer: usize,
        layer_cons: usize,
        position: usize,
        pos_cons: usize,
    },
    SetInLayerSuccessorOfConstraint {
        id: String,
        referenced_node: String,
    },
    SetInLayerPredecessorOfConstraint {
        id: String,
        referenced_node: String,
    },
    DeleteStaticConstraint {
        id: String,
    },
    DeleteLayerConstraint {
        id: String,
    },
    DeletePositionConstraint {
        id: String,
    },
    DeleteRelativeConstraints {
        id: String,
    },
    RectPackSetPositionConstraint {
        id: String,
        order: usize,
    },
    RectPackDeletePositionConstraint {
        id: String,
    },
    SetAspectRatio {
        id: String,
        aspect_ratio: f64,
    },
    TreeSetPositionConstraint {
        id: String,
        position: usize,
    },
    TreeDeletePositionConstraint {
        id: String,
    },
}

impl Action {
    pub fn is_refresh(&self) -> bool {
        matches!(self, Action::Refresh)
    }

    /// Id of the element the action targets; `None` for `Refresh`.
    pub fn target(&self) -> Option<&str> {
        match self {
            Action::Refresh => None,
            Action::SetLayerConstraint { id, .. }
            | Action::SetPositionConstraint { id, .. }
            | Action::SetStaticConstraint { id, .. }
            | Action::SetInLayerSuccessorOfConstraint { id, .. }
            | Action::SetInLayerPredecessorOfConstraint { id, .. }
            | Action::DeleteStaticConstraint { id }
            | Action::DeleteLayerConstraint { id }
            | Action::DeletePositionConstraint { id }
            | Action::DeleteRelativeConstraints { id }
            | Action::RectPackSetPositionConstraint { id, .. }
            | Action::RectPackDeletePositionConstraint { id }
            | Action::SetAspectRatio { id, .. }
            | Action::TreeSetPositionConstraint { id, .. }
            | Action::TreeDeletePositionConstraint { id } => Some(id),
        }
    }

    /// The layer an action would commit the node to, if it changes layers.
    pub fn committed_layer(&self) -> Option<usize> {
        match self {
            Action::SetLayerConstraint { layer_cons, .. }
            | Action::SetStaticConstraint { layer_cons, .. } => Some(*layer_cons),
            _ => None,
        }
    }
}
