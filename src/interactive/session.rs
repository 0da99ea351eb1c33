//! One drag of one node, from mouse-down to release.
//!
//! The session owns the interaction overlay for the drag. The host keeps
//! moving the node in the scene; the session reads the scene each frame and
//! decides the single action on release.

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::config::InteractionConfig;
use crate::error::{InteractionError, Result};
use crate::geometry::Point;
use crate::interactive::actions::Action;
use crate::interactive::layered::{
    LayeredFeedback, compute_layers, decide_action, determine_relative_constraint,
    layered_feedback, relative_constraint_action,
};
use crate::interactive::overlay::{Frame, InteractionOverlay};
use crate::interactive::rectpack::{hovered_sibling, set_generate_rect_pack_action};
use crate::interactive::tree::{
    TreeLevels, get_levels, get_siblings, set_tree_properties, sibling_positions,
};
use crate::scene::{Algorithm, NodeProps, SceneGraph};

/// Visual feedback for the current frame of a drag.
#[derive(Debug, Clone, PartialEq)]
pub enum DragFeedback {
    Layered(LayeredFeedback),
    RectPacking {
        hovered: Option<NodeIndex>,
    },
    Tree {
        levels: TreeLevels,
        siblings: Vec<NodeIndex>,
        position: usize,
    },
    /// The level is not interactive.
    None,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    target: NodeIndex,
    parent: NodeIndex,
    overlay: InteractionOverlay,
    has_dragged: bool,
}

impl DragSession {
    /// Start dragging `node_id`; its current position becomes the shadow.
    pub fn begin(scene: &SceneGraph, node_id: &str) -> Result<Self> {
        let target = scene.lookup(node_id)?;
        let parent = scene.parent(target).ok_or_else(|| InteractionError::NoParent {
            id: node_id.to_string(),
        })?;
        let mut overlay = InteractionOverlay::new();
        overlay.begin_drag(target, scene.node(target).position);
        Ok(Self {
            target,
            parent,
            overlay,
            has_dragged: false,
        })
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub fn overlay(&self) -> &InteractionOverlay {
        &self.overlay
    }

    pub fn has_dragged(&self) -> bool {
        self.has_dragged
    }

    pub fn mark_dragged(&mut self) {
        self.has_dragged = true;
    }

    fn interactive_algorithm(&self, scene: &SceneGraph) -> Option<Algorithm> {
        scene
            .node(self.parent)
            .level
            .as_ref()
            .filter(|l| l.interactive)
            .map(|l| l.algorithm)
    }

    /// Recompute feedback for the current frame and refresh overlay flags.
    pub fn feedback(&mut self, scene: &SceneGraph) -> DragFeedback {
        self.overlay.clear_feedback();
        let nodes = scene.children(self.parent).to_vec();
        let target = self.target;

        let feedback = {
            let frame = Frame::new(scene, &self.overlay);
            match self.interactive_algorithm(scene) {
                Some(Algorithm::Layered) => {
                    DragFeedback::Layered(layered_feedback(&frame, &nodes, target))
                }
                Some(Algorithm::RectPacking) => {
                    let drop_point = absolute_center(scene, target);
                    DragFeedback::RectPacking {
                        hovered: hovered_sibling(&frame, &nodes, target, drop_point),
                    }
                }
                Some(Algorithm::Tree) => {
                    let siblings = get_siblings(&frame, &nodes, target);
                    let (_, position) = sibling_positions(&frame, &siblings, target);
                    DragFeedback::Tree {
                        levels: get_levels(&frame, &nodes),
                        siblings,
                        position,
                    }
                }
                Some(Algorithm::Other) | None => DragFeedback::None,
            }
        };

        match &feedback {
            DragFeedback::Layered(f) => {
                self.overlay.set_forbidden(target, f.placement.forbidden);
                if let Some(reference) = f.relative.target {
                    self.overlay.set_highlight(reference, true);
                }
            }
            DragFeedback::RectPacking {
                hovered: Some(hit),
            } => self.overlay.set_highlight(*hit, true),
            DragFeedback::Tree { siblings, .. } => {
                for &s in siblings.iter().filter(|&&s| s != target) {
                    self.overlay.set_highlight(s, true);
                }
            }
            _ => {}
        }
        feedback
    }

    /// Release the node at `drop_point` (absolute diagram coordinates).
    ///
    /// `None` means there is nothing to dispatch: the mouse never moved or
    /// the level is not interactive.
    pub fn finish(
        self,
        scene: &SceneGraph,
        drop_point: Point,
        config: &InteractionConfig,
    ) -> Option<Action> {
        if !self.has_dragged {
            debug!("released without drag");
            return None;
        }
        let algorithm = self.interactive_algorithm(scene)?;
        let nodes = scene.children(self.parent).to_vec();
        let frame = Frame::new(scene, &self.overlay);
        let target = self.target;

        let action = match algorithm {
            Algorithm::Layered => {
                let layers = compute_layers(&frame, &nodes, frame.direction(target));
                if config.relative_constraints {
                    let data = determine_relative_constraint(&frame, &nodes, &layers, target);
                    relative_constraint_action(&frame, &data)
                } else {
                    decide_action(&frame, &nodes, &layers, target)
                }
            }
            Algorithm::RectPacking => {
                set_generate_rect_pack_action(&frame, &nodes, target, self.parent, drop_point)
            }
            Algorithm::Tree => set_tree_properties(&frame, &nodes, target),
            Algorithm::Other => return None,
        };
        Some(action)
    }
}

/// Centre of a node in absolute diagram coordinates.
pub fn absolute_center(scene: &SceneGraph, node: NodeIndex) -> Point {
    let b = scene.absolute_bounds(node);
    Point::new(b.x + b.width / 2.0, b.y + b.height / 2.0)
}

/// Action removing the constraints set on `node`.
///
/// Absolute layered constraints go first; relative links are removed once
/// no absolute constraint is left. Unconstrained nodes give `Refresh`.
pub fn delete_constraints_action(scene: &SceneGraph, node: NodeIndex) -> Action {
    let id = scene.node(node).id.clone();
    match &scene.node(node).props {
        NodeProps::Layered(p) => match (p.layer_cons, p.pos_cons) {
            (Some(_), Some(_)) => Action::DeleteStaticConstraint { id },
            (Some(_), None) => Action::DeleteLayerConstraint { id },
            (None, Some(_)) => Action::DeletePositionConstraint { id },
            (None, None) if p.has_relative_constraint() => {
                Action::DeleteRelativeConstraints { id }
            }
            (None, None) => Action::Refresh,
        },
        NodeProps::RectPacking(p) if p.desired_position.is_some() => {
            Action::RectPackDeletePositionConstraint { id }
        }
        NodeProps::Tree(p) if p.pos_cons.is_some() => Action::TreeDeletePositionConstraint { id },
        _ => Action::Refresh,
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_session.rs"]
mod tests;
