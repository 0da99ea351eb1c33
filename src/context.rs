//! Per-diagram interaction state.
//!
//! One context per open diagram: its configuration, its depth map and the
//! drag in progress, if any. Hosts create it when a diagram opens and drop it
//! when the diagram closes.

use tracing::debug;

use crate::config::InteractionConfig;
use crate::depth_map::{DepthMap, Viewport};
use crate::error::Result;
use crate::geometry::Point;
use crate::interactive::{Action, DragFeedback, DragSession, delete_constraints_action};
use crate::scene::SceneGraph;

#[derive(Debug, Clone, Default)]
pub struct DiagramInteractionContext {
    config: InteractionConfig,
    depth_map: Option<DepthMap>,
    session: Option<DragSession>,
}

impl DiagramInteractionContext {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            depth_map: None,
            session: None,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InteractionConfig {
        &mut self.config
    }

    pub fn depth_map(&self) -> Option<&DepthMap> {
        self.depth_map.as_ref()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Feed a newly loaded model. The depth map is always rebuilt, even when
    /// the new model reuses the previous root id.
    ///
    /// A drag still in progress refers to the old model and is cancelled.
    pub fn update_model(&mut self, scene: &SceneGraph) -> &DepthMap {
        debug!(root = scene.root_id(), "new model, rebuilding depth map");
        self.session = None;
        self.depth_map.insert(DepthMap::build(scene))
    }

    /// Feed new geometry for the current model. Region bounds are refreshed
    /// in place; a scene whose structure differs from the one the depth map
    /// was built from is treated as a new model.
    pub fn update_layout(&mut self, scene: &SceneGraph) -> &DepthMap {
        let refreshed = self
            .depth_map
            .as_mut()
            .is_some_and(|map| map.update_bounds(scene));
        if !refreshed {
            return self.update_model(scene);
        }
        self.depth_map.get_or_insert_with(|| DepthMap::build(scene))
    }

    /// Run expand/collapse for `viewport`. Does nothing before the first model.
    pub fn update_viewport(&mut self, viewport: &Viewport) -> Option<&DepthMap> {
        let map = self.depth_map.as_mut()?;
        map.expand_collapse(viewport, &self.config);
        Some(map)
    }

    /// Start dragging `node_id`, replacing any drag still in progress.
    pub fn begin_drag(&mut self, scene: &SceneGraph, node_id: &str) -> Result<()> {
        self.session = Some(DragSession::begin(scene, node_id)?);
        Ok(())
    }

    /// The dragged node moved; returns the feedback for this frame.
    pub fn drag_moved(&mut self, scene: &SceneGraph) -> Option<DragFeedback> {
        let session = self.session.as_mut()?;
        session.mark_dragged();
        Some(session.feedback(scene))
    }

    /// Release the dragged node. `None` when no drag was in progress or the
    /// drag did not lead to a decision.
    pub fn end_drag(&mut self, scene: &SceneGraph, drop_point: Point) -> Option<Action> {
        self.session
            .take()?
            .finish(scene, drop_point, &self.config)
    }

    pub fn cancel_drag(&mut self) {
        self.session = None;
    }

    pub fn delete_constraints(&self, scene: &SceneGraph, node_id: &str) -> Result<Action> {
        let node = scene.lookup(node_id)?;
        Ok(delete_constraints_action(scene, node))
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_context.rs"]
mod tests;
