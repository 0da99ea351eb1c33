//! Per-frame interaction state kept beside the scene graph.
//!
//! The scene is never mutated by the resolvers. Transient flags (selection,
//! drag shadow, forbidden and highlight feedback) live here instead and are
//! read through a [`Frame`].

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::geometry::{Direction, Point, Size};
use crate::scene::{LayeredProps, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeInteraction {
    pub selected: bool,
    pub forbidden: bool,
    pub highlight: bool,
    /// Pre-drag position while the node is being dragged.
    pub shadow: Option<Point>,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionOverlay {
    states: HashMap<NodeIndex, NodeInteraction>,
}

impl InteractionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `node` as the single dragged node, recording its origin.
    pub fn begin_drag(&mut self, node: NodeIndex, shadow: Point) {
        for state in self.states.values_mut() {
            state.selected = false;
            state.shadow = None;
        }
        let state = self.states.entry(node).or_default();
        state.selected = true;
        state.shadow = Some(shadow);
    }

    pub fn end_drag(&mut self) {
        self.states.clear();
    }

    /// Reset forbidden and highlight flags before a recomputation.
    pub fn clear_feedback(&mut self) {
        for state in self.states.values_mut() {
            state.forbidden = false;
            state.highlight = false;
        }
    }

    pub fn set_forbidden(&mut self, node: NodeIndex, forbidden: bool) {
        self.states.entry(node).or_default().forbidden = forbidden;
    }

    pub fn set_highlight(&mut self, node: NodeIndex, highlight: bool) {
        self.states.entry(node).or_default().highlight = highlight;
    }

    pub fn get(&self, node: NodeIndex) -> NodeInteraction {
        self.states.get(&node).copied().unwrap_or_default()
    }

    pub fn is_selected(&self, node: NodeIndex) -> bool {
        self.get(node).selected
    }

    pub fn shadow(&self, node: NodeIndex) -> Option<Point> {
        self.get(node).shadow
    }

    pub fn selected(&self) -> Option<NodeIndex> {
        self.states
            .iter()
            .find(|(_, s)| s.selected)
            .map(|(idx, _)| *idx)
    }

    pub fn forbidden_nodes(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self
            .states
            .iter()
            .filter(|(_, s)| s.forbidden)
            .map(|(idx, _)| *idx)
            .collect();
        nodes.sort();
        nodes
    }

    pub fn highlighted_nodes(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self
            .states
            .iter()
            .filter(|(_, s)| s.highlight)
            .map(|(idx, _)| *idx)
            .collect();
        nodes.sort();
        nodes
    }
}

// ─── Frame ───────────────────────────────────────────────────────────────────

/// Read-only view of one interaction frame: the scene plus its overlay.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a SceneGraph,
    pub overlay: &'a InteractionOverlay,
}

impl<'a> Frame<'a> {
    pub fn new(scene: &'a SceneGraph, overlay: &'a InteractionOverlay) -> Self {
        Self { scene, overlay }
    }

    /// Live position; follows the cursor for the dragged node.
    pub fn position(&self, node: NodeIndex) -> Point {
        self.scene.node(node).position
    }

    /// Where the node was before the drag started.
    pub fn origin(&self, node: NodeIndex) -> Point {
        self.overlay
            .shadow(node)
            .unwrap_or_else(|| self.position(node))
    }

    pub fn size(&self, node: NodeIndex) -> Size {
        self.scene.node(node).size
    }

    pub fn center(&self, node: NodeIndex) -> Point {
        let p = self.position(node);
        let s = self.size(node);
        Point::new(p.x + s.width / 2.0, p.y + s.height / 2.0)
    }

    pub fn is_selected(&self, node: NodeIndex) -> bool {
        self.overlay.is_selected(node)
    }

    pub fn layered(&self, node: NodeIndex) -> Option<&'a LayeredProps> {
        self.scene.layered(node)
    }

    pub fn layer_id(&self, node: NodeIndex) -> Option<usize> {
        self.layered(node).map(|p| p.layer_id)
    }

    pub fn direction(&self, node: NodeIndex) -> Direction {
        self.scene.direction_of(node)
    }

    pub fn id(&self, node: NodeIndex) -> &'a str {
        &self.scene.node(node).id
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_overlay.rs"]
mod tests;
