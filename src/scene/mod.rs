//! Scene graph consumed by the interactive core.
//!
//! Wraps a petgraph `DiGraph` for edge topology and keeps the containment
//! hierarchy (parent/children) on the nodes themselves. Node positions are
//! relative to their parent, as in the rendered diagram.
//!
//! Layout properties are typed per algorithm: a level's [`LevelProps`] names
//! the algorithm, and every child carries the matching [`NodeProps`] variant.
//! Untyped property bags are only seen by [`ingest`].

pub mod ingest;

use std::collections::HashMap;

use petgraph::Direction as EdgeDirection;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::{InteractionError, Result};
use crate::geometry::{Direction, Point, Rect, Size};

// ─── Layout properties ───────────────────────────────────────────────────────

/// Layout algorithm of one hierarchical level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    Layered,
    RectPacking,
    Tree,
    /// Any algorithm without interactive support.
    Other,
}

/// Properties of a node that has children (a hierarchical level).
#[derive(Debug, Clone, PartialEq)]
pub struct LevelProps {
    pub algorithm: Algorithm,
    pub direction: Direction,
    /// Stored aspect ratio (rect packing).
    pub aspect_ratio: Option<f64>,
    /// Interactive layout is switched on for this level.
    pub interactive: bool,
}

impl LevelProps {
    pub fn new(algorithm: Algorithm, direction: Direction) -> Self {
        Self {
            algorithm,
            direction,
            aspect_ratio: None,
            interactive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayeredProps {
    pub layer_id: usize,
    pub layer_cons: Option<usize>,
    pub pos_id: usize,
    pub pos_cons: Option<usize>,
    /// Id of the node this node must directly precede.
    pub in_layer_pred_of: Option<String>,
    /// Id of the node this node must directly follow.
    pub in_layer_succ_of: Option<String>,
}

impl LayeredProps {
    pub fn new(layer_id: usize, pos_id: usize) -> Self {
        Self {
            layer_id,
            pos_id,
            ..Self::default()
        }
    }

    pub fn has_relative_constraint(&self) -> bool {
        self.in_layer_pred_of.is_some() || self.in_layer_succ_of.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RectPackProps {
    pub current_position: usize,
    pub desired_position: Option<usize>,
}

impl RectPackProps {
    /// The manually desired slot wins over the computed one.
    pub fn actual_position(&self) -> usize {
        self.desired_position.unwrap_or(self.current_position)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeProps {
    pub tree_level: Option<usize>,
    pub pos_cons: Option<usize>,
}

/// Algorithm-specific properties of a node, selected by its parent's algorithm.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeProps {
    Layered(LayeredProps),
    RectPacking(RectPackProps),
    Tree(TreeProps),
    #[default]
    Unconstrained,
}

// ─── Nodes and edges ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: String,
    /// Position relative to the parent.
    pub position: Point,
    pub size: Size,
    /// The renderer has reported a size for this node.
    pub measured: bool,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    /// The node's rendering introduces a nested child area.
    pub opens_region: bool,
    pub props: NodeProps,
    pub level: Option<LevelProps>,
}

impl SceneNode {
    pub fn new(id: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            position,
            size,
            measured: true,
            parent: None,
            children: Vec::new(),
            opens_region: false,
            props: NodeProps::Unconstrained,
            level: None,
        }
    }

    pub fn with_props(mut self, props: NodeProps) -> Self {
        self.props = props;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

#[derive(Debug, Clone)]
pub struct SceneEdge {
    pub id: String,
}

// ─── SceneGraph ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub digraph: DiGraph<SceneNode, SceneEdge>,
    /// Maps node id → petgraph NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
    pub root: NodeIndex,
}

impl SceneGraph {
    /// Create a scene holding only the root node.
    pub fn new(root_id: &str) -> Self {
        let mut digraph = DiGraph::new();
        let root = digraph.add_node(SceneNode::new(root_id, Point::default(), Size::default()));
        let mut node_index = HashMap::new();
        node_index.insert(root_id.to_string(), root);
        Self {
            digraph,
            node_index,
            root,
        }
    }

    pub fn root_id(&self) -> &str {
        &self.digraph[self.root].id
    }

    /// Add `node` as the last child of `parent`.
    pub fn add_node(&mut self, parent: NodeIndex, mut node: SceneNode) -> Result<NodeIndex> {
        if self.node_index.contains_key(&node.id) {
            return Err(InteractionError::DuplicateNode { id: node.id });
        }
        node.parent = Some(parent);
        let id = node.id.clone();
        let idx = self.digraph.add_node(node);
        self.digraph[parent].children.push(idx);
        self.node_index.insert(id, idx);
        Ok(idx)
    }

    pub fn add_edge(&mut self, id: &str, source: NodeIndex, target: NodeIndex) {
        self.digraph.add_edge(source, target, SceneEdge { id: id.to_string() });
    }

    pub fn set_level(&mut self, idx: NodeIndex, level: LevelProps) {
        self.digraph[idx].level = Some(level);
    }

    /// Move a node; used by hosts to feed drag coordinates.
    pub fn set_position(&mut self, idx: NodeIndex, position: Point) {
        self.digraph[idx].position = position;
    }

    pub fn lookup(&self, id: &str) -> Result<NodeIndex> {
        self.node_index
            .get(id)
            .copied()
            .ok_or_else(|| InteractionError::unknown_node(id))
    }

    pub fn node(&self, idx: NodeIndex) -> &SceneNode {
        &self.digraph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.digraph[idx].children
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.digraph[idx].parent
    }

    /// The level props of the node's parent.
    pub fn parent_level(&self, idx: NodeIndex) -> Option<&LevelProps> {
        self.parent(idx).and_then(|p| self.digraph[p].level.as_ref())
    }

    /// Direction shared by all nodes in `idx`'s hierarchical level.
    pub fn direction_of(&self, idx: NodeIndex) -> Direction {
        self.parent_level(idx).map(|l| l.direction).unwrap_or_default()
    }

    /// All children of `idx`'s parent, including `idx`.
    pub fn siblings(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        match self.parent(idx) {
            Some(p) => self.digraph[p].children.clone(),
            None => vec![idx],
        }
    }

    pub fn layered(&self, idx: NodeIndex) -> Option<&LayeredProps> {
        match &self.digraph[idx].props {
            NodeProps::Layered(p) => Some(p),
            _ => None,
        }
    }

    pub fn rect_pack(&self, idx: NodeIndex) -> Option<&RectPackProps> {
        match &self.digraph[idx].props {
            NodeProps::RectPacking(p) => Some(p),
            _ => None,
        }
    }

    pub fn tree(&self, idx: NodeIndex) -> Option<&TreeProps> {
        match &self.digraph[idx].props {
            NodeProps::Tree(p) => Some(p),
            _ => None,
        }
    }

    /// Sources of incoming edges.
    pub fn incoming(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.digraph
            .neighbors_directed(idx, EdgeDirection::Incoming)
            .collect()
    }

    /// Targets of outgoing edges.
    pub fn outgoing(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.digraph
            .neighbors_directed(idx, EdgeDirection::Outgoing)
            .collect()
    }

    /// Nodes connected to `idx` by an edge in either direction.
    pub fn connected(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut nodes = self.outgoing(idx);
        nodes.extend(self.incoming(idx));
        nodes
    }

    /// Position in diagram coordinates (sum over the ancestor chain).
    pub fn absolute_position(&self, idx: NodeIndex) -> Point {
        let mut pos = self.digraph[idx].position;
        let mut cur = self.digraph[idx].parent;
        while let Some(p) = cur {
            let parent = &self.digraph[p];
            pos = pos.translate(parent.position.x, parent.position.y);
            cur = parent.parent;
        }
        pos
    }

    pub fn absolute_bounds(&self, idx: NodeIndex) -> Rect {
        Rect::from_parts(self.absolute_position(idx), self.digraph[idx].size)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_scene.rs"]
mod tests;
