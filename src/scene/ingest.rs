//! JSON scene ingest: the only place that reads untyped property bags.
//!
//! A raw scene is a tree of nodes, each with a string-keyed `properties`
//! map using ELK/KLighD keys. Ingest validates those keys once and produces
//! a [`SceneGraph`] whose nodes carry typed [`NodeProps`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{
    Algorithm, LayeredProps, LevelProps, NodeProps, RectPackProps, SceneGraph, SceneNode,
    TreeProps,
};
use crate::error::{InteractionError, Result};
use crate::geometry::{Direction, Point, Size};

// ─── Property keys ───────────────────────────────────────────────────────────

pub const ALGORITHM: &str = "org.eclipse.elk.algorithm";
pub const DIRECTION: &str = "org.eclipse.elk.direction";
pub const ASPECT_RATIO: &str = "org.eclipse.elk.aspectRatio";
pub const INTERACTIVE_LAYOUT: &str = "org.eclipse.elk.interactiveLayout";

pub const LAYER_ID: &str = "org.eclipse.elk.layered.layering.layerId";
pub const LAYER_CONSTRAINT: &str = "org.eclipse.elk.layered.layering.layerChoiceConstraint";
pub const POSITION_ID: &str = "org.eclipse.elk.layered.crossingMinimization.positionId";
pub const POSITION_CONSTRAINT: &str =
    "org.eclipse.elk.layered.crossingMinimization.positionChoiceConstraint";
pub const IN_LAYER_PRED_OF: &str = "org.eclipse.elk.layered.crossingMinimization.inLayerPredOf";
pub const IN_LAYER_SUCC_OF: &str = "org.eclipse.elk.layered.crossingMinimization.inLayerSuccOf";

pub const RECT_CURRENT_POSITION: &str = "org.eclipse.elk.rectpacking.currentPosition";
pub const RECT_DESIRED_POSITION: &str = "org.eclipse.elk.rectpacking.desiredPosition";

pub const TREE_LEVEL: &str = "org.eclipse.elk.mrtree.treeLevel";
pub const TREE_POSITION_CONSTRAINT: &str = "org.eclipse.elk.mrtree.positionConstraint";

/// Rendering type whose presence as first data entry opens a nested region.
pub const CHILD_AREA_RENDERING: &str = "KChildAreaImpl";

static ALGORITHM_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\.)(layered|rectpacking|mrtree)$").expect("valid algorithm pattern")
});

// ─── Raw serde model ─────────────────────────────────────────────────────────

pub type PropertyBag = Map<String, Value>;

#[derive(Debug, Clone, Deserialize)]
pub struct RawScene {
    pub id: String,
    #[serde(default)]
    pub properties: PropertyBag,
    #[serde(default)]
    pub children: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub position: Point,
    pub size: Option<Size>,
    #[serde(default)]
    pub properties: PropertyBag,
    #[serde(default)]
    pub data: Vec<RawRendering>,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRendering {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Parse and validate a JSON scene.
pub fn parse_scene(src: &str) -> Result<SceneGraph> {
    let raw: RawScene = serde_json::from_str(src)?;
    from_raw(&raw)
}

pub fn from_raw(raw: &RawScene) -> Result<SceneGraph> {
    let mut scene = SceneGraph::new(&raw.id);
    let root = scene.root;
    let level = parse_level(&raw.id, &raw.properties)?;
    let algorithm = level.algorithm;
    scene.set_level(root, level);

    for child in &raw.children {
        add_raw_node(&mut scene, root, algorithm, child)?;
    }

    for edge in &raw.edges {
        let source = lookup_endpoint(&scene, &edge.id, &edge.source)?;
        let target = lookup_endpoint(&scene, &edge.id, &edge.target)?;
        scene.add_edge(&edge.id, source, target);
    }

    debug!(
        root = %raw.id,
        nodes = scene.node_count(),
        edges = raw.edges.len(),
        "scene ingested"
    );
    Ok(scene)
}

/// Map an ELK algorithm identifier to the interactive algorithm it denotes.
pub fn algorithm_from_id(id: &str) -> Algorithm {
    match ALGORITHM_SUFFIX
        .captures(id)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    {
        Some("layered") => Algorithm::Layered,
        Some("rectpacking") => Algorithm::RectPacking,
        Some("mrtree") => Algorithm::Tree,
        _ => Algorithm::Other,
    }
}

pub fn direction_from_str(value: &str) -> Result<Direction> {
    match value.to_uppercase().as_str() {
        "UNDEFINED" => Ok(Direction::Undefined),
        "RIGHT" => Ok(Direction::Right),
        "LEFT" => Ok(Direction::Left),
        "DOWN" => Ok(Direction::Down),
        "UP" => Ok(Direction::Up),
        _ => Err(InteractionError::UnknownDirection {
            value: value.to_string(),
        }),
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────────

fn add_raw_node(
    scene: &mut SceneGraph,
    parent: petgraph::graph::NodeIndex,
    algorithm: Algorithm,
    raw: &RawNode,
) -> Result<()> {
    let mut node = SceneNode::new(&raw.id, raw.position, raw.size.unwrap_or_default());
    node.measured = raw.size.is_some();
    node.opens_region = raw
        .data
        .first()
        .is_some_and(|d| d.kind == CHILD_AREA_RENDERING);
    node.props = parse_node_props(&raw.id, &raw.properties, algorithm)?;
    let idx = scene.add_node(parent, node)?;

    if !raw.children.is_empty() {
        let level = parse_level(&raw.id, &raw.properties)?;
        let child_algorithm = level.algorithm;
        scene.set_level(idx, level);
        for child in &raw.children {
            add_raw_node(scene, idx, child_algorithm, child)?;
        }
    }
    Ok(())
}

fn lookup_endpoint(
    scene: &SceneGraph,
    edge: &str,
    node: &str,
) -> Result<petgraph::graph::NodeIndex> {
    scene
        .node_index
        .get(node)
        .copied()
        .ok_or_else(|| InteractionError::DanglingEdge {
            edge: edge.to_string(),
            node: node.to_string(),
        })
}

fn parse_level(node: &str, bag: &PropertyBag) -> Result<LevelProps> {
    let algorithm = match bag.get(ALGORITHM) {
        None | Some(Value::Null) => Algorithm::Layered,
        Some(Value::String(s)) => algorithm_from_id(s),
        Some(_) => return Err(InteractionError::invalid(node, ALGORITHM, "a string")),
    };
    let direction = match bag.get(DIRECTION) {
        None | Some(Value::Null) => Direction::Undefined,
        Some(Value::String(s)) => direction_from_str(s)?,
        Some(_) => return Err(InteractionError::invalid(node, DIRECTION, "a string")),
    };
    let aspect_ratio = match bag.get(ASPECT_RATIO) {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            v.as_f64()
                .ok_or_else(|| InteractionError::invalid(node, ASPECT_RATIO, "a number"))?,
        ),
    };
    let interactive = match bag.get(INTERACTIVE_LAYOUT) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            return Err(InteractionError::invalid(node, INTERACTIVE_LAYOUT, "a boolean"));
        }
    };
    Ok(LevelProps {
        algorithm,
        direction,
        aspect_ratio,
        interactive,
    })
}

fn parse_node_props(node: &str, bag: &PropertyBag, algorithm: Algorithm) -> Result<NodeProps> {
    let props = match algorithm {
        Algorithm::Layered => NodeProps::Layered(LayeredProps {
            layer_id: required_index(node, bag, LAYER_ID)?,
            layer_cons: optional_index(node, bag, LAYER_CONSTRAINT)?,
            pos_id: required_index(node, bag, POSITION_ID)?,
            pos_cons: optional_index(node, bag, POSITION_CONSTRAINT)?,
            in_layer_pred_of: optional_id(node, bag, IN_LAYER_PRED_OF)?,
            in_layer_succ_of: optional_id(node, bag, IN_LAYER_SUCC_OF)?,
        }),
        Algorithm::RectPacking => NodeProps::RectPacking(RectPackProps {
            current_position: required_index(node, bag, RECT_CURRENT_POSITION)?,
            desired_position: optional_index(node, bag, RECT_DESIRED_POSITION)?,
        }),
        Algorithm::Tree => NodeProps::Tree(TreeProps {
            tree_level: optional_index(node, bag, TREE_LEVEL)?,
            pos_cons: optional_index(node, bag, TREE_POSITION_CONSTRAINT)?,
        }),
        Algorithm::Other => NodeProps::Unconstrained,
    };
    Ok(props)
}

/// Absent, null and `-1` all mean "not set".
fn optional_index(node: &str, bag: &PropertyBag, key: &str) -> Result<Option<usize>> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_i64() {
            Some(-1) => Ok(None),
            Some(n) if n >= 0 => Ok(Some(n as usize)),
            _ => Err(InteractionError::invalid(
                node,
                key,
                "a non-negative integer or -1",
            )),
        },
    }
}

fn required_index(node: &str, bag: &PropertyBag, key: &str) -> Result<usize> {
    match bag.get(key) {
        None | Some(Value::Null) => Err(InteractionError::missing(node, key)),
        Some(v) => v
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| InteractionError::invalid(node, key, "a non-negative integer")),
    }
}

fn optional_id(node: &str, bag: &PropertyBag, key: &str) -> Result<Option<String>> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(InteractionError::invalid(node, key, "a node id string")),
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_scene_ingest.rs"]
mod tests;
