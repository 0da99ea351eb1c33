//! Region tree of a diagram and its viewport-driven expand/collapse.
//!
//! A region is opened by every node whose rendering has a nested child area;
//! the diagram root forms a synthetic region without a bounding node. Regions
//! live in an arena indexed by [`RegionId`].

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::NodeIndex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::InteractionConfig;
use crate::geometry::{Point, Rect, Size};
use crate::scene::SceneGraph;

// ─── Types ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RegionId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    /// Node whose child area bounds the region; `None` for the root region.
    pub bounding_rectangle: Option<NodeIndex>,
    /// Nodes rendered inside this region but not inside a nested one.
    pub elements: Vec<NodeIndex>,
    pub parent: Option<RegionId>,
    pub children: BTreeSet<RegionId>,
    pub expansion_state: bool,
    /// Diagram coordinates of the bounding node; `None` until measured.
    pub absolute_bounds: Option<Rect>,
    pub depth: usize,
}

impl Region {
    fn new(id: RegionId, bounding_rectangle: Option<NodeIndex>, depth: usize) -> Self {
        Self {
            id,
            bounding_rectangle,
            elements: Vec::new(),
            parent: None,
            children: BTreeSet::new(),
            expansion_state: true,
            absolute_bounds: None,
            depth,
        }
    }

    pub fn is_root(&self) -> bool {
        self.bounding_rectangle.is_none()
    }
}

/// What the canvas currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Diagram coordinate at the canvas' top-left corner.
    pub scroll: Point,
    pub zoom: f64,
    /// Canvas size in screen pixels.
    pub canvas: Size,
}

impl Viewport {
    /// The visible part of the diagram, in diagram coordinates.
    pub fn visible_rect(&self) -> Rect {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };
        Rect::new(
            self.scroll.x,
            self.scroll.y,
            self.canvas.width / zoom,
            self.canvas.height / zoom,
        )
    }
}

/// Serializable summary of one region, keyed by node ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionState {
    pub id: String,
    pub depth: usize,
    pub expanded: bool,
    pub parent: Option<String>,
    pub elements: usize,
}

// ─── DepthMap ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DepthMap {
    root_id: String,
    regions: Vec<Region>,
    root_region: RegionId,
    /// Bounding node id (root id for the root region) → region.
    region_map: HashMap<String, RegionId>,
    by_depth: Vec<Vec<RegionId>>,
    element_expansion: HashMap<NodeIndex, bool>,
    /// Containment structure the map was built from, in `NodeIndex` order.
    structure: Vec<NodeShape>,
}

/// Per-node part of the scene structure a depth map depends on.
#[derive(Debug, Clone, PartialEq)]
struct NodeShape {
    id: String,
    parent: Option<NodeIndex>,
    opens_region: bool,
}

fn structure_of(scene: &SceneGraph) -> Vec<NodeShape> {
    scene
        .digraph
        .node_weights()
        .map(|n| NodeShape {
            id: n.id.clone(),
            parent: n.parent,
            opens_region: n.opens_region,
        })
        .collect()
}

impl DepthMap {
    /// Build and link the region tree of `scene`.
    pub fn build(scene: &SceneGraph) -> Self {
        let root_region = RegionId(0);
        let mut map = Self {
            root_id: scene.root_id().to_string(),
            regions: vec![Region::new(root_region, None, 0)],
            root_region,
            region_map: HashMap::new(),
            by_depth: Vec::new(),
            element_expansion: HashMap::new(),
            structure: structure_of(scene),
        };
        for &child in scene.children(scene.root) {
            map.walk(scene, child, root_region);
        }
        map.register(scene.root_id(), root_region);
        map.link(scene);
        map.refresh_bounds(scene);

        debug!(
            root = %map.root_id,
            regions = map.regions.len(),
            depth = map.by_depth.len(),
            "depth map built"
        );
        map
    }

    /// A region is registered once its nested walk has finished, so inner
    /// regions precede their outer region within `by_depth`.
    fn walk(&mut self, scene: &SceneGraph, node: NodeIndex, region: RegionId) {
        if !scene.node(node).opens_region {
            self.regions[region.0].elements.push(node);
            for &child in scene.children(node) {
                self.walk(scene, child, region);
            }
            return;
        }
        let id = &scene.node(node).id;
        if self.region_map.contains_key(id) {
            return;
        }
        let rid = RegionId(self.regions.len());
        let depth = self.regions[region.0].depth + 1;
        self.regions.push(Region::new(rid, Some(node), depth));
        for &child in scene.children(node) {
            self.walk(scene, child, rid);
        }
        self.register(id, rid);
    }

    /// Registering the same key twice is a no-op.
    fn register(&mut self, key: &str, rid: RegionId) {
        if self.region_map.contains_key(key) {
            return;
        }
        self.region_map.insert(key.to_string(), rid);
        let depth = self.regions[rid.0].depth;
        if self.by_depth.len() <= depth {
            self.by_depth.resize_with(depth + 1, Vec::new);
        }
        self.by_depth[depth].push(rid);
    }

    /// Deepest regions first, attach every region to the nearest registered
    /// region among its bounding node's ancestors.
    fn link(&mut self, scene: &SceneGraph) {
        let order: Vec<RegionId> = self.by_depth.iter().rev().flatten().copied().collect();
        for rid in order {
            let Some(bounding) = self.regions[rid.0].bounding_rectangle else {
                continue;
            };
            let mut cur = scene.parent(bounding);
            while let Some(p) = cur {
                if let Some(&outer) = self.region_map.get(&scene.node(p).id) {
                    if outer != rid {
                        self.regions[rid.0].parent = Some(outer);
                        self.regions[outer.0].children.insert(rid);
                    }
                    break;
                }
                cur = scene.parent(p);
            }
        }
    }

    /// `scene` has the containment structure this map was built from, so
    /// its node indices can be reused.
    pub fn matches(&self, scene: &SceneGraph) -> bool {
        self.root_id == scene.root_id() && self.structure == structure_of(scene)
    }

    /// Refresh region bounds from the scene without re-parenting.
    ///
    /// Returns `false` and leaves the map untouched when `scene` is not the
    /// model the map was built from.
    pub fn update_bounds(&mut self, scene: &SceneGraph) -> bool {
        if !self.matches(scene) {
            return false;
        }
        self.refresh_bounds(scene);
        true
    }

    fn refresh_bounds(&mut self, scene: &SceneGraph) {
        for region in &mut self.regions {
            region.absolute_bounds = region
                .bounding_rectangle
                .filter(|&b| scene.node(b).measured)
                .map(|b| scene.absolute_bounds(b));
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────────

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root_region(&self) -> &Region {
        &self.regions[self.root_region.0]
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region bounded by the node with `id` (the root id gives the root region).
    pub fn region_of(&self, id: &str) -> Option<&Region> {
        self.region_map.get(id).map(|rid| &self.regions[rid.0])
    }

    pub fn regions_at_depth(&self, depth: usize) -> impl Iterator<Item = &Region> {
        self.by_depth
            .get(depth)
            .into_iter()
            .flatten()
            .map(|rid| &self.regions[rid.0])
    }

    pub fn max_depth(&self) -> usize {
        self.by_depth.len().saturating_sub(1)
    }

    /// Expansion flag last applied to `node`; `None` if it is in no region.
    pub fn element_expanded(&self, node: NodeIndex) -> Option<bool> {
        self.element_expansion.get(&node).copied()
    }

    pub fn states(&self, scene: &SceneGraph) -> Vec<RegionState> {
        let name = |r: &Region| match r.bounding_rectangle {
            Some(b) => scene.node(b).id.clone(),
            None => self.root_id.clone(),
        };
        self.regions
            .iter()
            .map(|r| RegionState {
                id: name(r),
                depth: r.depth,
                expanded: r.expansion_state,
                parent: r.parent.map(|p| name(&self.regions[p.0])),
                elements: r.elements.len(),
            })
            .collect()
    }

    // ─── Expand / collapse ───────────────────────────────────────────────────

    /// An unmeasured region counts as visible.
    fn is_visible(region: &Region, window: &Rect) -> bool {
        region
            .absolute_bounds
            .is_none_or(|bounds| bounds.intersects(window))
    }

    /// Largest of the width and height fractions the region covers on screen.
    fn relative_size(region: &Region, view: &Rect) -> Option<f64> {
        let bounds = region.absolute_bounds?;
        if view.width <= 0.0 || view.height <= 0.0 {
            return None;
        }
        Some((bounds.width / view.width).max(bounds.height / view.height))
    }

    fn decide(region: &Region, viewport: &Viewport, config: &InteractionConfig) -> bool {
        let view = viewport.visible_rect();
        let window = view.inflate(
            view.width * config.viewport_buffer,
            view.height * config.viewport_buffer,
        );
        if !Self::is_visible(region, &window) {
            return false;
        }
        if region.is_root() || viewport.zoom >= 1.0 {
            return true;
        }
        Self::relative_size(region, &view).is_none_or(|s| s >= config.full_detail_threshold)
    }

    /// Recompute every region's expansion state for `viewport` and cascade it
    /// to the region's elements.
    pub fn expand_collapse(&mut self, viewport: &Viewport, config: &InteractionConfig) {
        for i in 0..self.regions.len() {
            let state = Self::decide(&self.regions[i], viewport, config);
            let region = &mut self.regions[i];
            if region.expansion_state != state {
                trace!(region = i, depth = region.depth, expanded = state, "region toggled");
            }
            region.expansion_state = state;
            for &e in &region.elements {
                self.element_expansion.insert(e, state);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_depth_map.rs"]
mod tests;
