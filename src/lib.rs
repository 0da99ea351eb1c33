//! klighd-interactive — interactive constraint layout for node-link diagrams.
//!
//! Turns a user's drag of a diagram node into one constraint for the layout
//! server, and decides which nested regions to draw in full detail.
//!
//! Modules:
//!   geometry     // Point, Size, Rect, Direction and axis helpers
//!   error        // InteractionError (ingest boundary)
//!   config       // InteractionConfig
//!   scene        // SceneGraph, typed layout props, JSON ingest
//!   interactive  // overlay, per-algorithm resolvers, actions, drag session
//!   depth_map    // region tree and viewport expand/collapse
//!   context      // DiagramInteractionContext, one per open diagram

pub mod config;
pub mod context;
pub mod depth_map;
pub mod error;
pub mod geometry;
pub mod interactive;
pub mod scene;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::InteractionConfig;
pub use context::DiagramInteractionContext;
pub use depth_map::{DepthMap, Region, RegionId, RegionState, Viewport};
pub use error::{InteractionError, Result};
pub use geometry::{Direction, Point, Rect, Size};
pub use interactive::{Action, DragFeedback, DragSession};
pub use scene::SceneGraph;
pub use scene::ingest::parse_scene;

use interactive::layered::{Layer, compute_layers};
use interactive::{Frame, InteractionOverlay, absolute_center};

/// Simulate a complete drag on a JSON scene.
///
/// Moves `node_id` so that its centre lands on `drop_point` (absolute
/// diagram coordinates) and returns the action the release would dispatch.
pub fn simulate_drop(
    scene_json: &str,
    node_id: &str,
    drop_point: Point,
    config: &InteractionConfig,
) -> Result<Option<Action>> {
    let mut scene = parse_scene(scene_json)?;
    let node = scene.lookup(node_id)?;
    let mut session = DragSession::begin(&scene, node_id)?;

    let center = absolute_center(&scene, node);
    let current = scene.node(node).position;
    scene.set_position(
        node,
        current.translate(drop_point.x - center.x, drop_point.y - center.y),
    );
    session.mark_dragged();
    session.feedback(&scene);
    Ok(session.finish(&scene, drop_point, config))
}

/// Layer bands of the layered level below `parent_id`.
pub fn layers_of(scene: &SceneGraph, parent_id: &str) -> Result<Vec<Layer>> {
    let parent = scene.lookup(parent_id)?;
    let nodes = scene.children(parent).to_vec();
    let direction = scene
        .node(parent)
        .level
        .as_ref()
        .map(|l| l.direction)
        .unwrap_or_default();
    let overlay = InteractionOverlay::new();
    let frame = Frame::new(scene, &overlay);
    Ok(compute_layers(&frame, &nodes, direction))
}

/// Build the depth map of a scene and run one expand/collapse pass.
pub fn region_states(
    scene: &SceneGraph,
    viewport: &Viewport,
    config: &InteractionConfig,
) -> Vec<RegionState> {
    let mut context = DiagramInteractionContext::new(config.clone());
    context.update_model(scene);
    match context.update_viewport(viewport) {
        Some(map) => map.states(scene),
        None => Vec::new(),
    }
}
