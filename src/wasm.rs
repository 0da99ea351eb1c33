//! WASM bindings for klighd-interactive.
//!
//! Scenes go in and results come out as JSON strings.

use wasm_bindgen::prelude::*;

use crate::{InteractionConfig, Point, Size, Viewport, layers_of, parse_scene, region_states};

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Action for dragging `node` so its centre lands on (`x`, `y`); `"null"`
/// when the drop leads to no action.
///
/// - `relative`: emit in-layer successor/predecessor constraints for layered levels
#[wasm_bindgen(js_name = "simulateDrop")]
pub fn simulate_drop(
    scene: &str,
    node: &str,
    x: f64,
    y: f64,
    relative: bool,
) -> Result<String, JsError> {
    let config = InteractionConfig {
        relative_constraints: relative,
        ..InteractionConfig::default()
    };
    let action = crate::simulate_drop(scene, node, Point::new(x, y), &config).map_err(js_err)?;
    serde_json::to_string(&action).map_err(js_err)
}

/// Layer bands below `parent`, or below the root when `parent` is empty.
#[wasm_bindgen(js_name = "layers")]
pub fn layers(scene: &str, parent: &str) -> Result<String, JsError> {
    let scene = parse_scene(scene).map_err(js_err)?;
    let parent = if parent.is_empty() {
        scene.root_id().to_string()
    } else {
        parent.to_string()
    };
    let layers = layers_of(&scene, &parent).map_err(js_err)?;
    serde_json::to_string(&layers).map_err(js_err)
}

/// Region expansion states for a viewport, with the default threshold.
#[wasm_bindgen(js_name = "regionStates")]
pub fn regions(
    scene: &str,
    scroll_x: f64,
    scroll_y: f64,
    zoom: f64,
    width: f64,
    height: f64,
) -> Result<String, JsError> {
    let scene = parse_scene(scene).map_err(js_err)?;
    let viewport = Viewport {
        scroll: Point::new(scroll_x, scroll_y),
        zoom,
        canvas: Size::new(width, height),
    };
    let states = region_states(&scene, &viewport, &InteractionConfig::default());
    serde_json::to_string(&states).map_err(js_err)
}
