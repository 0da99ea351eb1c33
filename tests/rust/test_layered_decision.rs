use super::*;
use crate::geometry::{Point, Size};
use crate::interactive::layered::compute_layers;
use crate::interactive::overlay::InteractionOverlay;
use crate::scene::{Algorithm, LayeredProps, LevelProps, NodeProps, SceneGraph, SceneNode};

fn add(scene: &mut SceneGraph, id: &str, props: LayeredProps, x: f64, y: f64) -> NodeIndex {
    let node = SceneNode::new(id, Point::new(x, y), Size::new(40.0, 40.0))
        .with_props(NodeProps::Layered(props));
    scene.add_node(scene.root, node).unwrap()
}

/// A, B side by side in layer 0 (y = 0 and 50), C in layer 1 at x = 200.
fn abc() -> (SceneGraph, Vec<NodeIndex>) {
    let mut scene = SceneGraph::new("root");
    scene.set_level(scene.root, LevelProps::new(Algorithm::Layered, Direction::Right));
    let a = add(&mut scene, "A", LayeredProps::new(0, 0), 0.0, 0.0);
    let b = add(&mut scene, "B", LayeredProps::new(0, 1), 0.0, 50.0);
    let c = add(&mut scene, "C", LayeredProps::new(1, 0), 200.0, 0.0);
    (scene, vec![a, b, c])
}

/// Drag `node` to `to` and decide on release.
fn decide(scene: &mut SceneGraph, nodes: &[NodeIndex], node: NodeIndex, to: Point) -> Action {
    let mut overlay = InteractionOverlay::new();
    overlay.begin_drag(node, scene.node(node).position);
    scene.set_position(node, to);
    let frame = Frame::new(scene, &overlay);
    let layers = compute_layers(&frame, nodes, frame.direction(node));
    decide_action(&frame, nodes, &layers, node)
}

#[test]
fn test_drag_down_past_neighbour_sets_position() {
    let (mut scene, nodes) = abc();
    let action = decide(&mut scene, &nodes, nodes[0], Point::new(0.0, 100.0));
    assert_eq!(
        action,
        Action::SetPositionConstraint {
            id: "A".to_string(),
            position: 1,
            pos_cons: 1,
        }
    );
}

#[test]
fn test_drag_into_forbidden_layer_refreshes() {
    let mut scene = SceneGraph::new("root");
    scene.set_level(scene.root, LevelProps::new(Algorithm::Layered, Direction::Right));
    let a = add(&mut scene, "A", LayeredProps::new(0, 0), 0.0, 0.0);
    let mut d = LayeredProps::new(1, 0);
    d.layer_cons = Some(1);
    let d = add(&mut scene, "D", d, 200.0, 0.0);
    scene.add_edge("e1", a, d);
    let nodes = vec![a, d];

    let action = decide(&mut scene, &nodes, a, Point::new(200.0, 60.0));
    assert_eq!(action, Action::Refresh);
}

#[test]
fn test_drag_into_other_layer_band_sets_static() {
    let (mut scene, nodes) = abc();
    let action = decide(&mut scene, &nodes, nodes[0], Point::new(200.0, 10.0));
    assert_eq!(
        action,
        Action::SetStaticConstraint {
            id: "A".to_string(),
            layer: 1,
            layer_cons: 1,
            position: 1,
            pos_cons: 1,
        }
    );
}

#[test]
fn test_drag_beside_other_layer_band_sets_layer_only() {
    let (mut scene, nodes) = abc();
    // Layer 1's band ends at y = 60; A's centre lands at y = 80.
    let action = decide(&mut scene, &nodes, nodes[0], Point::new(200.0, 60.0));
    assert_eq!(
        action,
        Action::SetLayerConstraint {
            id: "A".to_string(),
            layer: 1,
            layer_cons: 1,
        }
    );
}

#[test]
fn test_drag_behind_last_layer_opens_new_layer() {
    let (mut scene, nodes) = abc();
    let action = decide(&mut scene, &nodes, nodes[0], Point::new(400.0, 0.0));
    assert_eq!(
        action,
        Action::SetStaticConstraint {
            id: "A".to_string(),
            layer: 2,
            layer_cons: 2,
            position: 0,
            pos_cons: 0,
        }
    );
}

#[test]
fn test_release_in_place_refreshes() {
    let (mut scene, nodes) = abc();
    let action = decide(&mut scene, &nodes, nodes[1], Point::new(0.0, 50.0));
    assert_eq!(action, Action::Refresh);
}

#[test]
fn test_small_move_within_slot_refreshes() {
    let (mut scene, nodes) = abc();
    let action = decide(&mut scene, &nodes, nodes[0], Point::new(5.0, 5.0));
    assert_eq!(action, Action::Refresh);
}

#[test]
fn test_layer_change_carries_corrected_layer() {
    let (mut scene, mut nodes) = abc();
    let mut d = LayeredProps::new(1, 1);
    d.layer_cons = Some(3);
    nodes.push(add(&mut scene, "D", d, 200.0, 50.0));

    let action = decide(&mut scene, &nodes, nodes[0], Point::new(200.0, 10.0));
    assert_eq!(action.committed_layer(), Some(3));
    assert!(matches!(action, Action::SetStaticConstraint { layer: 1, .. }));
}

#[test]
fn test_unconstrained_node_refreshes() {
    let mut scene = SceneGraph::new("root");
    let x = scene
        .add_node(
            scene.root,
            SceneNode::new("X", Point::new(0.0, 0.0), Size::new(10.0, 10.0)),
        )
        .unwrap();
    let nodes = vec![x];
    assert_eq!(decide(&mut scene, &nodes, x, Point::new(300.0, 0.0)), Action::Refresh);
}

#[test]
fn test_placement_reports_forbidden_layer() {
    let mut scene = SceneGraph::new("root");
    let a = add(&mut scene, "A", LayeredProps::new(0, 0), 0.0, 0.0);
    let mut d = LayeredProps::new(1, 0);
    d.layer_cons = Some(1);
    let d = add(&mut scene, "D", d, 200.0, 0.0);
    scene.add_edge("e1", d, a);
    let nodes = vec![a, d];

    let mut overlay = InteractionOverlay::new();
    overlay.begin_drag(a, Point::new(0.0, 0.0));
    scene.set_position(a, Point::new(200.0, 0.0));
    let frame = Frame::new(&scene, &overlay);
    let layers = compute_layers(&frame, &nodes, Direction::Right);
    let placement = resolve_placement(&frame, &nodes, &layers, a);
    assert_eq!(placement.layer, 1);
    assert!(placement.forbidden);
}

#[test]
fn test_should_only_set_layer_without_layers() {
    let (scene, nodes) = abc();
    let overlay = InteractionOverlay::new();
    let frame = Frame::new(&scene, &overlay);
    assert!(!should_only_set_layer(&frame, nodes[0], &[], 0, Direction::Right));
}
