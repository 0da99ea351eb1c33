use super::*;
use crate::geometry::{Direction, Size};
use crate::scene::{LayeredProps, LevelProps, RectPackProps, SceneNode, TreeProps};

fn add(scene: &mut SceneGraph, id: &str, props: NodeProps, x: f64, y: f64) -> NodeIndex {
    let node = SceneNode::new(id, Point::new(x, y), Size::new(40.0, 40.0)).with_props(props);
    scene.add_node(scene.root, node).unwrap()
}

fn layered(layer: usize, pos: usize) -> NodeProps {
    NodeProps::Layered(LayeredProps::new(layer, pos))
}

fn abc() -> SceneGraph {
    let mut scene = SceneGraph::new("root");
    scene.set_level(scene.root, LevelProps::new(Algorithm::Layered, Direction::Right));
    add(&mut scene, "A", layered(0, 0), 0.0, 0.0);
    add(&mut scene, "B", layered(0, 1), 0.0, 50.0);
    add(&mut scene, "C", layered(1, 0), 200.0, 0.0);
    scene
}

fn move_node(scene: &mut SceneGraph, id: &str, to: Point) {
    let idx = scene.lookup(id).unwrap();
    scene.set_position(idx, to);
}

#[test]
fn test_begin_on_unknown_node_fails() {
    let scene = abc();
    let err = DragSession::begin(&scene, "nope").unwrap_err();
    assert!(matches!(err, InteractionError::UnknownNode { .. }));
}

#[test]
fn test_begin_on_root_fails() {
    let scene = abc();
    let err = DragSession::begin(&scene, "root").unwrap_err();
    assert!(matches!(err, InteractionError::NoParent { .. }));
}

#[test]
fn test_begin_records_shadow() {
    let scene = abc();
    let session = DragSession::begin(&scene, "B").unwrap();
    let b = scene.lookup("B").unwrap();
    assert_eq!(session.target(), b);
    assert_eq!(session.overlay().shadow(b), Some(Point::new(0.0, 50.0)));
    assert!(!session.has_dragged());
}

#[test]
fn test_release_without_drag_is_cancelled() {
    let scene = abc();
    let session = DragSession::begin(&scene, "A").unwrap();
    let config = InteractionConfig::default();
    assert_eq!(session.finish(&scene, Point::new(20.0, 20.0), &config), None);
}

#[test]
fn test_layered_drag_end_to_end() {
    let mut scene = abc();
    let mut session = DragSession::begin(&scene, "A").unwrap();
    move_node(&mut scene, "A", Point::new(0.0, 100.0));
    session.mark_dragged();
    let feedback = session.feedback(&scene);
    match feedback {
        DragFeedback::Layered(f) => {
            assert_eq!(f.layers.len(), 2);
            assert_eq!(f.placement.layer, 0);
            assert_eq!(f.placement.position, 1);
            assert!(!f.placement.forbidden);
        }
        other => panic!("expected layered feedback, got {:?}", other),
    }
    let config = InteractionConfig::default();
    assert_eq!(
        session.finish(&scene, Point::new(20.0, 120.0), &config),
        Some(Action::SetPositionConstraint {
            id: "A".to_string(),
            position: 1,
            pos_cons: 1,
        })
    );
}

#[test]
fn test_relative_mode_emits_relative_constraint() {
    let mut scene = abc();
    let mut session = DragSession::begin(&scene, "C").unwrap();
    move_node(&mut scene, "C", Point::new(0.0, 5.0));
    session.mark_dragged();
    let config = InteractionConfig {
        relative_constraints: true,
        ..InteractionConfig::default()
    };
    assert_eq!(
        session.finish(&scene, Point::new(20.0, 25.0), &config),
        Some(Action::SetInLayerSuccessorOfConstraint {
            id: "C".to_string(),
            referenced_node: "A".to_string(),
        })
    );
}

#[test]
fn test_forbidden_feedback_flags_node() {
    let mut scene = SceneGraph::new("root");
    scene.set_level(scene.root, LevelProps::new(Algorithm::Layered, Direction::Right));
    let a = add(&mut scene, "A", layered(0, 0), 0.0, 0.0);
    let mut d = LayeredProps::new(1, 0);
    d.layer_cons = Some(1);
    let d = add(&mut scene, "D", NodeProps::Layered(d), 200.0, 0.0);
    scene.add_edge("e1", a, d);

    let mut session = DragSession::begin(&scene, "A").unwrap();
    scene.set_position(a, Point::new(200.0, 60.0));
    session.mark_dragged();
    session.feedback(&scene);
    assert_eq!(session.overlay().forbidden_nodes(), vec![a]);

    let config = InteractionConfig::default();
    assert_eq!(
        session.finish(&scene, Point::new(220.0, 80.0), &config),
        Some(Action::Refresh)
    );
}

#[test]
fn test_non_interactive_level_gives_nothing() {
    let mut scene = SceneGraph::new("root");
    let mut level = LevelProps::new(Algorithm::Layered, Direction::Right);
    level.interactive = false;
    scene.set_level(scene.root, level);
    let a = add(&mut scene, "A", layered(0, 0), 0.0, 0.0);

    let mut session = DragSession::begin(&scene, "A").unwrap();
    scene.set_position(a, Point::new(0.0, 300.0));
    session.mark_dragged();
    assert_eq!(session.feedback(&scene), DragFeedback::None);
    let config = InteractionConfig::default();
    assert_eq!(session.finish(&scene, Point::new(20.0, 320.0), &config), None);
}

#[test]
fn test_rect_pack_session_highlights_hovered() {
    let mut scene = SceneGraph::new("root");
    scene.set_level(
        scene.root,
        LevelProps::new(Algorithm::RectPacking, Direction::Undefined),
    );
    let rp = |i: usize| {
        NodeProps::RectPacking(RectPackProps {
            current_position: i,
            desired_position: None,
        })
    };
    let a = add(&mut scene, "A", rp(0), 0.0, 0.0);
    let b = add(&mut scene, "B", rp(1), 50.0, 0.0);

    let mut session = DragSession::begin(&scene, "A").unwrap();
    scene.set_position(a, Point::new(50.0, 0.0));
    session.mark_dragged();
    assert_eq!(
        session.feedback(&scene),
        DragFeedback::RectPacking { hovered: Some(b) }
    );
    assert_eq!(session.overlay().highlighted_nodes(), vec![b]);

    let config = InteractionConfig::default();
    assert_eq!(
        session.finish(&scene, Point::new(70.0, 20.0), &config),
        Some(Action::RectPackSetPositionConstraint {
            id: "A".to_string(),
            order: 1,
        })
    );
}

#[test]
fn test_tree_session_reorders_siblings() {
    let mut scene = SceneGraph::new("root");
    scene.set_level(scene.root, LevelProps::new(Algorithm::Tree, Direction::Down));
    let tree = || NodeProps::Tree(TreeProps::default());
    let r = add(&mut scene, "R", tree(), 50.0, 0.0);
    let a = add(&mut scene, "A", tree(), 0.0, 100.0);
    let b = add(&mut scene, "B", tree(), 100.0, 100.0);
    scene.add_edge("e1", r, a);
    scene.add_edge("e2", r, b);

    let mut session = DragSession::begin(&scene, "B").unwrap();
    scene.set_position(b, Point::new(-50.0, 100.0));
    session.mark_dragged();
    match session.feedback(&scene) {
        DragFeedback::Tree { siblings, position, .. } => {
            assert_eq!(siblings, vec![a, b]);
            assert_eq!(position, 0);
        }
        other => panic!("expected tree feedback, got {:?}", other),
    }
    let config = InteractionConfig::default();
    assert_eq!(
        session.finish(&scene, Point::new(-30.0, 120.0), &config),
        Some(Action::TreeSetPositionConstraint {
            id: "B".to_string(),
            position: 0,
        })
    );
}

// ─── delete_constraints_action ───────────────────────────────────────────────

#[test]
fn test_delete_layered_constraints() {
    let mut scene = SceneGraph::new("root");
    let mut both = LayeredProps::new(0, 0);
    both.layer_cons = Some(1);
    both.pos_cons = Some(2);
    let mut layer_only = LayeredProps::new(0, 1);
    layer_only.layer_cons = Some(1);
    let mut pos_only = LayeredProps::new(0, 2);
    pos_only.pos_cons = Some(0);
    let mut rel = LayeredProps::new(0, 3);
    rel.in_layer_succ_of = Some("A".to_string());

    let a = add(&mut scene, "A", NodeProps::Layered(both), 0.0, 0.0);
    let b = add(&mut scene, "B", NodeProps::Layered(layer_only), 0.0, 50.0);
    let c = add(&mut scene, "C", NodeProps::Layered(pos_only), 0.0, 100.0);
    let d = add(&mut scene, "D", NodeProps::Layered(rel), 0.0, 150.0);
    let e = add(&mut scene, "E", layered(0, 4), 0.0, 200.0);

    let id = |s: &str| s.to_string();
    assert_eq!(
        delete_constraints_action(&scene, a),
        Action::DeleteStaticConstraint { id: id("A") }
    );
    assert_eq!(delete_constraints_action(&scene, b), Action::DeleteLayerConstraint { id: id("B") });
    assert_eq!(
        delete_constraints_action(&scene, c),
        Action::DeletePositionConstraint { id: id("C") }
    );
    assert_eq!(
        delete_constraints_action(&scene, d),
        Action::DeleteRelativeConstraints { id: id("D") }
    );
    assert_eq!(delete_constraints_action(&scene, e), Action::Refresh);
}

#[test]
fn test_delete_rect_pack_and_tree_constraints() {
    let mut scene = SceneGraph::new("root");
    let r = add(
        &mut scene,
        "R",
        NodeProps::RectPacking(RectPackProps {
            current_position: 0,
            desired_position: Some(2),
        }),
        0.0,
        0.0,
    );
    let t = add(
        &mut scene,
        "T",
        NodeProps::Tree(TreeProps {
            tree_level: Some(1),
            pos_cons: Some(0),
        }),
        0.0,
        0.0,
    );
    let u = add(&mut scene, "U", NodeProps::Tree(TreeProps::default()), 0.0, 0.0);
    assert_eq!(
        delete_constraints_action(&scene, r),
        Action::RectPackDeletePositionConstraint { id: "R".to_string() }
    );
    assert_eq!(
        delete_constraints_action(&scene, t),
        Action::TreeDeletePositionConstraint { id: "T".to_string() }
    );
    assert_eq!(delete_constraints_action(&scene, u), Action::Refresh);
}
