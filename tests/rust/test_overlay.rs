use super::*;

#[test]
fn test_begin_drag_selects_single_node() {
    let mut overlay = InteractionOverlay::new();
    let a = NodeIndex::new(1);
    let b = NodeIndex::new(2);
    overlay.begin_drag(a, Point::new(1.0, 2.0));
    overlay.begin_drag(b, Point::new(3.0, 4.0));
    assert!(!overlay.is_selected(a));
    assert_eq!(overlay.shadow(a), None);
    assert_eq!(overlay.selected(), Some(b));
    assert_eq!(overlay.shadow(b), Some(Point::new(3.0, 4.0)));
}

#[test]
fn test_clear_feedback_keeps_selection() {
    let mut overlay = InteractionOverlay::new();
    let a = NodeIndex::new(1);
    let b = NodeIndex::new(2);
    overlay.begin_drag(a, Point::new(0.0, 0.0));
    overlay.set_forbidden(a, true);
    overlay.set_highlight(b, true);
    assert_eq!(overlay.forbidden_nodes(), vec![a]);
    assert_eq!(overlay.highlighted_nodes(), vec![b]);

    overlay.clear_feedback();
    assert!(overlay.forbidden_nodes().is_empty());
    assert!(overlay.highlighted_nodes().is_empty());
    assert!(overlay.is_selected(a));
}

#[test]
fn test_end_drag_resets_everything() {
    let mut overlay = InteractionOverlay::new();
    let a = NodeIndex::new(1);
    overlay.begin_drag(a, Point::new(0.0, 0.0));
    overlay.end_drag();
    assert_eq!(overlay.get(a), NodeInteraction::default());
    assert_eq!(overlay.selected(), None);
}

#[test]
fn test_frame_origin_prefers_shadow() {
    let mut scene = SceneGraph::new("root");
    let a = scene
        .add_node(
            scene.root,
            crate::scene::SceneNode::new("A", Point::new(0.0, 0.0), Size::new(10.0, 20.0)),
        )
        .unwrap();
    let mut overlay = InteractionOverlay::new();
    overlay.begin_drag(a, Point::new(0.0, 0.0));
    scene.set_position(a, Point::new(100.0, 50.0));

    let frame = Frame::new(&scene, &overlay);
    assert_eq!(frame.origin(a), Point::new(0.0, 0.0));
    assert_eq!(frame.position(a), Point::new(100.0, 50.0));
    assert_eq!(frame.center(a), Point::new(105.0, 60.0));
    assert!(frame.is_selected(a));
    assert_eq!(frame.id(a), "A");
    assert_eq!(frame.layer_id(a), None);
}
