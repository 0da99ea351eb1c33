use super::*;

const LAYERED_SCENE: &str = r#"{
    "id": "root",
    "properties": {
        "org.eclipse.elk.algorithm": "org.eclipse.elk.layered",
        "org.eclipse.elk.direction": "RIGHT",
        "org.eclipse.elk.interactiveLayout": true
    },
    "children": [
        {
            "id": "A",
            "position": {"x": 0, "y": 0},
            "size": {"width": 40, "height": 40},
            "properties": {
                "org.eclipse.elk.layered.layering.layerId": 0,
                "org.eclipse.elk.layered.layering.layerChoiceConstraint": -1,
                "org.eclipse.elk.layered.crossingMinimization.positionId": 0,
                "org.eclipse.elk.layered.crossingMinimization.inLayerPredOf": "B"
            }
        },
        {
            "id": "B",
            "position": {"x": 0, "y": 50},
            "size": {"width": 40, "height": 40},
            "properties": {
                "org.eclipse.elk.layered.layering.layerId": 0,
                "org.eclipse.elk.layered.layering.layerChoiceConstraint": 2,
                "org.eclipse.elk.layered.crossingMinimization.positionId": 1,
                "org.eclipse.elk.layered.crossingMinimization.inLayerSuccOf": "A"
            }
        }
    ],
    "edges": [{"id": "e1", "source": "A", "target": "B"}]
}"#;

#[test]
fn test_parse_layered_scene() {
    let scene = parse_scene(LAYERED_SCENE).unwrap();
    assert_eq!(scene.node_count(), 3);
    let level = scene.node(scene.root).level.clone().unwrap();
    assert_eq!(level.algorithm, Algorithm::Layered);
    assert_eq!(level.direction, Direction::Right);
    assert!(level.interactive);

    let a = scene.lookup("A").unwrap();
    let b = scene.lookup("B").unwrap();
    let pa = scene.layered(a).unwrap();
    assert_eq!(pa.layer_id, 0);
    assert_eq!(pa.layer_cons, None);
    assert_eq!(pa.in_layer_pred_of.as_deref(), Some("B"));
    let pb = scene.layered(b).unwrap();
    assert_eq!(pb.layer_cons, Some(2));
    assert_eq!(pb.pos_id, 1);
    assert_eq!(scene.outgoing(a), vec![b]);
}

#[test]
fn test_algorithm_suffix_recognition() {
    assert_eq!(algorithm_from_id("org.eclipse.elk.layered"), Algorithm::Layered);
    assert_eq!(algorithm_from_id("de.cau.cs.kieler.klay.layered"), Algorithm::Layered);
    assert_eq!(algorithm_from_id("org.eclipse.elk.rectpacking"), Algorithm::RectPacking);
    assert_eq!(algorithm_from_id("org.eclipse.elk.mrtree"), Algorithm::Tree);
    assert_eq!(algorithm_from_id("mrtree"), Algorithm::Tree);
    assert_eq!(algorithm_from_id("org.eclipse.elk.force"), Algorithm::Other);
    assert_eq!(algorithm_from_id("org.eclipse.elk.notlayered"), Algorithm::Other);
}

#[test]
fn test_unknown_direction_rejected() {
    let src = r#"{"id": "r", "properties": {"org.eclipse.elk.direction": "SIDEWAYS"}}"#;
    let err = parse_scene(src).unwrap_err();
    assert!(matches!(err, InteractionError::UnknownDirection { .. }));
}

#[test]
fn test_missing_layer_id_rejected() {
    let src = r#"{
        "id": "r",
        "children": [{"id": "A", "properties": {
            "org.eclipse.elk.layered.crossingMinimization.positionId": 0
        }}]
    }"#;
    let err = parse_scene(src).unwrap_err();
    match err {
        InteractionError::MissingProperty { node, key } => {
            assert_eq!(node, "A");
            assert_eq!(key, LAYER_ID);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_wrongly_typed_property_rejected() {
    let src = r#"{
        "id": "r",
        "children": [{"id": "A", "properties": {
            "org.eclipse.elk.layered.layering.layerId": "zero",
            "org.eclipse.elk.layered.crossingMinimization.positionId": 0
        }}]
    }"#;
    assert!(matches!(
        parse_scene(src),
        Err(InteractionError::InvalidProperty { .. })
    ));
}

#[test]
fn test_dangling_edge_rejected() {
    let src = r#"{"id": "r", "edges": [{"id": "e", "source": "X", "target": "Y"}]}"#;
    assert!(matches!(
        parse_scene(src),
        Err(InteractionError::DanglingEdge { .. })
    ));
}

#[test]
fn test_child_area_and_measurement() {
    let src = r#"{
        "id": "r",
        "properties": {"org.eclipse.elk.algorithm": "org.eclipse.elk.force"},
        "children": [
            {"id": "G", "size": {"width": 100, "height": 80},
             "data": [{"type": "KChildAreaImpl"}],
             "properties": {"org.eclipse.elk.algorithm": "org.eclipse.elk.rectpacking",
                            "org.eclipse.elk.aspectRatio": 1.5},
             "children": [
                {"id": "R1", "properties": {"org.eclipse.elk.rectpacking.currentPosition": 0,
                                            "org.eclipse.elk.rectpacking.desiredPosition": -1}}
             ]},
            {"id": "H", "data": [{"type": "KRectangleImpl"}, {"type": "KChildAreaImpl"}]}
        ]
    }"#;
    let scene = parse_scene(src).unwrap();
    let g = scene.lookup("G").unwrap();
    let h = scene.lookup("H").unwrap();
    let r1 = scene.lookup("R1").unwrap();
    assert!(scene.node(g).opens_region);
    assert!(scene.node(g).measured);
    assert!(!scene.node(h).opens_region);
    assert!(!scene.node(h).measured);
    assert_eq!(scene.node(g).props, NodeProps::Unconstrained);
    let level = scene.node(g).level.clone().unwrap();
    assert_eq!(level.algorithm, Algorithm::RectPacking);
    assert_eq!(level.aspect_ratio, Some(1.5));
    assert!(!level.interactive);
    assert_eq!(
        scene.rect_pack(r1),
        Some(&RectPackProps {
            current_position: 0,
            desired_position: None
        })
    );
}

#[test]
fn test_tree_props_optional() {
    let src = r#"{
        "id": "r",
        "properties": {"org.eclipse.elk.algorithm": "org.eclipse.elk.mrtree"},
        "children": [{"id": "T", "properties": {"org.eclipse.elk.mrtree.treeLevel": 2}}]
    }"#;
    let scene = parse_scene(src).unwrap();
    let t = scene.lookup("T").unwrap();
    let props = scene.tree(t).unwrap();
    assert_eq!(props.tree_level, Some(2));
    assert_eq!(props.pos_cons, None);
}

#[test]
fn test_malformed_json() {
    assert!(matches!(parse_scene("{"), Err(InteractionError::Json(_))));
}
