//! Error path tests: every failure is fatal, typed, and produced before
//! any partial output

use bowline::prelude::*;
use bowline::{build_hierarchy, render_flowchart};

#[test]
fn test_document_must_be_an_object() {
    assert!(matches!(
        CanvasData::from_json_str("[]").unwrap_err(),
        CanvasError::Json { .. }
    ));
    assert!(matches!(
        CanvasData::from_json_str("42").unwrap_err(),
        CanvasError::Json { .. }
    ));
}

#[test]
fn test_nodes_must_be_an_array() {
    let err = CanvasData::from_json_str(r#"{"nodes": {}, "edges": []}"#).unwrap_err();
    assert!(matches!(err, CanvasError::Json { .. }));
}

#[test]
fn test_geometry_must_be_numeric() {
    let err = CanvasData::from_json_str(
        r#"{"nodes": [{"id": "a", "type": "text", "text": "A", "x": "left", "y": 0, "width": 10, "height": 10}], "edges": []}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CanvasError::Json { .. }));
}

#[test]
fn test_text_node_requires_text_field() {
    let err = CanvasData::from_json_str(
        r#"{"nodes": [{"id": "a", "type": "text", "x": 0, "y": 0, "width": 10, "height": 10}], "edges": []}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CanvasError::Json { .. }));
}

#[test]
fn test_unrecognized_side_and_end_tokens_rejected() {
    let canvas_with_edge = |edge: &str| {
        format!(
            r#"{{
                "nodes": [
                    {{"id": "a", "type": "text", "text": "A", "x": 0, "y": 0, "width": 10, "height": 10}},
                    {{"id": "b", "type": "text", "text": "B", "x": 50, "y": 0, "width": 10, "height": 10}}
                ],
                "edges": [{}]
            }}"#,
            edge
        )
    };

    let bad_side =
        canvas_with_edge(r#"{"id": "e", "fromNode": "a", "toNode": "b", "fromSide": "center"}"#);
    assert!(CanvasData::from_json_str(&bad_side).is_err());

    let bad_end =
        canvas_with_edge(r#"{"id": "e", "fromNode": "a", "toNode": "b", "toEnd": "diamond"}"#);
    assert!(CanvasData::from_json_str(&bad_end).is_err());
}

#[test]
fn test_unrecognized_node_type_is_a_validation_error() {
    // Unknown tags deserialize (leniently) but never pass validation.
    let data = CanvasData::from_json_str(
        r#"{"nodes": [{"id": "a", "type": "sticker", "x": 0, "y": 0, "width": 10, "height": 10}], "edges": []}"#,
    )
    .unwrap();

    let err = build_hierarchy(&data).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidNode { index: 0, .. }));
}

#[test]
fn test_duplicate_node_id_reported_by_id() {
    let data = CanvasData::from_json_str(
        r#"{
            "nodes": [
                {"id": "dup", "type": "text", "text": "A", "x": 0, "y": 0, "width": 10, "height": 10},
                {"id": "dup", "type": "text", "text": "B", "x": 50, "y": 0, "width": 10, "height": 10}
            ],
            "edges": []
        }"#,
    )
    .unwrap();

    let err = build_hierarchy(&data).unwrap_err();
    match err {
        CanvasError::DuplicateNodeId { id } => assert_eq!(id, "dup"),
        other => panic!("expected DuplicateNodeId, got {other}"),
    }
}

#[test]
fn test_dangling_edge_reported_with_index() {
    let data = CanvasData::from_json_str(
        r#"{
            "nodes": [{"id": "a", "type": "text", "text": "A", "x": 0, "y": 0, "width": 10, "height": 10}],
            "edges": [
                {"id": "ok", "fromNode": "a", "toNode": "a"},
                {"id": "bad", "fromNode": "a", "toNode": "ghost"}
            ]
        }"#,
    )
    .unwrap();

    let err = build_hierarchy(&data).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidEdge { index: 1, .. }));
}

#[test]
fn test_configuration_checked_before_data() {
    // The canvas itself is invalid too, but configuration errors win: they
    // are checked before any transformation work begins.
    let data = CanvasData::from_json_str(
        r#"{"nodes": [{"id": "a", "type": "sticker", "x": 0, "y": 0, "width": 10, "height": 10}], "edges": []}"#,
    )
    .unwrap();

    let err = render_flowchart(&data, &ColorOverrides::new(), "sideways").unwrap_err();
    assert!(matches!(err, CanvasError::InvalidDirection { .. }));

    let mut overrides = ColorOverrides::new();
    overrides.insert("0".to_string(), "#ff0000".to_string());
    let err = render_flowchart(&data, &overrides, "TB").unwrap_err();
    assert!(matches!(err, CanvasError::InvalidColorKey { .. }));
}

#[test]
fn test_error_messages_are_actionable() {
    let mut overrides = ColorOverrides::new();
    overrides.insert("1".to_string(), "blue".to_string());
    let err = render_flowchart(&CanvasData::new(), &overrides, "TB").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("blue"));
    assert!(msg.contains("hex"));
}
