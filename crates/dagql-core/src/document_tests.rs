use crate::{ConversionGraph, GraphDocument, GraphError};

#[test]
fn parse_minimal_document() {
    let json = r#"{
        "nodes": [
            { "id": "landing", "is_entry": true },
            { "id": "signup" },
            { "id": "abandoned", "absorbing": true }
        ],
        "edges": [
            { "from": "landing", "to": "signup" },
            { "from": "landing", "to": "abandoned" }
        ]
    }"#;

    let g = ConversionGraph::from_json(json).unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);

    let landing = g.node_ix("landing").unwrap();
    assert!(g.meta(landing).is_entry);
    assert!(g.meta(g.node_ix("abandoned").unwrap()).absorbing);
}

#[test]
fn edges_default_to_empty() {
    let g = ConversionGraph::from_json(r#"{ "nodes": [{ "id": "solo" }] }"#).unwrap();
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn duplicate_node_rejected() {
    let json = r#"{ "nodes": [{ "id": "a" }, { "id": "a" }] }"#;
    let err = ConversionGraph::from_json(json).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateNode(ref id) if id == "a"));
}

#[test]
fn edge_to_undeclared_node_rejected() {
    let json = r#"{
        "nodes": [{ "id": "a" }],
        "edges": [{ "from": "a", "to": "ghost" }]
    }"#;
    let err = ConversionGraph::from_json(json).unwrap_err();
    assert_eq!(
        err.to_string(),
        "edge `a` -> `ghost` references undeclared node `ghost`"
    );
}

#[test]
fn invalid_json_rejected() {
    let err = GraphDocument::from_json("{ nodes: ").unwrap_err();
    assert!(matches!(err, GraphError::Json(_)));
}

#[test]
fn document_roundtrip_preserves_order() {
    let json = r#"{
        "nodes": [{ "id": "b", "is_entry": true }, { "id": "a" }],
        "edges": [{ "from": "b", "to": "a" }]
    }"#;
    let doc = GraphDocument::from_json(json).unwrap();
    let g = ConversionGraph::try_from(doc.clone()).unwrap();
    assert_eq!(g.to_document(), doc);
}
