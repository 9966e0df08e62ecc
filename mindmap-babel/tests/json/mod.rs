//! JSON interchange tests

use crate::common::import;
use mindmap_babel::{FormatError, FormatRegistry, Generalization};
use serde_json::{json, Value};

#[test]
fn test_markdown_to_json() {
    let registry = FormatRegistry::default();
    let tree = registry.parse("# Title\n\n- **item**\n", "markdown").unwrap();
    let out = registry.serialize(&tree, "json").unwrap();

    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        json!({
            "children": [{
                "data": { "text": "Title", "richText": false },
                "children": [{
                    "data": {
                        "text": "<p><span><strong>item</strong></span></p>",
                        "richText": true
                    },
                    "children": []
                }]
            }]
        })
    );
}

#[test]
fn test_json_round_trip_keeps_collaborator_fields() {
    let source = json!({
        "children": [{
            "data": {
                "text": "a",
                "richText": false,
                "uid": "b8f1",
                "expand": false,
                "generalization": { "text": "sum", "richText": false },
                "imageSize": { "width": 10, "height": 20 },
                "image": "data:image/png;base64,AA=="
            },
            "children": []
        }]
    })
    .to_string();

    let registry = FormatRegistry::default();
    let tree = registry.parse(&source, "json").unwrap();
    let data = &tree.children[0].data;
    assert_eq!(data.extra["uid"], "b8f1");
    assert!(matches!(data.generalization, Some(Generalization::Single(_))));

    let back: Value = serde_json::from_str(&registry.serialize(&tree, "json").unwrap()).unwrap();
    let original: Value = serde_json::from_str(&source).unwrap();
    assert_eq!(back, original);
}

#[test]
fn test_generalization_array_shape() {
    let source = r#"{"children":[{"data":{"text":"a","richText":false,"generalization":[{"text":"x","richText":false}]},"children":[]}]}"#;
    let tree = FormatRegistry::default().parse(source, "json").unwrap();
    let generalization = tree.children[0].data.generalization.as_ref().unwrap();
    assert!(matches!(generalization, Generalization::Many(items) if items.len() == 1));
}

#[test]
fn test_json_to_markdown() {
    let tree = import("# A\n\n## B\n");
    let registry = FormatRegistry::default();
    let json = registry.serialize(&tree, "json").unwrap();
    let back = registry.parse(&json, "json").unwrap();
    assert_eq!(registry.serialize(&back, "markdown").unwrap(), "# A\n\n## B\n\n");
}

#[test]
fn test_invalid_json() {
    let err = FormatRegistry::default().parse("[1, 2", "json").unwrap_err();
    assert!(matches!(err, FormatError::ParseError(_)));
}
