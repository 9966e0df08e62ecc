//! Imported trees run through the tree transforms and the bullet-list export.

use crate::common::{import, shape};
use insta::assert_snapshot;
use mindmap_babel::formats::markdown_list::serialize_to_markdown_list;
use mindmap_babel::TreeTransforms;

#[test]
fn test_outline_numbered_as_list() {
    let mut tree = import("# Plan\n\n## Research\n\n- papers\n- *talks*\n\n## Build\n");
    TreeTransforms {
        auto_number: true,
        ..Default::default()
    }
    .apply(&mut tree);

    assert_snapshot!(serialize_to_markdown_list(&tree), @r#"
- 1 Plan
  - 1.1 Research
    - 1.1.1 papers
    - 1.1.2 *talks*
  - 1.2 Build
"#);
}

#[test]
fn test_trim_after_import() {
    let mut tree = import("# A\n\n## B\n\n- deep\n  - deeper\n");
    TreeTransforms {
        max_level: 3,
        ..Default::default()
    }
    .apply(&mut tree);
    assert_eq!(shape(&tree.children), "A(B(deep))");
}

#[test]
fn test_prune_after_import() {
    let mut tree = import("# A\n\n- one\n-\n- two\n");
    TreeTransforms {
        prune_empty: true,
        ..Default::default()
    }
    .apply(&mut tree);
    assert_eq!(shape(&tree.children), "A(one two)");
}

#[test]
fn test_list_export_rebuilds_inline_styles() {
    let tree = import("# See [docs](https://x.org) and ~~old~~ $a+b$\n");
    assert_eq!(
        serialize_to_markdown_list(&tree),
        "- See [docs](https://x.org) and ~~old~~ $a+b$\n"
    );
}
