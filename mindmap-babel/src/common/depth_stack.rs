//! Folds the flat block sequence of a Markdown document into a tree.
//!
//! # The Algorithm
//!
//! Markdown headings carry a depth but no explicit end. The builder keeps a
//! stack of open heading frames, each remembering its depth; the root sits
//! below them at depth −1 and is never closed.
//!
//! - A heading deeper than the current frame opens a new frame on top.
//! - A heading at the current depth closes the current frame first, so the
//!   two become siblings.
//! - A shallower heading closes frames until the top one is strictly
//!   shallower, then opens its frame there.
//!
//! A closed frame is appended to the children of the frame below it.
//! Paragraphs become nodes of the current frame. A list whose preceding
//! block is a paragraph is flattened into the last node of the current
//! frame; any other list goes into the current frame itself. A paragraph
//! absorbed by a heading is always followed by that heading's empty frame,
//! so the list lands in the frame either way.
//!
//! Depths are only compared, never bounded, so levels beyond 6 nest the
//! same way.

use crate::ast::MdNode;
use crate::common::inline::{first_image, is_image_only, InlineEncoder};
use crate::common::list_flatten::flatten_list_into;
use crate::tree::{MindMapNode, MindMapRoot};
use tracing::debug;

const ROOT_DEPTH: i32 = -1;

/// An open heading waiting for its children.
#[derive(Debug)]
struct Frame {
    node: MindMapNode,
    depth: i32,
}

/// Root children plus the stack of open heading frames.
#[derive(Debug, Default)]
struct DepthStack {
    root: Vec<MindMapNode>,
    open: Vec<Frame>,
}

impl DepthStack {
    fn current_depth(&self) -> i32 {
        self.open.last().map_or(ROOT_DEPTH, |frame| frame.depth)
    }

    fn current_children(&mut self) -> &mut Vec<MindMapNode> {
        match self.open.last_mut() {
            Some(frame) => &mut frame.node.children,
            None => &mut self.root,
        }
    }

    /// Close the top frame, attaching its node to the frame below.
    fn close(&mut self) {
        if let Some(frame) = self.open.pop() {
            self.current_children().push(frame.node);
        }
    }

    fn open_heading(&mut self, node: MindMapNode, depth: i32) {
        let current = self.current_depth();
        if depth == current {
            self.close();
        } else if depth < current {
            while self.current_depth() >= depth {
                self.close();
            }
        }
        self.open.push(Frame { node, depth });
    }

    fn finish(mut self) -> MindMapRoot {
        while !self.open.is_empty() {
            self.close();
        }
        MindMapRoot::new(self.root)
    }
}

/// Build the mind-map tree from the top-level blocks of a document.
pub fn build_tree(encoder: &InlineEncoder<'_>, blocks: &[MdNode]) -> MindMapRoot {
    let placeholder = encoder.options().placeholder_image_size;
    let mut stack = DepthStack::default();
    let mut index = 0;

    while index < blocks.len() {
        let block = &blocks[index];

        match block {
            MdNode::Heading { depth, children } => {
                if children.is_empty() {
                    debug!(depth, "skipping empty heading");
                    index += 1;
                    continue;
                }

                let mut data = encoder.node_data(block);
                // `# Title` followed by a lone image paragraph: the image
                // belongs to the heading
                if let Some(next) = blocks.get(index + 1) {
                    if next.is_paragraph() && is_image_only(next) {
                        if let Some(image) = first_image(next) {
                            data.set_image(image.url, image.alt, placeholder);
                            index += 1;
                        }
                    }
                }

                stack.open_heading(MindMapNode::new(data), i32::from(*depth));
            }

            MdNode::List { .. } => {
                let after_paragraph = index > 0 && blocks[index - 1].is_paragraph();
                let siblings = stack.current_children();
                if after_paragraph && !siblings.is_empty() {
                    let last = siblings.len() - 1;
                    flatten_list_into(encoder, block, &mut siblings[last].children);
                } else {
                    flatten_list_into(encoder, block, siblings);
                }
            }

            MdNode::Paragraph { children } => {
                if children.is_empty() {
                    index += 1;
                    continue;
                }

                let mut data = encoder.node_data(block);
                if let Some(image) = first_image(block) {
                    data.set_image(image.url, image.alt, placeholder);
                }
                stack.current_children().push(MindMapNode::new(data));
            }

            other => {
                debug!(kind = other.kind(), "ignoring block without a mind-map mapping");
            }
        }

        index += 1;
    }

    stack.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{parse_markdown, MdNode};
    use crate::common::math::LiteralMathRenderer;
    use crate::options::ImportOptions;

    fn build(md: &str) -> MindMapRoot {
        let doc = parse_markdown(md).unwrap();
        build_blocks(&doc.children)
    }

    fn build_blocks(blocks: &[MdNode]) -> MindMapRoot {
        let options = ImportOptions::default();
        let encoder = InlineEncoder::new(&options, &LiteralMathRenderer);
        build_tree(&encoder, blocks)
    }

    fn heading(depth: u8, text: &str) -> MdNode {
        MdNode::Heading {
            depth,
            children: vec![MdNode::text(text)],
        }
    }

    /// Render the tree shape as `text(children...)` for compact asserts.
    fn shape(nodes: &[MindMapNode]) -> String {
        nodes
            .iter()
            .map(|n| {
                if n.children.is_empty() {
                    n.data.text.clone()
                } else {
                    format!("{}({})", n.data.text, shape(&n.children))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_single_heading() {
        let root = build("# Title\n");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].data.text, "Title");
        assert!(!root.children[0].data.rich_text);
        assert!(root.children[0].children.is_empty());
    }

    #[test]
    fn test_deeper_heading_nests() {
        let root = build("# A\n## B\n### C\n");
        assert_eq!(shape(&root.children), "A(B(C))");
    }

    #[test]
    fn test_equal_depth_siblings() {
        let root = build("# A\n## B\n## C\n");
        assert_eq!(shape(&root.children), "A(B C)");
    }

    #[test]
    fn test_shallower_heading_walks_up() {
        let root = build("# A\n## B\n### C\n## D\n# E\n");
        assert_eq!(shape(&root.children), "A(B(C) D) E");
    }

    #[test]
    fn test_skipped_levels_nest_under_nearest() {
        let root = build("## A\n#### B\n### C\n# D\n");
        assert_eq!(shape(&root.children), "A(B C) D");
    }

    #[test]
    fn test_depth_above_six() {
        let blocks = vec![heading(6, "six"), heading(8, "eight"), heading(7, "seven")];
        let root = build_blocks(&blocks);
        assert_eq!(shape(&root.children), "six(eight seven)");
    }

    #[test]
    fn test_empty_heading_is_skipped() {
        let blocks = vec![
            MdNode::Heading {
                depth: 1,
                children: vec![],
            },
            heading(2, "kept"),
        ];
        let root = build_blocks(&blocks);
        assert_eq!(shape(&root.children), "kept");
    }

    #[test]
    fn test_paragraphs_belong_to_current_heading() {
        let root = build("# A\n\nfirst\n\nsecond\n\n# B\n");
        assert_eq!(shape(&root.children), "A(first second) B");
    }

    #[test]
    fn test_list_after_heading() {
        let root = build("# A\n\n- x\n- y\n");
        assert_eq!(shape(&root.children), "A(x y)");
    }

    #[test]
    fn test_list_attaches_to_preceding_paragraph() {
        let root = build("# A\n\nintro:\n\n- x\n- y\n");
        assert_eq!(shape(&root.children), "A(intro:(x y))");
    }

    #[test]
    fn test_top_level_list() {
        let root = build("- A\n  - B\n");
        assert_eq!(shape(&root.children), "A(B)");
    }

    #[test]
    fn test_heading_absorbs_image_paragraph() {
        let root = build("# Cat\n\n![photo](cat.png)\n\ntext\n");
        let cat = &root.children[0];
        assert_eq!(cat.data.image.as_deref(), Some("cat.png"));
        assert_eq!(cat.data.image_title.as_deref(), Some("photo"));
        assert_eq!(shape(&cat.children), "text");
    }

    #[test]
    fn test_heading_keeps_mixed_paragraph() {
        let root = build("# Cat\n\nsee ![photo](cat.png)\n");
        let cat = &root.children[0];
        assert!(cat.data.image.is_none());
        assert_eq!(cat.children[0].data.text, "see ");
        assert_eq!(cat.children[0].data.image.as_deref(), Some("cat.png"));
    }

    #[test]
    fn test_list_after_code_block_stays_in_frame() {
        let root = build("# A\n\nintro\n\n```\ncode\n```\n\n- x\n");
        assert_eq!(shape(&root.children), "A(intro x)");
    }

    #[test]
    fn test_code_blocks_are_ignored() {
        let root = build("# A\n\n```\ncode\n```\n\ntext\n");
        assert_eq!(shape(&root.children), "A(text)");
    }

    #[test]
    fn test_list_after_empty_heading_stays_in_frame() {
        let root = build("intro\n\n#\n\n- x\n");
        assert_eq!(shape(&root.children), "intro x");
    }

    #[test]
    fn test_list_after_empty_paragraph_attaches_to_last_node() {
        let blocks = vec![
            heading(1, "A"),
            MdNode::Paragraph {
                children: vec![MdNode::text("intro")],
            },
            MdNode::Paragraph { children: vec![] },
            MdNode::List {
                ordered: false,
                children: vec![MdNode::ListItem {
                    children: vec![MdNode::Paragraph {
                        children: vec![MdNode::text("x")],
                    }],
                }],
            },
        ];
        let root = build_blocks(&blocks);
        assert_eq!(shape(&root.children), "A(intro(x))");
    }

    #[test]
    fn test_list_after_absorbed_image_goes_into_heading() {
        let root = build("# A\n\n![pic](a.png)\n\n- x\n");
        assert_eq!(shape(&root.children), "A(x)");
        assert_eq!(root.children[0].data.image.as_deref(), Some("a.png"));
    }
}
