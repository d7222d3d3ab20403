//! Depth-first traversal of a comrak document tree.
//!
//! Delivers `(node, entering)` events in document order. Containers are
//! visited twice, entering and leaving; leaves are visited once.

use comrak::nodes::{AstNode, NodeValue};

/// What the visitor wants the walk to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// Continue with the next event.
    GoToNext,
    /// Stop the walk immediately.
    Terminate,
}

/// Node types that have no leaving event.
pub fn is_leaf(value: &NodeValue) -> bool {
    matches!(
        value,
        NodeValue::Text(_)
            | NodeValue::Code(_)
            | NodeValue::CodeBlock(_)
            | NodeValue::HtmlBlock(_)
            | NodeValue::HtmlInline(_)
            | NodeValue::SoftBreak
            | NodeValue::LineBreak
            | NodeValue::ThematicBreak
    )
}

enum Phase {
    Pre,
    Post,
}

/// Walk `root` depth-first, calling `visit` for every event.
///
/// Uses an explicit work stack, so arbitrarily deep nesting cannot overflow
/// the call stack. Returns [`WalkStatus::Terminate`] if the visitor stopped
/// the walk early.
pub fn walk<'a, F>(root: &'a AstNode<'a>, mut visit: F) -> WalkStatus
where
    F: FnMut(&'a AstNode<'a>, bool) -> WalkStatus,
{
    let mut stack = vec![(root, Phase::Pre)];

    while let Some((node, phase)) = stack.pop() {
        match phase {
            Phase::Pre => {
                if visit(node, true) == WalkStatus::Terminate {
                    return WalkStatus::Terminate;
                }
                if is_leaf(&node.data.borrow().value) {
                    continue;
                }
                stack.push((node, Phase::Post));
                for child in node.reverse_children() {
                    stack.push((child, Phase::Pre));
                }
            }
            Phase::Post => {
                if visit(node, false) == WalkStatus::Terminate {
                    return WalkStatus::Terminate;
                }
            }
        }
    }

    WalkStatus::GoToNext
}

#[cfg(test)]
mod tests {
    use super::*;
    use comrak::{Arena, Options, parse_document};

    fn events(markdown: &str) -> Vec<(&'static str, bool)> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &Options::default());
        let mut seen = Vec::new();
        walk(root, |node, entering| {
            seen.push((node.data.borrow().value.xml_node_name(), entering));
            WalkStatus::GoToNext
        });
        seen
    }

    #[test]
    fn test_containers_twice_leaves_once() {
        assert_eq!(
            events("*hi*"),
            vec![
                ("document", true),
                ("paragraph", true),
                ("emph", true),
                ("text", true),
                ("emph", false),
                ("paragraph", false),
                ("document", false),
            ]
        );
    }

    #[test]
    fn test_children_in_document_order() {
        let names: Vec<_> = events("a\n\n`b`\n\n---\n")
            .into_iter()
            .filter(|(_, entering)| *entering)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec!["document", "paragraph", "text", "paragraph", "code", "thematic_break"]
        );
    }

    #[test]
    fn test_terminate_stops_the_walk() {
        let arena = Arena::new();
        let root = parse_document(&arena, "one\n\ntwo\n", &Options::default());
        let mut visited = 0;
        let status = walk(root, |node, _| {
            visited += 1;
            if matches!(node.data.borrow().value, NodeValue::Text(_)) {
                WalkStatus::Terminate
            } else {
                WalkStatus::GoToNext
            }
        });
        assert_eq!(status, WalkStatus::Terminate);
        // document, paragraph, text
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_deeply_nested_quotes() {
        let markdown = ">".repeat(200) + " deep";
        let arena = Arena::new();
        let root = parse_document(&arena, &markdown, &Options::default());
        let mut depth = 0usize;
        let mut max_depth = 0usize;
        walk(root, |_, entering| {
            if entering {
                depth += 1;
                max_depth = max_depth.max(depth);
            } else {
                depth -= 1;
            }
            WalkStatus::GoToNext
        });
        assert!(max_depth > 100);
    }
}
