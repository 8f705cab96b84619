//! Ensuring the tab components are imported exactly once

use std::sync::LazyLock;

use markdown::mdast::{MdxjsEsm, Node};
use regex::Regex;

static TABS_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTabs\b").expect("identifier pattern is valid"));
static TAB_ITEM_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTabItem\b").expect("identifier pattern is valid"));

/// Which tab components a document already imports
///
/// Only the identifier matters: `import { Tabs } from 'elsewhere'` counts as
/// much as the default import statement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportPresence {
    pub has_tabs_import: bool,
    pub has_tab_item_import: bool,
}

impl ImportPresence {
    /// Scan every ESM node of `tree`
    pub fn scan(tree: &Node) -> Self {
        let mut presence = Self::default();
        presence.visit(tree);
        presence
    }

    fn visit(&mut self, node: &Node) {
        if let Node::MdxjsEsm(esm) = node {
            self.has_tabs_import |= TABS_IDENT.is_match(&esm.value);
            self.has_tab_item_import |= TAB_ITEM_IDENT.is_match(&esm.value);
        }

        if let Some(children) = node.children() {
            for child in children {
                self.visit(child);
            }
        }
    }
}

/// Prepend missing imports to the top-level children of `tree`
///
/// Missing imports are inserted as `Tabs` first, then `TabItem`, ahead of any
/// other content. Returns how many imports were added.
pub fn inject_imports(
    tree: &mut Node,
    presence: ImportPresence,
    tabs_import: &str,
    tab_item_import: &str,
) -> usize {
    let mut missing = Vec::new();
    if !presence.has_tabs_import {
        missing.push(esm_node(tabs_import));
    }
    if !presence.has_tab_item_import {
        missing.push(esm_node(tab_item_import));
    }

    let added = missing.len();
    if added == 0 {
        return 0;
    }

    match tree.children_mut() {
        Some(children) => {
            children.splice(0..0, missing);
            added
        }
        None => 0,
    }
}

fn esm_node(statement: &str) -> Node {
    Node::MdxjsEsm(MdxjsEsm {
        value: statement.to_string(),
        position: None,
        stops: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::mdast::{Paragraph, Root, Text};

    const TABS: &str = "import Tabs from '@theme/Tabs'";
    const TAB_ITEM: &str = "import TabItem from '@theme/TabItem'";

    fn root(children: Vec<Node>) -> Node {
        Node::Root(Root {
            children,
            position: None,
        })
    }

    fn paragraph(text: &str) -> Node {
        Node::Paragraph(Paragraph {
            children: vec![Node::Text(Text {
                value: text.into(),
                position: None,
            })],
            position: None,
        })
    }

    fn esm_values(tree: &Node) -> Vec<String> {
        tree.children()
            .unwrap()
            .iter()
            .filter_map(|node| match node {
                Node::MdxjsEsm(esm) => Some(esm.value.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_injects_both_in_fixed_order() {
        let mut tree = root(vec![paragraph("Hello")]);
        let presence = ImportPresence::scan(&tree);

        assert_eq!(inject_imports(&mut tree, presence, TABS, TAB_ITEM), 2);
        assert_eq!(esm_values(&tree), vec![TABS, TAB_ITEM]);
        assert!(matches!(tree.children().unwrap()[2], Node::Paragraph(_)));
    }

    #[test]
    fn test_existing_tabs_import_is_kept() {
        let mut tree = root(vec![esm_node("import Tabs from '@theme/Tabs'"), paragraph("x")]);
        let presence = ImportPresence::scan(&tree);
        assert!(presence.has_tabs_import);
        assert!(!presence.has_tab_item_import);

        inject_imports(&mut tree, presence, TABS, TAB_ITEM);
        assert_eq!(esm_values(&tree), vec![TAB_ITEM, TABS]);
    }

    #[test]
    fn test_identifier_match_ignores_source() {
        let tree = root(vec![esm_node("import { Tabs, TabItem } from './my-tabs'")]);
        let presence = ImportPresence::scan(&tree);
        assert!(presence.has_tabs_import);
        assert!(presence.has_tab_item_import);
    }

    #[test]
    fn test_tab_item_does_not_count_as_tabs() {
        let tree = root(vec![esm_node(TAB_ITEM)]);
        let presence = ImportPresence::scan(&tree);
        assert!(!presence.has_tabs_import);
        assert!(presence.has_tab_item_import);
    }

    #[test]
    fn test_injection_is_idempotent() {
        let mut tree = root(vec![paragraph("x")]);
        for _ in 0..3 {
            let presence = ImportPresence::scan(&tree);
            inject_imports(&mut tree, presence, TABS, TAB_ITEM);
        }
        assert_eq!(esm_values(&tree).len(), 2);
    }
}
