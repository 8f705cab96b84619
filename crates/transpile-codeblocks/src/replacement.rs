//! Building the nodes that replace a compiled code block

use std::sync::LazyLock;

use anyhow::Result;
use markdown::mdast::{Code, Html, Node};
use regex::Regex;

use crate::assemble::assemble_files;
use crate::virtual_files::VirtualFileSet;

static TS_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(title=["'][^"']*)\.t(sx?)(["'])"#).expect("title pattern is valid")
});

const TABS_OPEN: &str = "<Tabs groupId=\"language\" defaultValue=\"ts\" values={[{ label: 'TypeScript', value: 'ts' }, { label: 'JavaScript', value: 'js' }]}>\n<TabItem value=\"ts\">";
const TABS_SEPARATOR: &str = "</TabItem>\n<TabItem value=\"js\">";
const TABS_CLOSE: &str = "</TabItem>\n</Tabs>";

/// Everything known about a code block once both tabs are post-processed
#[derive(Debug)]
pub struct ReplacementInput<'a> {
    /// The original code node
    pub node: &'a Code,
    pub document_path: &'a str,
    pub virtual_folder: &'a str,
    /// Post-processed TypeScript files
    pub ts_files: VirtualFileSet,
    /// Post-processed JavaScript files
    pub js_files: VirtualFileSet,
}

/// Produces the nodes a compiled code block is replaced with
pub trait ReplacementAssembler: Send + Sync {
    fn assemble(&self, input: ReplacementInput<'_>) -> Result<Vec<Node>>;
}

/// Emits a TypeScript/JavaScript tab pair
///
/// The result is always five nodes: tab container opening, the TypeScript
/// code node, the tab separator, the JavaScript code node and the closing
/// markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct TabsAssembler;

impl ReplacementAssembler for TabsAssembler {
    fn assemble(&self, input: ReplacementInput<'_>) -> Result<Vec<Node>> {
        let ts_code = Code {
            value: assemble_files(&input.ts_files, input.virtual_folder),
            ..input.node.clone()
        };

        let js_code = Code {
            value: assemble_files(&input.js_files, input.virtual_folder),
            lang: input.node.lang.as_deref().map(js_lang),
            meta: input.node.meta.as_deref().map(js_meta),
            position: input.node.position.clone(),
        };

        Ok(vec![
            markup(TABS_OPEN),
            Node::Code(ts_code),
            markup(TABS_SEPARATOR),
            Node::Code(js_code),
            markup(TABS_CLOSE),
        ])
    }
}

fn markup(value: &str) -> Node {
    Node::Html(Html {
        value: value.to_string(),
        position: None,
    })
}

/// JavaScript counterpart of a TypeScript fence language
pub fn js_lang(lang: &str) -> String {
    match lang {
        "tsx" => "jsx".to_string(),
        "ts" | "typescript" => "js".to_string(),
        other => other.to_string(),
    }
}

/// Rewrite a `title="file.ts"` / `title="file.tsx"` in fence metadata
pub fn js_meta(meta: &str) -> String {
    TS_TITLE.replace_all(meta, "${1}.j${2}${3}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_files::VirtualFile;

    const FOLDER: &str = "doc.mdx/codeBlock_1";

    fn files(name: &str, code: &str) -> VirtualFileSet {
        let mut files = VirtualFileSet::new();
        files.insert(format!("{}/{}", FOLDER, name), VirtualFile::new(code));
        files
    }

    #[test]
    fn test_js_meta_rewrites_title() {
        assert_eq!(js_meta(r#"title="src/app.ts""#), r#"title="src/app.js""#);
        assert_eq!(js_meta("title='App.tsx' {1,3}"), "title='App.jsx' {1,3}");
        assert_eq!(js_meta("showLineNumbers"), "showLineNumbers");
        assert_eq!(js_meta(r#"title="notes.txt""#), r#"title="notes.txt""#);
    }

    #[test]
    fn test_js_lang() {
        assert_eq!(js_lang("ts"), "js");
        assert_eq!(js_lang("typescript"), "js");
        assert_eq!(js_lang("tsx"), "jsx");
    }

    #[test]
    fn test_tabs_assembler_emits_five_nodes() {
        let node = Code {
            value: "const a: number = 1".into(),
            position: None,
            lang: Some("ts".into()),
            meta: Some(r#"title="a.ts""#.into()),
        };

        let nodes = TabsAssembler
            .assemble(ReplacementInput {
                node: &node,
                document_path: "doc.mdx",
                virtual_folder: FOLDER,
                ts_files: files("index.ts", "const a: number = 1"),
                js_files: files("index.js", "const a = 1;\n"),
            })
            .unwrap();

        assert_eq!(nodes.len(), 5);
        assert!(matches!(&nodes[0], Node::Html(html) if html.value.starts_with("<Tabs")));
        let Node::Code(ts) = &nodes[1] else {
            panic!("expected TypeScript code node");
        };
        assert_eq!(ts.lang.as_deref(), Some("ts"));
        assert_eq!(ts.meta.as_deref(), Some(r#"title="a.ts""#));
        assert_eq!(ts.value, "const a: number = 1");

        let Node::Code(js) = &nodes[3] else {
            panic!("expected JavaScript code node");
        };
        assert_eq!(js.lang.as_deref(), Some("js"));
        assert_eq!(js.meta.as_deref(), Some(r#"title="a.js""#));
        assert_eq!(js.value, "const a = 1;\n");
        assert!(matches!(&nodes[4], Node::Html(html) if html.value.ends_with("</Tabs>")));
    }
}
