//! Correlating a code node with its place in the document

use markdown::mdast::Code;

use crate::virtual_files::virtual_folder;

/// Tag that opts a code block out of compilation
pub const NO_TRANSPILE_TAG: &str = "no-transpile";

/// Languages treated as TypeScript
pub const TYPESCRIPT_LANGS: &[&str] = &["ts", "tsx", "typescript"];

/// One code node of a document, with the data needed to process it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockOccurrence {
    /// 1-based position among all code nodes of the document
    pub index: usize,
    /// Line of the opening fence in the document (1-based)
    pub start_line: usize,
    /// Column of the opening fence in the document (1-based)
    pub start_column: usize,
    /// Space-separated tokens of the fence metadata
    pub tags: Vec<String>,
    /// `<document-path>/codeBlock_<index>`
    pub virtual_folder: String,
}

impl CodeBlockOccurrence {
    pub fn new(code: &Code, index: usize, document_path: &str) -> Self {
        let (start_line, start_column) = code
            .position
            .as_ref()
            .map(|position| (position.start.line, position.start.column))
            .unwrap_or((1, 1));

        Self {
            index,
            start_line,
            start_column,
            tags: meta_tags(code.meta.as_deref()),
            virtual_folder: virtual_folder(document_path, index),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Split fence metadata into its tokens
pub fn meta_tags(meta: Option<&str>) -> Vec<String> {
    meta.map(|meta| meta.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Whether a code node should be compiled and expanded into tabs
pub fn is_transpilable(code: &Code) -> bool {
    let is_typescript = code
        .lang
        .as_deref()
        .is_some_and(|lang| TYPESCRIPT_LANGS.contains(&lang));

    is_typescript
        && !meta_tags(code.meta.as_deref())
            .iter()
            .any(|tag| tag == NO_TRANSPILE_TAG)
}
