//! In-memory files synthesized from a single code block
//!
//! A code block may declare several files with `// file:` markers. Each one
//! becomes a [`VirtualFile`] keyed by its folder-qualified path inside a
//! [`VirtualFileSet`]. Insertion order is the order the markers appeared in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name given to text that precedes the first file marker
pub const DEFAULT_FILE_NAME: &str = "index.ts";

/// One named file extracted from a code block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualFile {
    /// Raw source text (may be empty)
    pub code: String,
    /// Excluded from the reassembled output, still compiled
    pub skip: bool,
}

impl VirtualFile {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            skip: false,
        }
    }

    pub fn skipped(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            skip: true,
        }
    }
}

/// Ordered mapping of folder-qualified path to [`VirtualFile`]
pub type VirtualFileSet = IndexMap<String, VirtualFile>;

/// Build the virtual folder for the `index`-th code block of a document
///
/// `index` is 1-based and counts every code block, eligible or not.
pub fn virtual_folder(document_path: &str, index: usize) -> String {
    format!("{}/codeBlock_{}", document_path.trim_end_matches('/'), index)
}

/// Number of files that survive into reassembled output
pub fn emitted_count(files: &VirtualFileSet) -> usize {
    files.values().filter(|file| !file.skip).count()
}
