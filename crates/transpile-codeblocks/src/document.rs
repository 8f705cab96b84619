//! The document being transformed

use std::path::Path;

/// Path information of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub path: String,
}

impl DocumentFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Extension including the leading dot, e.g. `.mdx`
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.path)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
    }

    /// Whether the extension is one of `allowed` (each with leading dot)
    pub fn has_extension(&self, allowed: &[String]) -> bool {
        self.extension()
            .is_some_and(|ext| allowed.iter().any(|allowed| *allowed == ext))
    }
}
