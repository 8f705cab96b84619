//! The contract between the document transformer and a compiler service

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CompilerError;
use crate::virtual_files::VirtualFileSet;

/// A compiler-produced message, optionally located inside one virtual file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    /// 1-based line within the virtual file
    pub line: Option<usize>,
    /// 1-based column within the virtual file
    pub column: Option<usize>,
}

impl Diagnostic {
    /// Diagnostic that is not attributable to a position
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Line and optional column, when the line is known
    pub fn location(&self) -> Option<(usize, Option<usize>)> {
        match self.line {
            Some(line) if line > 0 => Some((line, self.column)),
            _ => None,
        }
    }
}

/// Compilation result for one virtual file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledFile {
    /// Emitted JavaScript
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Mirrors the `skip` flag of the source virtual file
    pub skip: bool,
}

impl CompiledFile {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// Compiled output keyed by the same paths as the input [`VirtualFileSet`]
pub type CompiledFiles = IndexMap<String, CompiledFile>;

/// A compiler service for virtual file sets
///
/// Implementations must compile the whole set as one program so imports
/// between virtual files resolve against each other, and must be pure with
/// respect to their input: the same files under the same configuration
/// produce the same diagnostics. Files flagged `skip` are still compiled.
///
/// The returned map should keep the input order; the transformer reports
/// diagnostics in the order files appear in it.
#[async_trait]
pub trait Compiler: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str {
        "compiler"
    }

    async fn compile(&self, files: &VirtualFileSet) -> Result<CompiledFiles, CompilerError>;
}
