//! Errors reported for a document
//!
//! Every failure aborts the whole document. The error carries enough context
//! (document path, virtual file, document-absolute location and an excerpt of
//! the compiled code) to be reported like a native documentation error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::compiler::CompilerError;

/// What stage of processing failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// The compiler reported a diagnostic for a code block
    Diagnostic,
    /// The document source could not be parsed
    Parse,
    /// The compiler adapter itself failed
    Compiler,
    /// A post-processing hook failed
    PostProcess,
    /// Building the replacement nodes failed
    Assembly,
    /// The transformer was configured incorrectly
    Configuration,
}

/// Document processing error with source context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranspileError {
    pub kind: ErrorKind,
    /// The error message
    pub message: String,
    /// Document path
    pub file: Option<String>,
    /// Folder-qualified virtual file the diagnostic was reported against
    pub virtual_file: Option<String>,
    /// Line number in the document (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Excerpt of the code surrounding the error
    pub context: Option<String>,
    /// Helpful suggestion to fix the error
    pub suggestion: Option<String>,
}

impl TranspileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
            virtual_file: None,
            line: None,
            column: None,
            context: None,
            suggestion: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_virtual_file(mut self, virtual_file: impl Into<String>) -> Self {
        self.virtual_file = Some(virtual_file.into());
        self
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Location with a line only; clears any column
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self.column = None;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn parse_error(message: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::Parse,
            format!("Failed to parse document: {}", message),
        )
        .with_suggestion("Check the MDX syntax of the document around the reported position.")
    }

    pub fn post_process(stage: &str, err: anyhow::Error) -> Self {
        Self::new(
            ErrorKind::PostProcess,
            format!("{} post-processing failed: {:#}", stage, err),
        )
    }

    pub fn assembly(err: anyhow::Error) -> Self {
        Self::new(
            ErrorKind::Assembly,
            format!("Failed to assemble replacement nodes: {:#}", err),
        )
    }

    /// True when the error was caused by a compiler diagnostic
    pub fn is_diagnostic(&self) -> bool {
        self.kind == ErrorKind::Diagnostic
    }
}

impl fmt::Display for TranspileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref file) = self.file {
            write!(f, "\n  in {}", file)?;
        }

        if let Some(ref virtual_file) = self.virtual_file {
            write!(f, "\n  virtual file {}", virtual_file)?;
        }

        match (self.line, self.column) {
            (Some(line), Some(col)) => write!(f, "\n  at line {}, column {}", line, col)?,
            (Some(line), None) => write!(f, "\n  at line {}", line)?,
            _ => {}
        }

        if let Some(ref context) = self.context {
            write!(f, "\n\n{}", context)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\nSuggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

impl std::error::Error for TranspileError {}

impl From<CompilerError> for TranspileError {
    fn from(err: CompilerError) -> Self {
        let kind = match err {
            CompilerError::MissingSettings => ErrorKind::Configuration,
            _ => ErrorKind::Compiler,
        };
        Self::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranspileError::new(ErrorKind::Diagnostic, "Type 'string' is not assignable")
            .with_file("docs/intro.mdx")
            .with_virtual_file("docs/intro.mdx/codeBlock_2/index.ts")
            .with_location(14, 7)
            .with_context("03  let a: number = ''");

        let display = err.to_string();
        assert!(display.starts_with("Type 'string' is not assignable"));
        assert!(display.contains("in docs/intro.mdx"));
        assert!(display.contains("virtual file docs/intro.mdx/codeBlock_2/index.ts"));
        assert!(display.contains("at line 14, column 7"));
        assert!(display.contains("03  let a: number = ''"));
    }

    #[test]
    fn test_missing_settings_is_configuration() {
        let err: TranspileError = CompilerError::MissingSettings.into();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_post_process_wraps_anyhow() {
        let err = TranspileError::post_process("TypeScript", anyhow::anyhow!("boom"));
        assert_eq!(err.kind, ErrorKind::PostProcess);
        assert!(err.message.contains("boom"));
    }
}
