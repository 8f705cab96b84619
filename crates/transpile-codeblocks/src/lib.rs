//! # transpile-codeblocks
//!
//! Turns TypeScript code blocks of MDX documents into TypeScript/JavaScript
//! tab pairs, failing the document when a block does not compile.
//!
//! A code block may simulate a small project by declaring several files:
//!
//! ````markdown
//! ```ts title="usage.ts"
//! // file: store.ts noEmit
//! export const store = { count: 0 }
//! // file: usage.ts
//! import { store } from './store'
//! store.count += 1
//! ```
//! ````
//!
//! Every file is compiled together under a per-block virtual folder
//! (`<document>/codeBlock_<n>`). Compiler diagnostics are mapped back to the
//! line and column of the document, and files flagged `noEmit` are compiled
//! but left out of both tabs.
//!
//! ```no_run
//! use std::sync::Arc;
//! use transpile_codeblocks::{CompilerSettings, DocumentFile, TranspileOptions, Transpiler};
//!
//! # async fn example() -> Result<(), transpile_codeblocks::TranspileError> {
//! let settings = Arc::new(CompilerSettings::default());
//! let transpiler = Transpiler::new(TranspileOptions::with_settings(settings))?;
//!
//! let source = "# Usage\n\n```ts\nconst answer: number = 42\n```\n";
//! let (tree, report) = transpiler
//!     .transform_source(source, &DocumentFile::new("docs/usage.mdx"))
//!     .await?;
//! assert_eq!(report.transpiled, 1);
//! # let _ = tree;
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod compiler;
pub mod document;
pub mod error;
mod esm;
pub mod imports;
pub mod occurrence;
pub mod options;
pub mod postprocess;
pub mod remap;
pub mod replacement;
pub mod split;
pub mod transform;
mod utils;
pub mod virtual_files;

pub use assemble::assemble_files;
pub use compiler::{
    CompiledFile, CompiledFiles, Compiler, CompilerError, CompilerRegistry, CompilerSettings,
    Diagnostic, OxcCompiler,
};
pub use document::DocumentFile;
pub use error::{ErrorKind, TranspileError};
pub use imports::ImportPresence;
pub use occurrence::CodeBlockOccurrence;
pub use options::{PathRewriter, TranspileOptions};
pub use postprocess::{
    DefaultJsPostProcessor, DefaultTsPostProcessor, JsPostProcessor, TsPostProcessor,
};
pub use replacement::{ReplacementAssembler, ReplacementInput, TabsAssembler};
pub use split::split_files;
pub use transform::{TransformReport, Transpiler, parse_document};
pub use virtual_files::{VirtualFile, VirtualFileSet};
