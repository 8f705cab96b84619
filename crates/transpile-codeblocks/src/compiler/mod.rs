//! Compiler adapters
//!
//! The transformer talks to a compiler service through the [`Compiler`]
//! trait. [`OxcCompiler`] is the built-in implementation; hosts can plug in
//! anything else (a TypeScript language service behind IPC, a remote build
//! worker) by implementing the trait.
//!
//! # Architecture
//!
//! - **[`Compiler`]**: compiles a whole virtual file set as one program
//! - **[`CompilerRegistry`]**: shares one compiler per settings instance
//! - **[`CompilerError`]**: adapter failures (not code diagnostics)

mod error;
mod oxc;
mod registry;
mod settings;
mod traits;

pub use error::CompilerError;
pub use oxc::OxcCompiler;
pub use registry::CompilerRegistry;
pub use settings::CompilerSettings;
pub use traits::{CompiledFile, CompiledFiles, Compiler, Diagnostic};
