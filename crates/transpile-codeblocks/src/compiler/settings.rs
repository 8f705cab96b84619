//! Compiler configuration

use serde::{Deserialize, Serialize};

/// Configuration for the built-in compiler adapter
///
/// The transformer shares one compiler per settings *instance*: two equal
/// settings values held in different `Arc`s get two compilers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerSettings {
    /// Keep JSX in the emitted JavaScript instead of lowering it
    pub preserve_jsx: bool,
    /// Only remove imports marked `type`, keep unused value imports
    pub only_remove_type_imports: bool,
    /// Run semantic checks (redeclarations, invalid syntax in context)
    pub check_semantics: bool,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            preserve_jsx: true,
            only_remove_type_imports: true,
            check_semantics: true,
        }
    }
}
