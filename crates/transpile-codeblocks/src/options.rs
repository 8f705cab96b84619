//! Transformer configuration

use std::sync::Arc;

use bon::Builder;

use crate::compiler::{Compiler, CompilerSettings};
use crate::postprocess::{JsPostProcessor, TsPostProcessor};
use crate::replacement::ReplacementAssembler;

/// Import statement injected for the tab container component
pub const DEFAULT_TABS_IMPORT: &str = "import Tabs from '@theme/Tabs'";
/// Import statement injected for the tab item component
pub const DEFAULT_TAB_ITEM_IMPORT: &str = "import TabItem from '@theme/TabItem'";

/// Remaps a document path before virtual folder names are built from it
pub type PathRewriter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Options for [`Transpiler`](crate::Transpiler)
///
/// Either `compiler_settings` or `compiler` must be set. Settings select a
/// shared compiler by identity: keep one `Arc` around and pass clones of it to
/// reuse the same compiler across documents.
#[derive(Builder)]
pub struct TranspileOptions {
    /// Settings for the built-in compiler
    pub compiler_settings: Option<Arc<CompilerSettings>>,

    /// Explicit compiler service, takes precedence over `compiler_settings`
    pub compiler: Option<Arc<dyn Compiler>>,

    /// Rewrites the document path used in virtual folder names
    pub rewrite_path: Option<PathRewriter>,

    /// Replaces the default TypeScript tab shaping
    pub post_process_ts: Option<Arc<dyn TsPostProcessor>>,

    /// Replaces the default JavaScript tab shaping
    pub post_process_js: Option<Arc<dyn JsPostProcessor>>,

    /// Replaces the five-node tab structure
    pub assemble_replacement_nodes: Option<Arc<dyn ReplacementAssembler>>,

    /// Document extensions (with leading dot) that are processed
    #[builder(default = vec![".mdx".to_string()])]
    pub file_extensions: Vec<String>,

    #[builder(default = DEFAULT_TABS_IMPORT.to_string(), into)]
    pub tabs_import: String,

    #[builder(default = DEFAULT_TAB_ITEM_IMPORT.to_string(), into)]
    pub tab_item_import: String,
}

impl std::fmt::Debug for TranspileOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspileOptions")
            .field("compiler_settings", &self.compiler_settings)
            .field("has_compiler", &self.compiler.is_some())
            .field("has_rewrite_path", &self.rewrite_path.is_some())
            .field("has_post_process_ts", &self.post_process_ts.is_some())
            .field("has_post_process_js", &self.post_process_js.is_some())
            .field(
                "has_assemble_replacement_nodes",
                &self.assemble_replacement_nodes.is_some(),
            )
            .field("file_extensions", &self.file_extensions)
            .field("tabs_import", &self.tabs_import)
            .field("tab_item_import", &self.tab_item_import)
            .finish()
    }
}

impl TranspileOptions {
    /// Options using the built-in compiler with the given settings
    pub fn with_settings(settings: Arc<CompilerSettings>) -> Self {
        Self::builder().compiler_settings(settings).build()
    }
}
