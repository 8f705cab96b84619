//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use markdown::mdast::{Code, Node};
use parking_lot::Mutex;
use transpile_codeblocks::{
    CompiledFile, CompiledFiles, Compiler, CompilerError, Diagnostic, VirtualFileSet,
};

/// Compiler that echoes sources and reports scripted diagnostics
///
/// Every call is recorded so tests can assert on what was compiled.
#[derive(Default)]
pub struct ScriptedCompiler {
    /// (virtual file suffix, diagnostic) pairs
    diagnostics: Vec<(String, Diagnostic)>,
    pub calls: Mutex<Vec<VirtualFileSet>>,
}

impl ScriptedCompiler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(suffix: &str, diagnostic: Diagnostic) -> Arc<Self> {
        Arc::new(Self {
            diagnostics: vec![(suffix.to_string(), diagnostic)],
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn folders(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|files| files.keys().next().cloned())
            .map(|path| match path.rsplit_once('/') {
                Some((folder, _)) => folder.to_string(),
                None => path.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl Compiler for ScriptedCompiler {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn compile(&self, files: &VirtualFileSet) -> Result<CompiledFiles, CompilerError> {
        self.calls.lock().push(files.clone());

        Ok(files
            .iter()
            .map(|(path, file)| {
                let mut compiled = CompiledFile::new(format!("/* js */ {}", file.code.trim()));
                for (suffix, diagnostic) in &self.diagnostics {
                    if path.ends_with(suffix.as_str()) {
                        compiled.diagnostics.push(diagnostic.clone());
                    }
                }
                (path.clone(), compiled)
            })
            .collect())
    }
}

/// All code nodes of a tree in document order
pub fn code_nodes(tree: &Node) -> Vec<Code> {
    let mut found = Vec::new();
    collect(tree, &mut found);
    found
}

fn collect(node: &Node, found: &mut Vec<Code>) {
    if let Node::Code(code) = node {
        found.push(code.clone());
    }
    if let Some(children) = node.children() {
        for child in children {
            collect(child, found);
        }
    }
}

/// Values of the top-level ESM nodes
pub fn esm_values(tree: &Node) -> Vec<String> {
    tree.children()
        .map(|children| {
            children
                .iter()
                .filter_map(|node| match node {
                    Node::MdxjsEsm(esm) => Some(esm.value.clone()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
