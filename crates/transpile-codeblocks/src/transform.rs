//! The document transformer
//!
//! Per document: scan imports, inject the missing ones, collect eligible code
//! blocks in document order, compile and shape each of them, then splice the
//! replacement nodes into the tree. Any failure aborts the document.

use std::collections::VecDeque;
use std::sync::Arc;

use markdown::mdast::{Code, Node};

use crate::compiler::{Compiler, CompilerError, CompilerRegistry};
use crate::document::DocumentFile;
use crate::error::TranspileError;
use crate::imports::{ImportPresence, inject_imports};
use crate::occurrence::{CodeBlockOccurrence, is_transpilable};
use crate::options::{PathRewriter, TranspileOptions};
use crate::postprocess::{
    DefaultJsPostProcessor, DefaultTsPostProcessor, JsPostProcessor, TsPostProcessor,
};
use crate::remap::check_diagnostics;
use crate::replacement::{ReplacementAssembler, ReplacementInput, TabsAssembler};
use crate::split::split_files;

/// Outcome of transforming one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// The document extension is not in the allow-list; nothing was touched
    pub skipped: bool,
    pub imports_added: usize,
    /// Every code node seen, whatever its language
    pub code_blocks: usize,
    /// Code nodes replaced by tabs
    pub transpiled: usize,
}

/// Turns TypeScript code blocks of a document into TypeScript/JavaScript tabs
pub struct Transpiler {
    compiler: Arc<dyn Compiler>,
    rewrite_path: Option<PathRewriter>,
    post_process_ts: Arc<dyn TsPostProcessor>,
    post_process_js: Arc<dyn JsPostProcessor>,
    assembler: Arc<dyn ReplacementAssembler>,
    file_extensions: Vec<String>,
    tabs_import: String,
    tab_item_import: String,
}

impl std::fmt::Debug for Transpiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transpiler")
            .field("compiler", &self.compiler.name())
            .field("file_extensions", &self.file_extensions)
            .finish_non_exhaustive()
    }
}

impl Transpiler {
    /// Create a transpiler, sharing compilers through the global registry
    pub fn new(options: TranspileOptions) -> Result<Self, TranspileError> {
        Self::with_registry(options, CompilerRegistry::global())
    }

    /// Create a transpiler that looks up its compiler in `registry`
    pub fn with_registry(
        options: TranspileOptions,
        registry: &CompilerRegistry,
    ) -> Result<Self, TranspileError> {
        let compiler = match (options.compiler, &options.compiler_settings) {
            (Some(compiler), _) => compiler,
            (None, Some(settings)) => registry.get_or_create(settings),
            (None, None) => return Err(CompilerError::MissingSettings.into()),
        };

        Ok(Self {
            compiler,
            rewrite_path: options.rewrite_path,
            post_process_ts: options
                .post_process_ts
                .unwrap_or_else(|| Arc::new(DefaultTsPostProcessor)),
            post_process_js: options
                .post_process_js
                .unwrap_or_else(|| Arc::new(DefaultJsPostProcessor)),
            assembler: options
                .assemble_replacement_nodes
                .unwrap_or_else(|| Arc::new(TabsAssembler)),
            file_extensions: options.file_extensions,
            tabs_import: options.tabs_import,
            tab_item_import: options.tab_item_import,
        })
    }

    /// Whether documents at this path are processed at all
    pub fn accepts(&self, file: &DocumentFile) -> bool {
        file.has_extension(&self.file_extensions)
    }

    /// Transform `tree` in place
    ///
    /// On error the tree may already carry injected imports but no code block
    /// has been replaced; callers are expected to discard it.
    pub async fn transform(
        &self,
        tree: &mut Node,
        file: &DocumentFile,
    ) -> Result<TransformReport, TranspileError> {
        if !self.accepts(file) {
            tracing::debug!(path = file.path.as_str(), "Skipping document: extension not enabled");
            return Ok(TransformReport {
                skipped: true,
                ..TransformReport::default()
            });
        }

        let document_path = match &self.rewrite_path {
            Some(rewrite) => rewrite(file.path.as_str()),
            None => file.path.clone(),
        };

        let presence = ImportPresence::scan(tree);
        let imports_added = inject_imports(tree, presence, &self.tabs_import, &self.tab_item_import);
        if imports_added > 0 {
            tracing::debug!(
                path = document_path.as_str(),
                count = imports_added,
                "Injected tab component imports"
            );
        }

        let mut pending = Vec::new();
        let code_blocks = collect_code_blocks(tree, &document_path, &mut pending);

        let mut replacements = VecDeque::with_capacity(pending.len());
        for (code, occurrence) in &pending {
            replacements.push_back(self.process_block(code, occurrence, &document_path).await?);
        }

        let transpiled = replacements.len();
        splice_replacements(tree, &mut replacements);

        Ok(TransformReport {
            skipped: false,
            imports_added,
            code_blocks,
            transpiled,
        })
    }

    /// Parse MDX `source` and transform the resulting tree
    pub async fn transform_source(
        &self,
        source: &str,
        file: &DocumentFile,
    ) -> Result<(Node, TransformReport), TranspileError> {
        let mut tree = parse_document(source).map_err(|err| err.with_file(file.path.clone()))?;
        let report = self.transform(&mut tree, file).await?;
        Ok((tree, report))
    }

    /// Split, compile, check, post-process and assemble one code block
    async fn process_block(
        &self,
        code: &Code,
        occurrence: &CodeBlockOccurrence,
        document_path: &str,
    ) -> Result<Vec<Node>, TranspileError> {
        let files = split_files(&code.value, &occurrence.virtual_folder);
        tracing::debug!(
            folder = occurrence.virtual_folder.as_str(),
            files = files.len(),
            compiler = self.compiler.name(),
            "Compiling code block"
        );

        let mut compiled = self.compiler.compile(&files).await.map_err(|err| {
            TranspileError::from(err)
                .with_file(document_path)
                .with_location(occurrence.start_line, occurrence.start_column)
        })?;

        for (path, output) in compiled.iter_mut() {
            if let Some(source) = files.get(path) {
                output.skip = source.skip;
            }
        }

        check_diagnostics(&compiled, &files, occurrence, document_path)?;

        let ts_files = self
            .post_process_ts
            .process(files, document_path, &DefaultTsPostProcessor)
            .await
            .map_err(|err| TranspileError::post_process("TypeScript", err).with_file(document_path))?;

        let js_files = self
            .post_process_js
            .process(compiled, document_path, &DefaultJsPostProcessor)
            .await
            .map_err(|err| TranspileError::post_process("JavaScript", err).with_file(document_path))?;

        self.assembler
            .assemble(ReplacementInput {
                node: code,
                document_path,
                virtual_folder: &occurrence.virtual_folder,
                ts_files,
                js_files,
            })
            .map_err(|err| {
                TranspileError::assembly(err)
                    .with_file(document_path)
                    .with_location(occurrence.start_line, occurrence.start_column)
            })
    }
}

/// Parse MDX source into a document tree
pub fn parse_document(source: &str) -> Result<Node, TranspileError> {
    let mut parse_options = markdown::ParseOptions::mdx();
    parse_options.mdx_esm_parse = Some(Box::new(crate::esm::validate_esm_syntax));
    parse_options.constructs.frontmatter = true;
    parse_options.constructs.gfm_strikethrough = true;
    parse_options.constructs.gfm_table = true;
    parse_options.constructs.gfm_task_list_item = true;
    parse_options.constructs.gfm_autolink_literal = true;
    parse_options.constructs.gfm_footnote_definition = true;

    markdown::to_mdast(source, &parse_options).map_err(TranspileError::parse_error)
}

/// Number every code node in document order and collect the eligible ones
///
/// Returns the total number of code nodes seen.
fn collect_code_blocks(
    tree: &Node,
    document_path: &str,
    pending: &mut Vec<(Code, CodeBlockOccurrence)>,
) -> usize {
    fn visit(
        node: &Node,
        document_path: &str,
        counter: &mut usize,
        pending: &mut Vec<(Code, CodeBlockOccurrence)>,
    ) {
        let Some(children) = node.children() else {
            return;
        };

        for child in children {
            if let Node::Code(code) = child {
                *counter += 1;
                if is_transpilable(code) {
                    let occurrence = CodeBlockOccurrence::new(code, *counter, document_path);
                    pending.push((code.clone(), occurrence));
                }
            }
            visit(child, document_path, counter, pending);
        }
    }

    let mut counter = 0;
    visit(tree, document_path, &mut counter, pending);
    counter
}

/// Replace eligible code nodes, in document order, with the queued node lists
fn splice_replacements(node: &mut Node, replacements: &mut VecDeque<Vec<Node>>) {
    let Some(children) = node.children_mut() else {
        return;
    };

    let mut spliced = Vec::with_capacity(children.len());
    for mut child in std::mem::take(children) {
        if let Node::Code(code) = &child {
            if is_transpilable(code) {
                if let Some(nodes) = replacements.pop_front() {
                    spliced.extend(nodes);
                    continue;
                }
            }
        }
        splice_replacements(&mut child, replacements);
        spliced.push(child);
    }
    *children = spliced;
}
