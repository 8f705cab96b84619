//! Built-in compiler adapter backed by OXC
//!
//! Each virtual file is parsed, checked and stripped of its TypeScript syntax.
//! OXC works file by file and does not type check, so diagnostics cover
//! syntax and semantic errors only; imports between virtual files are left
//! untouched in the output.

use std::path::Path;

use async_trait::async_trait;
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::{Parser, ParserReturn};
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::{CompiledFile, CompiledFiles, Compiler, CompilerError, CompilerSettings, Diagnostic};
use crate::utils::offset_to_line_col;
use crate::virtual_files::{VirtualFile, VirtualFileSet};

/// Compiler adapter using the OXC parser, semantic checker and transformer
///
/// Results are cached per virtual path and source text, so rebuilding an
/// unchanged document does not recompile its code blocks.
pub struct OxcCompiler {
    settings: CompilerSettings,
    cache: Mutex<FxHashMap<String, (String, CompiledFile)>>,
}

impl OxcCompiler {
    pub fn new(settings: CompilerSettings) -> Self {
        Self {
            settings,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    fn transform_options(&self) -> TransformOptions {
        let mut options = TransformOptions::default();
        options.typescript.only_remove_type_imports = self.settings.only_remove_type_imports;
        if self.settings.preserve_jsx {
            options.jsx.jsx_plugin = false;
            options.jsx.display_name_plugin = false;
        }
        options
    }

    fn cached(&self, path: &str, code: &str) -> Option<CompiledFile> {
        let cache = self.cache.lock();
        let (source, compiled) = cache.get(path)?;
        (source == code).then(|| compiled.clone())
    }

    /// Compile one file in isolation
    fn compile_file(&self, path: &str, file: &VirtualFile) -> Result<CompiledFile, CompilerError> {
        let source_type = SourceType::from_path(path).map_err(|_| CompilerError::InvalidSourceType {
            path: path.to_string(),
        })?;
        let source = file.code.as_str();
        let allocator = Allocator::default();

        let ParserReturn {
            program,
            errors,
            panicked,
            ..
        } = Parser::new(&allocator, source, source_type).parse();

        if panicked || !errors.is_empty() {
            let diagnostics = errors
                .iter()
                .map(|error| to_diagnostic(source, error))
                .collect();
            return Ok(CompiledFile {
                code: String::new(),
                diagnostics,
                skip: file.skip,
            });
        }

        let mut program = program;
        let semantic_ret = SemanticBuilder::new()
            .with_check_syntax_error(self.settings.check_semantics)
            .build(&program);

        let mut diagnostics: Vec<Diagnostic> = semantic_ret
            .errors
            .iter()
            .map(|error| to_diagnostic(source, error))
            .collect();

        let scoping = semantic_ret.semantic.into_scoping();
        let options = self.transform_options();
        let transform_ret = Transformer::new(&allocator, Path::new(path), &options)
            .build_with_scoping(scoping, &mut program);

        diagnostics.extend(
            transform_ret
                .errors
                .iter()
                .map(|error| to_diagnostic(source, error)),
        );

        let code = Codegen::new().build(&program).code;

        Ok(CompiledFile {
            code,
            diagnostics,
            skip: file.skip,
        })
    }
}

#[async_trait]
impl Compiler for OxcCompiler {
    fn name(&self) -> &str {
        "oxc"
    }

    async fn compile(&self, files: &VirtualFileSet) -> Result<CompiledFiles, CompilerError> {
        let mut compiled = CompiledFiles::with_capacity(files.len());

        for (path, file) in files {
            if let Some(hit) = self.cached(path, &file.code) {
                tracing::trace!(path = path.as_str(), "Compile cache hit");
                compiled.insert(path.clone(), CompiledFile { skip: file.skip, ..hit });
                continue;
            }

            let result = self.compile_file(path, file)?;
            self.cache
                .lock()
                .insert(path.clone(), (file.code.clone(), result.clone()));
            compiled.insert(path.clone(), result);
        }

        Ok(compiled)
    }
}

/// Convert an OXC diagnostic into a located [`Diagnostic`]
fn to_diagnostic(source: &str, error: &oxc_diagnostics::OxcDiagnostic) -> Diagnostic {
    let message = error.message.to_string();

    let offset = error
        .labels
        .as_ref()
        .and_then(|labels| labels.first())
        .map(|label| label.offset());

    match offset {
        Some(offset) => {
            let (line, column) = offset_to_line_col(source, offset);
            Diagnostic::at(message, line, column)
        }
        None => Diagnostic::new(message),
    }
}
