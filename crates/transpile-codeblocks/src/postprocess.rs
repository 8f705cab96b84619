//! Shaping the TypeScript and JavaScript tabs before reassembly
//!
//! Both stages can be overridden. An override receives the default processor
//! as its last argument, so it can wrap or filter the default behavior instead
//! of reimplementing it.

use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;

use crate::compiler::CompiledFiles;
use crate::virtual_files::{VirtualFile, VirtualFileSet};

static TS_DIRECTIVE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*// @ts-(ignore|expect-error)\b.*$").expect("directive pattern is valid")
});

/// Post-processing of the TypeScript source files
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use transpile_codeblocks::{TsPostProcessor, VirtualFileSet};
///
/// /// Runs the default, then drops `.d.ts` helpers from the output
/// struct HideDeclarations;
///
/// #[async_trait]
/// impl TsPostProcessor for HideDeclarations {
///     async fn process(
///         &self,
///         files: VirtualFileSet,
///         document_path: &str,
///         default: &dyn TsPostProcessor,
///     ) -> anyhow::Result<VirtualFileSet> {
///         let mut files = default.process(files, document_path, default).await?;
///         for (path, file) in files.iter_mut() {
///             file.skip |= path.ends_with(".d.ts");
///         }
///         Ok(files)
///     }
/// }
/// ```
#[async_trait]
pub trait TsPostProcessor: Send + Sync {
    async fn process(
        &self,
        files: VirtualFileSet,
        document_path: &str,
        default: &dyn TsPostProcessor,
    ) -> Result<VirtualFileSet>;
}

/// Post-processing of the compiled JavaScript files
#[async_trait]
pub trait JsPostProcessor: Send + Sync {
    async fn process(
        &self,
        compiled: CompiledFiles,
        document_path: &str,
        default: &dyn JsPostProcessor,
    ) -> Result<VirtualFileSet>;
}

/// Removes `// @ts-ignore` and `// @ts-expect-error` lines
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTsPostProcessor;

#[async_trait]
impl TsPostProcessor for DefaultTsPostProcessor {
    async fn process(
        &self,
        files: VirtualFileSet,
        _document_path: &str,
        _default: &dyn TsPostProcessor,
    ) -> Result<VirtualFileSet> {
        Ok(files
            .into_iter()
            .map(|(path, file)| {
                let code = strip_ts_directives(&file.code);
                (path, VirtualFile { code, ..file })
            })
            .collect())
    }
}

/// Turns compiled files into virtual files with JavaScript extensions
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultJsPostProcessor;

#[async_trait]
impl JsPostProcessor for DefaultJsPostProcessor {
    async fn process(
        &self,
        compiled: CompiledFiles,
        _document_path: &str,
        _default: &dyn JsPostProcessor,
    ) -> Result<VirtualFileSet> {
        Ok(compiled
            .into_iter()
            .map(|(path, file)| {
                (
                    js_path(&path),
                    VirtualFile {
                        code: file.code,
                        skip: file.skip,
                    },
                )
            })
            .collect())
    }
}

/// Rewrite a TypeScript file extension to its JavaScript counterpart
pub fn js_path(path: &str) -> String {
    const EXTENSIONS: &[(&str, &str)] = &[
        (".tsx", ".jsx"),
        (".mts", ".mjs"),
        (".cts", ".cjs"),
        (".ts", ".js"),
    ];

    for (ts, js) in EXTENSIONS {
        if let Some(stem) = path.strip_suffix(ts) {
            return format!("{}{}", stem, js);
        }
    }
    path.to_string()
}

fn strip_ts_directives(code: &str) -> String {
    code.split_inclusive('\n')
        .filter(|line| !TS_DIRECTIVE_LINE.is_match(line.trim_end_matches(['\n', '\r'])))
        .collect()
}
