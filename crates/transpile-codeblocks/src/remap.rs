//! Mapping compiler diagnostics back onto the document
//!
//! Diagnostics are located relative to a virtual file. A diagnostic at line
//! `L` of a code block whose fence sits on document line `S` is reported at
//! document line `S + L`; its column, if any, is kept as is. The first diagnostic found
//! (files in set order, then diagnostics in reported order) fails the whole
//! document.

use crate::compiler::{CompiledFiles, Diagnostic};
use crate::virtual_files::VirtualFileSet;
use crate::error::{ErrorKind, TranspileError};
use crate::occurrence::CodeBlockOccurrence;
use crate::utils::digit_width;

/// Lines shown on each side of the offending line in an excerpt
pub const EXCERPT_RADIUS: usize = 5;

/// A diagnostic translated into document coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemappedDiagnostic {
    pub virtual_file: String,
    pub message: String,
    /// Document line and column, or `None` when the diagnostic had no line
    /// and is attributed to the code block as a whole
    pub location: Option<(usize, Option<usize>)>,
}

/// Translate one diagnostic of `virtual_file` into document coordinates
pub fn remap(
    diagnostic: &Diagnostic,
    virtual_file: &str,
    occurrence: &CodeBlockOccurrence,
) -> RemappedDiagnostic {
    RemappedDiagnostic {
        virtual_file: virtual_file.to_string(),
        message: diagnostic.message.clone(),
        location: diagnostic
            .location()
            .map(|(line, column)| (occurrence.start_line + line, column)),
    }
}

/// Render up to `2 * EXCERPT_RADIUS + 1` numbered lines of `code` around `line`
///
/// Line numbers are zero-padded to a common width and the requested line is
/// marked with `>`. Returns an empty string when `code` has no such line.
pub fn render_excerpt(code: &str, line: usize) -> String {
    let lines: Vec<&str> = code.lines().collect();
    if line == 0 || line > lines.len() {
        return String::new();
    }

    let first = line.saturating_sub(EXCERPT_RADIUS).max(1);
    let last = (line + EXCERPT_RADIUS).min(lines.len());
    let width = digit_width(last);

    let mut excerpt = String::new();
    for number in first..=last {
        let marker = if number == line { ">" } else { " " };
        excerpt.push_str(&format!(
            "{} {:0width$} | {}\n",
            marker,
            number,
            lines[number - 1],
            width = width
        ));
    }
    excerpt
}

/// Excerpt around `line`, from the emitted code or else from the source
///
/// Compilers emit nothing for files that fail to parse, so the source text of
/// the virtual file stands in. `None` when neither has that line.
fn excerpt_for(emitted: &str, source: Option<&str>, line: usize) -> Option<String> {
    let excerpt = render_excerpt(emitted, line);
    if !excerpt.is_empty() {
        return Some(excerpt);
    }

    source
        .map(|code| render_excerpt(code, line))
        .filter(|excerpt| !excerpt.is_empty())
}

/// Fail on the first diagnostic of `compiled`
///
/// Diagnostics with a line fail at the document-absolute line (and column when
/// known) plus an excerpt of the emitted code, falling back to the matching
/// file of `sources`. Diagnostics without a line fail at the code block's own
/// position and name the virtual file in the message.
pub fn check_diagnostics(
    compiled: &CompiledFiles,
    sources: &VirtualFileSet,
    occurrence: &CodeBlockOccurrence,
    document_path: &str,
) -> Result<(), TranspileError> {
    for (virtual_file, file) in compiled {
        let Some(diagnostic) = file.diagnostics.first() else {
            continue;
        };

        let remapped = remap(diagnostic, virtual_file, occurrence);
        let virtual_line = diagnostic.location().map(|(line, _)| line);
        let err = match (remapped.location, virtual_line) {
            (Some((line, column)), Some(virtual_line)) => {
                let err = TranspileError::new(
                    ErrorKind::Diagnostic,
                    format!(
                        "TypeScript error in line {} of {}:\n{}",
                        virtual_line, virtual_file, remapped.message
                    ),
                );
                let err = match column {
                    Some(column) => err.with_location(line, column),
                    None => err.with_line(line),
                };
                let source = sources.get(virtual_file).map(|source| source.code.as_str());
                match excerpt_for(&file.code, source, virtual_line) {
                    Some(excerpt) => err.with_context(excerpt),
                    None => err,
                }
            }
            _ => TranspileError::new(
                ErrorKind::Diagnostic,
                format!("TypeScript error in {}:\n{}", virtual_file, remapped.message),
            )
            .with_location(occurrence.start_line, occurrence.start_column),
        };

        tracing::debug!(
            document = document_path,
            virtual_file = virtual_file.as_str(),
            block_line = occurrence.start_line,
            virtual_line = virtual_line,
            line = err.line,
            column = err.column,
            has_excerpt = err.context.is_some(),
            "Code block failed to compile"
        );

        return Err(err
            .with_file(document_path)
            .with_virtual_file(virtual_file.clone()));
    }

    Ok(())
}
