//! Splitting a code block into virtual files
//!
//! Markers are whole lines of the form `// file: <path> [<flag> ...]`. The
//! scan is line-oriented and purely textual, so a string literal that happens
//! to hold a marker-shaped line is treated as a marker too. Lines that look
//! like markers but carry an unparseable path are ordinary code and stay in
//! the preceding file.

use std::sync::LazyLock;

use regex::Regex;

use crate::virtual_files::{DEFAULT_FILE_NAME, VirtualFile, VirtualFileSet};

/// Flag that excludes a file from the reassembled output
pub const NO_EMIT_FLAG: &str = "noEmit";

static FILE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^// file: ([\w\-./\[\]]+)(?: (.*?))?\s*$").expect("file marker pattern is valid")
});

/// A parsed `// file:` marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMarker {
    pub path: String,
    pub flags: Vec<String>,
}

impl FileMarker {
    pub fn is_no_emit(&self) -> bool {
        self.flags.iter().any(|flag| flag == NO_EMIT_FLAG)
    }
}

/// Parse a single line (without its line terminator) as a file marker
pub fn parse_marker(line: &str) -> Option<FileMarker> {
    let captures = FILE_MARKER.captures(line)?;
    let path = captures.get(1)?.as_str().to_string();
    let flags = captures
        .get(2)
        .map(|m| m.as_str().split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    Some(FileMarker { path, flags })
}

/// Split raw code block text into virtual files under `folder`
///
/// Text before the first marker becomes `index.ts` unless it is blank. A block
/// without markers always yields exactly one `index.ts` holding the whole text.
/// A path declared twice keeps its first position and accumulates the text of
/// both regions.
pub fn split_files(raw: &str, folder: &str) -> VirtualFileSet {
    let mut regions: Vec<(Option<FileMarker>, &str)> = Vec::new();
    let mut region_start = 0;
    let mut current: Option<FileMarker> = None;
    let mut offset = 0;

    for line in raw.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if let Some(marker) = parse_marker(content) {
            regions.push((current.take(), &raw[region_start..offset]));
            current = Some(marker);
            region_start = offset + line.len();
        }
        offset += line.len();
    }
    regions.push((current, &raw[region_start..]));

    let has_markers = regions.len() > 1;
    let mut files = VirtualFileSet::new();

    for (marker, code) in regions {
        let (name, skip) = match &marker {
            Some(marker) => (marker.path.as_str(), marker.is_no_emit()),
            None if has_markers && code.trim().is_empty() => continue,
            None => (DEFAULT_FILE_NAME, false),
        };

        let key = format!("{}/{}", folder, name);
        match files.get_mut(&key) {
            Some(existing) => {
                existing.code.push_str(code);
                existing.skip |= skip;
            }
            None => {
                files.insert(
                    key,
                    VirtualFile {
                        code: code.to_string(),
                        skip,
                    },
                );
            }
        }
    }

    files
}
