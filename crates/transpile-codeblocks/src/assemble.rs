//! Reassembling virtual files into a single code block body
//!
//! This is the inverse of [`split_files`](crate::split::split_files): a lone
//! emitted file collapses to its bare code, several emitted files are joined
//! back together behind `// file:` markers.

use std::path::Path;

use path_clean::PathClean;

use crate::virtual_files::VirtualFileSet;

/// Separator between files in multi-file output (two blank lines)
const FILE_SEPARATOR: &str = "\n\n\n";

/// Reassemble `files` into the text shown for one tab
///
/// Skipped files are dropped first. When exactly one file remains its code is
/// returned verbatim; otherwise each file is printed as a marker line with its
/// path relative to `folder`, followed by its trimmed code.
pub fn assemble_files(files: &VirtualFileSet, folder: &str) -> String {
    let emitted: Vec<_> = files.iter().filter(|(_, file)| !file.skip).collect();

    if let [(_, only)] = emitted.as_slice() {
        return only.code.clone();
    }

    emitted
        .iter()
        .map(|(path, file)| {
            format!(
                "// file: {}\n{}",
                relative_path(path, folder),
                file.code.trim()
            )
        })
        .collect::<Vec<_>>()
        .join(FILE_SEPARATOR)
}

/// Express `path` relative to `folder`
///
/// Paths registered under `folder` keep their marker text as written, `..`
/// segments included. Anything else is compared in cleaned form.
pub fn relative_path(path: &str, folder: &str) -> String {
    if let Some(marker) = path
        .strip_prefix(folder)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        return marker.to_string();
    }

    let path = Path::new(path).clean();
    let folder = Path::new(folder).clean();

    match path.strip_prefix(&folder) {
        Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::split_files;
    use crate::virtual_files::VirtualFile;

    const FOLDER: &str = "docs/page.mdx/codeBlock_2";

    fn file_set(entries: &[(&str, &str, bool)]) -> VirtualFileSet {
        entries
            .iter()
            .map(|(name, code, skip)| {
                (
                    format!("{}/{}", FOLDER, name),
                    VirtualFile {
                        code: code.to_string(),
                        skip: *skip,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_single_file_is_verbatim() {
        let files = file_set(&[("index.ts", "\nconst a = 1\n\n", false)]);
        assert_eq!(assemble_files(&files, FOLDER), "\nconst a = 1\n\n");
    }

    #[test]
    fn test_single_emitted_file_among_skipped() {
        let files = file_set(&[
            ("types.ts", "export type A = 1", true),
            ("main.ts", "const a = 1\n", false),
        ]);
        assert_eq!(assemble_files(&files, FOLDER), "const a = 1\n");
    }

    #[test]
    fn test_multiple_files_get_markers() {
        let files = file_set(&[
            ("a.ts", "export const a = 1\n", false),
            ("hidden.ts", "secret", true),
            ("nested/b.ts", "\nimport { a } from '../a'\n", false),
        ]);

        let assembled = assemble_files(&files, FOLDER);
        assert_eq!(
            assembled,
            "// file: a.ts\nexport const a = 1\n\n\n// file: nested/b.ts\nimport { a } from '../a'"
        );
    }

    #[test]
    fn test_all_skipped_is_empty() {
        let files = file_set(&[("a.ts", "x", true), ("b.ts", "y", true)]);
        assert_eq!(assemble_files(&files, FOLDER), "");
    }

    #[test]
    fn test_resplit_reproduces_files() {
        let files = file_set(&[
            ("a.ts", "export const a = 1\n", false),
            ("b.tsx", "export const B = () => <div />\n", false),
        ]);

        let assembled = assemble_files(&files, FOLDER);
        let resplit = split_files(&assembled, FOLDER);

        assert_eq!(resplit.len(), files.len());
        for ((left_path, left), (right_path, right)) in files.iter().zip(resplit.iter()) {
            assert_eq!(left_path, right_path);
            assert_eq!(left.code.trim(), right.code.trim());
        }
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path(&format!("{}/x/y.ts", FOLDER), FOLDER), "x/y.ts");
        assert_eq!(relative_path("elsewhere/z.ts", FOLDER), "elsewhere/z.ts");
    }

    #[test]
    fn test_parent_marker_survives_reassembly() {
        let files = split_files(
            "// file: ../shared.ts\nexport const s = 1\n// file: main.ts\nimport { s } from '../shared'\n",
            FOLDER,
        );

        let assembled = assemble_files(&files, FOLDER);
        assert!(assembled.starts_with("// file: ../shared.ts\n"));
        assert!(!assembled.contains("docs/page.mdx"));
    }
}
