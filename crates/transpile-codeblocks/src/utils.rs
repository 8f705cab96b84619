//! Internal utilities

/// Convert byte offset to (line, column) position in source code.
///
/// Lines and columns are 1-indexed to match standard editor conventions.
pub(crate) fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Width needed to print `n` in decimal
pub(crate) fn digit_width(n: usize) -> usize {
    n.max(1).ilog10() as usize + 1
}
