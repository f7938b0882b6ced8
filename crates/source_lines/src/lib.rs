// crates/source_lines/src/lib.rs

/// Splits full file content into lines, each line retaining its own
/// terminator (the trailing `\n`, or `\r\n` for CRLF files). The final line
/// may carry no terminator. Joining the result back together reproduces the
/// input byte-for-byte.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .split_inclusive('\n')
        .map(|line| line.to_string())
        .collect()
}

/// Concatenates a line sequence back into full file content.
pub fn join_lines(lines: &[String]) -> String {
    lines.concat()
}

/// Returns the index of the first line at or after `min_index` whose text
/// contains `needle`, or `None` if no such line exists.
///
/// The `min_index` offset lets a caller skip earlier incidental occurrences
/// of the same substring when the interesting one is known to sit further
/// down the file.
pub fn find_line(lines: &[String], needle: &str, min_index: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(min_index)
        .find(|(_, line)| line.contains(needle))
        .map(|(i, _)| i)
}

/// Counts the lines at or after `min_index` containing `needle`. Used to
/// detect ambiguous matches where exactly one occurrence was expected.
pub fn occurrences(lines: &[String], needle: &str, min_index: usize) -> usize {
    lines
        .iter()
        .skip(min_index)
        .filter(|line| line.contains(needle))
        .count()
}
