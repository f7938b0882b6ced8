// crates/patch_by_range/src/lib.rs

use source_lines::find_line;

pub use source_lines::occurrences as anchor_occurrences;

/// Result of a successful range patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangePatch {
    pub lines: Vec<String>,
    /// Zero-based index of the line the anchor matched.
    pub anchor_index: usize,
    pub removed: usize,
    pub inserted: usize,
}

/// Replaces a fixed-width run of lines located by an anchor substring.
///
/// The anchor search starts at `min_index`, so an earlier incidental
/// occurrence of the same substring can be stepped over. The output is
/// `lines[..i]`, then `new_lines`, then `lines[i + replace_count..]` where
/// `i` is the anchor's line index. A `replace_count` reaching past the end of
/// the sequence is clamped to it.
///
/// Returns `None` when no line at or after `min_index` contains the anchor;
/// the caller must abort its write rather than fall through with the
/// original content.
pub fn patch_by_range(
    lines: &[String],
    anchor: &str,
    min_index: usize,
    replace_count: usize,
    new_lines: &[String],
) -> Option<RangePatch> {
    let anchor_index = find_line(lines, anchor, min_index)?;
    let resume_at = (anchor_index + replace_count).min(lines.len());

    let mut output = Vec::with_capacity(lines.len() - (resume_at - anchor_index) + new_lines.len());
    output.extend_from_slice(&lines[..anchor_index]);
    output.extend_from_slice(new_lines);
    output.extend_from_slice(&lines[resume_at..]);

    Some(RangePatch {
        lines: output,
        anchor_index,
        removed: resume_at - anchor_index,
        inserted: new_lines.len(),
    })
}
