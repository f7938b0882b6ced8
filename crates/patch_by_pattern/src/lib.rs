// crates/patch_by_pattern/src/lib.rs

use regex::{NoExpand, Regex};

/// A regex-mode patch: replace whatever `pattern` matches with `replacement`,
/// inserted verbatim (no capture-group expansion, so `$` in the new text is
/// safe). `replace_all` selects between first-match and every-match mode.
#[derive(Clone, Debug)]
pub struct PatternSpec {
    pub pattern: Regex,
    pub replacement: String,
    pub replace_all: bool,
}

/// Outcome of a pattern patch. The three variants force the caller to decide
/// what a zero-match or a multi-match means instead of treating every run as
/// a success.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The pattern matched nowhere. The content was returned untouched;
    /// callers must not write it back as if the patch had landed.
    NoMatch,
    /// The expected number of substitutions was performed: one in first-match
    /// mode, the full match count in replace-all mode.
    Patched { content: String, substitutions: usize },
    /// First-match mode found more than one candidate. The first occurrence
    /// was replaced and the rest left alone; `candidates` is the total number
    /// of matches so the caller can decide whether first-wins was intended.
    Ambiguous { content: String, candidates: usize },
}

impl PatchOutcome {
    /// Number of substitutions actually performed.
    pub fn substitutions(&self) -> usize {
        match self {
            PatchOutcome::NoMatch => 0,
            PatchOutcome::Patched { substitutions, .. } => *substitutions,
            PatchOutcome::Ambiguous { .. } => 1,
        }
    }
}

/// Applies `spec` to the full file content.
///
/// Patterns written against remembered file content are brittle: any drift in
/// that content (whitespace, an earlier edit) turns the substitution into a
/// silent no-op. The match count is therefore taken up front and a zero-match
/// run reported as [`PatchOutcome::NoMatch`] rather than as unchanged output
/// the caller has to diff for.
pub fn patch_by_pattern(content: &str, spec: &PatternSpec) -> PatchOutcome {
    let candidates = spec.pattern.find_iter(content).count();
    if candidates == 0 {
        return PatchOutcome::NoMatch;
    }

    if spec.replace_all {
        let content = spec
            .pattern
            .replace_all(content, NoExpand(&spec.replacement))
            .into_owned();
        return PatchOutcome::Patched {
            content,
            substitutions: candidates,
        };
    }

    let content = spec
        .pattern
        .replace(content, NoExpand(&spec.replacement))
        .into_owned();
    if candidates > 1 {
        PatchOutcome::Ambiguous { content, candidates }
    } else {
        PatchOutcome::Patched {
            content,
            substitutions: 1,
        }
    }
}
