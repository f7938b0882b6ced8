// crates/apply_patch/src/config.rs

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::ArgMatches;

/// One region-removal pass: the start/end marker pair for that pass.
#[derive(Clone, Debug)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

/// Anchor + fixed-width replacement, with its new content read from a file.
#[derive(Clone, Debug)]
pub struct RangeArgs {
    pub anchor: String,
    /// Zero-based line index the anchor search starts from.
    pub min_index: usize,
    pub replace_count: usize,
    pub insert_file: PathBuf,
}

/// Regex-mode patch, with its new content read from a file.
#[derive(Clone, Debug)]
pub struct PatternArgs {
    pub pattern: String,
    pub replacement_file: PathBuf,
    pub replace_all: bool,
}

/// Centralized runtime configuration composed from the CLI. The target path,
/// markers, and patch specs all arrive here rather than living as literals
/// in the transform code, so the passes stay testable without a filesystem.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub source_path: PathBuf,
    pub marker_pairs: Vec<MarkerPair>,
    pub range: Option<RangeArgs>,
    pub pattern: Option<PatternArgs>,
    pub allow_unterminated: bool,
    pub dry_run: bool,
}

impl AppConfig {
    /// Builds the configuration from parsed CLI matches, validating the
    /// cross-argument constraints clap cannot express on its own.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let source_path = PathBuf::from(
            matches
                .get_one::<String>("file")
                .map(String::as_str)
                .unwrap_or_default(),
        );

        let starts: Vec<String> = matches
            .get_many::<String>("remove_start")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default();
        let ends: Vec<String> = matches
            .get_many::<String>("remove_end")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default();
        if starts.len() != ends.len() {
            bail!(
                "got {} --remove-start marker(s) but {} --remove-end marker(s); \
                 each start marker needs a matching end marker",
                starts.len(),
                ends.len()
            );
        }
        let marker_pairs = starts
            .into_iter()
            .zip(ends)
            .map(|(start, end)| MarkerPair { start, end })
            .collect::<Vec<_>>();

        let range = match matches.get_one::<String>("anchor") {
            Some(anchor) => {
                let replace_count = *matches
                    .get_one::<usize>("replace_count")
                    .ok_or_else(|| anyhow!("--anchor requires --replace-count"))?;
                let insert_file = matches
                    .get_one::<String>("insert_file")
                    .ok_or_else(|| anyhow!("--anchor requires --insert-file"))?;
                let min_line = matches.get_one::<usize>("min_line").copied().unwrap_or(1);
                if min_line == 0 {
                    bail!("--min-line is 1-based; 0 is not a valid line number");
                }
                Some(RangeArgs {
                    anchor: anchor.clone(),
                    min_index: min_line - 1,
                    replace_count,
                    insert_file: PathBuf::from(insert_file),
                })
            }
            None => None,
        };

        let pattern = match matches.get_one::<String>("pattern") {
            Some(pattern) => {
                let replacement_file = matches
                    .get_one::<String>("replacement_file")
                    .ok_or_else(|| anyhow!("--pattern requires --replacement-file"))?;
                Some(PatternArgs {
                    pattern: pattern.clone(),
                    replacement_file: PathBuf::from(replacement_file),
                    replace_all: *matches.get_one::<bool>("all").unwrap_or(&false),
                })
            }
            None => None,
        };

        if marker_pairs.is_empty() && range.is_none() && pattern.is_none() {
            bail!(
                "nothing to do: supply --remove-start/--remove-end, --anchor, or --pattern"
            );
        }

        Ok(AppConfig {
            source_path,
            marker_pairs,
            range,
            pattern,
            allow_unterminated: *matches.get_one::<bool>("allow_unterminated").unwrap_or(&false),
            dry_run: *matches.get_one::<bool>("dry_run").unwrap_or(&false),
        })
    }
}
