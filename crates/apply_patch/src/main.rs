// crates/apply_patch/src/main.rs

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Arg, Command};
use regex::Regex;

use patch_by_pattern::{patch_by_pattern, PatchOutcome, PatternSpec};
use patch_by_range::{anchor_occurrences, patch_by_range};
use remove_region::{remove_region, RegionStatus};
use source_lines::{join_lines, split_lines};

mod config;
use config::AppConfig;

fn main() -> Result<()> {
    let matches = Command::new("apply_patch")
        .version("0.1.0")
        .about("Applies targeted region removals and patches to a source text file")
        .arg(
            Arg::new("file")
                .long("file")
                .num_args(1)
                .required(true)
                .help("Target file to read, transform, and overwrite"),
        )
        .arg(
            Arg::new("remove_start")
                .long("remove-start")
                .action(clap::ArgAction::Append)
                .help("Start marker of a region to remove (repeatable; paired in order with --remove-end)"),
        )
        .arg(
            Arg::new("remove_end")
                .long("remove-end")
                .action(clap::ArgAction::Append)
                .help("End marker of a region to remove; the end-marker line itself is kept"),
        )
        .arg(
            Arg::new("anchor")
                .long("anchor")
                .num_args(1)
                .help("Substring locating the first line of a fixed-width replacement"),
        )
        .arg(
            Arg::new("replace_count")
                .long("replace-count")
                .num_args(1)
                .value_parser(clap::value_parser!(usize))
                .help("Number of lines to replace starting at the anchor line"),
        )
        .arg(
            Arg::new("insert_file")
                .long("insert-file")
                .num_args(1)
                .help("File whose lines replace the anchored range"),
        )
        .arg(
            Arg::new("min_line")
                .long("min-line")
                .num_args(1)
                .value_parser(clap::value_parser!(usize))
                .help("Only match the anchor at or after this 1-based line number"),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .num_args(1)
                .help("Regex matching the fragment to replace in the full file content"),
        )
        .arg(
            Arg::new("replacement_file")
                .long("replacement-file")
                .num_args(1)
                .help("File whose content replaces the pattern match, verbatim"),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .help("Replace every pattern match instead of only the first")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("allow_unterminated")
                .long("allow-unterminated")
                .help("Write the result even when a start marker has no end marker after it")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .help("Report what would change without writing the file")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .get_matches();

    let config = AppConfig::from_matches(&matches)?;
    run(&config)
}

fn run(config: &AppConfig) -> Result<()> {
    let original = fs::read_to_string(&config.source_path)
        .with_context(|| format!("Error reading {}", config.source_path.display()))?;
    let mut lines = split_lines(&original);
    let total_before = lines.len();

    for (pass, pair) in config.marker_pairs.iter().enumerate() {
        let removal = remove_region(&lines, &pair.start, &pair.end);
        match removal.status {
            RegionStatus::StartMarkerNotFound => {
                println!(
                    "Pass {}: start marker {:?} not found; no change needed",
                    pass + 1,
                    pair.start
                );
            }
            RegionStatus::Removed => {
                if let Some(line) = removal.report.skip_started_at {
                    println!("Pass {}: started skipping at line {}", pass + 1, line);
                }
                if let Some(line) = removal.report.skip_ended_at {
                    println!("Pass {}: stopped skipping at line {}", pass + 1, line);
                }
                println!(
                    "Pass {}: removed {} region(s), {} -> {} lines",
                    pass + 1,
                    removal.report.regions_removed,
                    removal.report.lines_before,
                    removal.report.lines_after
                );
            }
            RegionStatus::Unterminated => {
                if !config.allow_unterminated {
                    bail!(
                        "start marker {:?} at line {} has no end marker {:?} after it; \
                         aborted without writing (pass --allow-unterminated to truncate)",
                        pair.start,
                        removal.report.skip_started_at.unwrap_or(0),
                        pair.end
                    );
                }
                println!(
                    "Pass {}: region starting at line {} is unterminated; truncating to {} lines",
                    pass + 1,
                    removal.report.skip_started_at.unwrap_or(0),
                    removal.report.lines_after
                );
            }
        }
        lines = removal.lines;
    }

    if let Some(range) = &config.range {
        let new_content = fs::read_to_string(&range.insert_file)
            .with_context(|| format!("Error reading {}", range.insert_file.display()))?;
        let new_lines = split_lines(&new_content);
        let candidates = anchor_occurrences(&lines, &range.anchor, range.min_index);
        if candidates > 1 {
            println!(
                "Warning: anchor {:?} matches {} lines; using the first",
                range.anchor, candidates
            );
        }
        match patch_by_range(
            &lines,
            &range.anchor,
            range.min_index,
            range.replace_count,
            &new_lines,
        ) {
            Some(patch) => {
                println!(
                    "Found anchor at line {}; replaced {} line(s) with {}",
                    patch.anchor_index + 1,
                    patch.removed,
                    patch.inserted
                );
                lines = patch.lines;
            }
            None => bail!(
                "anchor {:?} not found at or after line {}; aborted without writing",
                range.anchor,
                range.min_index + 1
            ),
        }
    }

    let mut content = join_lines(&lines);

    if let Some(args) = &config.pattern {
        let pattern = Regex::new(&args.pattern)
            .with_context(|| format!("Invalid pattern {:?}", args.pattern))?;
        let replacement = fs::read_to_string(&args.replacement_file)
            .with_context(|| format!("Error reading {}", args.replacement_file.display()))?;
        let spec = PatternSpec {
            pattern,
            replacement,
            replace_all: args.replace_all,
        };
        match patch_by_pattern(&content, &spec) {
            PatchOutcome::NoMatch => {
                bail!("pattern not found; aborted without writing");
            }
            PatchOutcome::Patched {
                content: patched,
                substitutions,
            } => {
                println!("Pattern matched; performed {} substitution(s)", substitutions);
                content = patched;
            }
            PatchOutcome::Ambiguous {
                content: patched,
                candidates,
            } => {
                println!(
                    "Warning: pattern matched {} times; replaced only the first \
                     (pass --all to replace every match)",
                    candidates
                );
                content = patched;
            }
        }
    }

    let total_after = split_lines(&content).len();
    println!("Lines before: {}", total_before);
    println!("Lines after: {}", total_after);

    if content == original {
        println!("No change needed for {}", config.source_path.display());
        return Ok(());
    }
    if config.dry_run {
        println!("Dry run: {} left unmodified", config.source_path.display());
        return Ok(());
    }

    write_atomic(&config.source_path, &content)?;
    println!("Updated {}", config.source_path.display());
    Ok(())
}

/// Writes the full transformed content next to the target and renames it into
/// place, so a crash mid-write can never leave a half-written target behind.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Error creating temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Error writing temporary file for {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Error replacing {}", path.display()))?;
    Ok(())
}
