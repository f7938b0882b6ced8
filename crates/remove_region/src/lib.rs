// crates/remove_region/src/lib.rs

/// How a region removal pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionStatus {
    /// The start marker never occurred; the output equals the input.
    StartMarkerNotFound,
    /// Every region was removed: each start-marker line and everything up to
    /// (but not including) the next end-marker line.
    Removed,
    /// A start marker was found with no end marker after it, so every line
    /// from that point onward was dropped. Callers should treat the result
    /// as suspect and avoid writing it unless they have explicitly opted in
    /// to truncation.
    Unterminated,
}

/// Diagnostic record of where a pass began and stopped skipping.
/// Line numbers are 1-based, matching what an editor would show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkipReport {
    /// Line of the first transition into skipping.
    pub skip_started_at: Option<usize>,
    /// Line of the last transition out of skipping.
    pub skip_ended_at: Option<usize>,
    /// Number of regions closed by an end marker.
    pub regions_removed: usize,
    pub lines_before: usize,
    pub lines_after: usize,
}

/// Result of one region removal pass.
#[derive(Clone, Debug)]
pub struct Removal {
    pub lines: Vec<String>,
    pub status: RegionStatus,
    pub report: SkipReport,
}

/// Removes the region(s) bounded by `start_marker` and `end_marker` from the
/// line sequence.
///
/// Markers match by substring containment against each line's text. A region
/// is the half-open span from a line containing the start marker up to (but
/// not including) the next line containing the end marker; the end-marker
/// line itself is kept so the boundary survives. The pass runs over the whole
/// sequence, so a marker pair that recurs removes each of its regions.
///
/// Calling the pass again on its own output with the same markers is a no-op
/// (the start-marker lines are gone), and sequential calls with independent
/// marker pairs compose.
pub fn remove_region(lines: &[String], start_marker: &str, end_marker: &str) -> Removal {
    let mut output = Vec::with_capacity(lines.len());
    let mut skipping = false;
    let mut report = SkipReport {
        lines_before: lines.len(),
        ..SkipReport::default()
    };

    for (i, line) in lines.iter().enumerate() {
        if !skipping {
            if line.contains(start_marker) {
                skipping = true;
                report.skip_started_at.get_or_insert(i + 1);
                continue;
            }
            output.push(line.clone());
        } else if line.contains(end_marker) {
            skipping = false;
            report.skip_ended_at = Some(i + 1);
            report.regions_removed += 1;
            // The end-marker line is the boundary; keep it.
            output.push(line.clone());
        }
    }

    let status = match (report.skip_started_at, skipping) {
        (None, _) => RegionStatus::StartMarkerNotFound,
        (Some(_), false) => RegionStatus::Removed,
        (Some(_), true) => RegionStatus::Unterminated,
    };
    report.lines_after = output.len();

    Removal {
        lines: output,
        status,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use source_lines::split_lines;

    fn numbered(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_no_start_marker_is_identity() {
        let lines = numbered(5);
        let removal = remove_region(&lines, "START", "END");
        assert_eq!(removal.lines, lines);
        assert_eq!(removal.status, RegionStatus::StartMarkerNotFound);
        assert_eq!(removal.report.skip_started_at, None);
        assert_eq!(removal.report.lines_before, 5);
        assert_eq!(removal.report.lines_after, 5);
    }

    #[test]
    fn test_removes_half_open_span_and_keeps_end_marker_line() {
        let lines =
            split_lines("keep 1\nkeep 2\n<<START>> here\ninside a\ninside b\n<<END>> here\ntail\n");
        let removal = remove_region(&lines, "<<START>>", "<<END>>");
        assert_eq!(
            removal.lines,
            vec!["keep 1\n", "keep 2\n", "<<END>> here\n", "tail\n"]
        );
        assert_eq!(removal.status, RegionStatus::Removed);
        assert_eq!(removal.report.skip_started_at, Some(3));
        assert_eq!(removal.report.skip_ended_at, Some(6));
        assert_eq!(removal.report.regions_removed, 1);
    }

    #[test]
    fn test_ten_line_scenario_start_at_3_end_at_7() {
        // Start marker on line 3, end marker on line 7: lines 3..7 go,
        // line 7 stays, leaving 6 of the original 10.
        let mut lines = numbered(10);
        lines[2] = "line 3 START\n".to_string();
        lines[6] = "line 7 END\n".to_string();
        let removal = remove_region(&lines, "START", "END");
        assert_eq!(removal.lines.len(), 6);
        assert_eq!(removal.lines[0], "line 1\n");
        assert_eq!(removal.lines[1], "line 2\n");
        assert_eq!(removal.lines[2], "line 7 END\n");
        assert_eq!(removal.lines[5], "line 10\n");
    }

    #[test]
    fn test_output_equals_prefix_plus_suffix() {
        let mut lines = numbered(20);
        lines[4] = "begin BLOCK\n".to_string();
        lines[11] = "finish BLOCK\n".to_string();
        let removal = remove_region(&lines, "begin BLOCK", "finish BLOCK");
        let mut expected: Vec<String> = lines[..4].to_vec();
        expected.extend_from_slice(&lines[11..]);
        assert_eq!(removal.lines, expected);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let mut lines = numbered(10);
        lines[2] = "alpha OPEN\n".to_string();
        lines[6] = "omega CLOSE\n".to_string();
        let first = remove_region(&lines, "OPEN", "CLOSE");
        let second = remove_region(&first.lines, "OPEN", "CLOSE");
        assert_eq!(second.lines, first.lines);
        assert_eq!(second.status, RegionStatus::StartMarkerNotFound);
    }

    #[test]
    fn test_unterminated_region_drops_tail_and_reports() {
        let mut lines = numbered(8);
        lines[3] = "line 4 OPEN\n".to_string();
        let removal = remove_region(&lines, "OPEN", "CLOSE");
        assert_eq!(removal.lines, lines[..3].to_vec());
        assert_eq!(removal.status, RegionStatus::Unterminated);
        assert_eq!(removal.report.skip_started_at, Some(4));
        assert_eq!(removal.report.skip_ended_at, None);
        assert_eq!(removal.report.regions_removed, 0);
    }

    #[test]
    fn test_two_passes_with_independent_marker_pairs_compose() {
        let content = "\
header
Combined Profile Card
dup line 1
dup line 2
Main Content Grid
middle
Login Account Management
acct line
Recent Activity Feed
footer
";
        let lines = split_lines(content);
        let first = remove_region(&lines, "Combined Profile Card", "Main Content Grid");
        assert_eq!(first.status, RegionStatus::Removed);
        let second =
            remove_region(&first.lines, "Login Account Management", "Recent Activity Feed");
        assert_eq!(second.status, RegionStatus::Removed);
        assert_eq!(
            second.lines,
            vec![
                "header\n",
                "Main Content Grid\n",
                "middle\n",
                "Recent Activity Feed\n",
                "footer\n"
            ]
        );
    }

    #[test]
    fn test_recurring_marker_pair_removes_each_region() {
        let lines = split_lines("a\nOPEN\nx\nCLOSE\nb\nOPEN\ny\nCLOSE\nc\n");
        let removal = remove_region(&lines, "OPEN", "CLOSE");
        assert_eq!(
            removal.lines,
            vec!["a\n", "CLOSE\n", "b\n", "CLOSE\n", "c\n"]
        );
        assert_eq!(removal.report.regions_removed, 2);
        assert_eq!(removal.report.skip_started_at, Some(2));
        assert_eq!(removal.report.skip_ended_at, Some(8));
    }

    #[test]
    fn test_start_marker_on_first_line() {
        let lines = split_lines("OPEN\ngone\nCLOSE\nkept\n");
        let removal = remove_region(&lines, "OPEN", "CLOSE");
        assert_eq!(removal.lines, vec!["CLOSE\n", "kept\n"]);
        assert_eq!(removal.report.skip_started_at, Some(1));
        assert_eq!(removal.report.skip_ended_at, Some(3));
    }
}
