//! Incidental indentation of text block lines.
//!
//! The margin is counted in tabs only. Leading spaces are always removed,
//! and the tab run that follows them is reduced by the margin.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::literals::{NEW_LINE, SPACE, TAB};

/// How the shared tab margin of a block is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MarginPolicy {
    /// Smallest tab run over all non-blank lines
    #[default]
    Minimum,
    /// Tab run of the first non-blank line that has one; later lines never
    /// lower it
    FirstIndented,
}

/// One line of block content, without its newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub text: String,
    pub leading_spaces: usize,
    /// Tabs immediately following the leading spaces
    pub leading_tabs: usize,
}

impl LineRecord {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let leading_spaces = text.chars().take_while(|&c| c == SPACE).count();
        let leading_tabs = text[leading_spaces..]
            .chars()
            .take_while(|&c| c == TAB)
            .count();
        Self {
            text,
            leading_spaces,
            leading_tabs,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }

    /// Drop the leading spaces and up to `margin` tabs, then the trailing
    /// run of spaces and newlines.
    #[must_use]
    pub fn strip(&self, margin: usize) -> String {
        let tabs = self.leading_tabs.min(margin);
        self.text[self.leading_spaces + tabs..]
            .trim_end_matches([SPACE, NEW_LINE])
            .to_string()
    }
}

/// Result of normalizing a block's lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub margin: usize,
    pub lines: Vec<String>,
}

/// Compute the tab margin over the non-blank lines.
#[must_use]
pub fn margin(lines: &[LineRecord], policy: MarginPolicy) -> usize {
    margin_with_closing(lines, None, policy)
}

/// Compute the tab margin, also counting the tab run in front of a closing
/// delimiter that sits on its own line.
///
/// `FirstIndented` ignores the closing line.
#[must_use]
pub fn margin_with_closing(
    lines: &[LineRecord],
    closing_tabs: Option<usize>,
    policy: MarginPolicy,
) -> usize {
    let indents = lines
        .iter()
        .filter(|line| !line.is_blank())
        .map(|line| line.leading_tabs);

    match policy {
        MarginPolicy::Minimum => indents.chain(closing_tabs).min().unwrap_or(0),
        MarginPolicy::FirstIndented => {
            indents.fold(0, |margin, tabs| if margin == 0 { tabs } else { margin })
        }
    }
}

/// Drop leading blank lines, strip the margin and trailing whitespace from
/// each line, then drop trailing blank lines.
#[must_use]
pub fn normalize<'a, I>(lines: I, policy: MarginPolicy) -> Normalized
where
    I: IntoIterator<Item = &'a str>,
{
    normalize_with_closing(lines, None, policy)
}

/// [`normalize`], with the closing delimiter's tab run taking part in the
/// margin.
#[must_use]
pub fn normalize_with_closing<'a, I>(
    lines: I,
    closing_tabs: Option<usize>,
    policy: MarginPolicy,
) -> Normalized
where
    I: IntoIterator<Item = &'a str>,
{
    let records: Vec<LineRecord> = lines
        .into_iter()
        .skip_while(|line| is_blank(line))
        .map(LineRecord::new)
        .collect();

    let margin = margin_with_closing(&records, closing_tabs, policy);
    debug!(margin, lines = records.len(), ?closing_tabs, ?policy, "computed block margin");

    let mut lines: Vec<String> = records
        .iter()
        .map(|record| {
            let stripped = record.strip(margin);
            trace!(before = %record.text, after = %stripped, "stripped line");
            stripped
        })
        .collect();

    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }

    Normalized { margin, lines }
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records(lines: &[&str]) -> Vec<LineRecord> {
        lines.iter().copied().map(LineRecord::new).collect()
    }

    #[test]
    fn test_line_record_counts_tabs_after_spaces() {
        let record = LineRecord::new("  \t\tvalue\t");
        assert_eq!(record.leading_spaces, 2);
        assert_eq!(record.leading_tabs, 2);
    }

    #[test]
    fn test_line_record_tabs_before_spaces_stop_count() {
        let record = LineRecord::new("\t  \tvalue");
        assert_eq!(record.leading_spaces, 0);
        assert_eq!(record.leading_tabs, 1);
    }

    #[test]
    fn test_margin_monotonic_agrees_across_policies() {
        let lines = records(&["\t\tfoo", "\t\t\tbar", "\t\tbaz"]);
        assert_eq!(margin(&lines, MarginPolicy::Minimum), 2);
        assert_eq!(margin(&lines, MarginPolicy::FirstIndented), 2);
    }

    #[test]
    fn test_margin_non_monotonic_differs() {
        let lines = records(&["\t\t\tdeep", "\tshallow"]);
        assert_eq!(margin(&lines, MarginPolicy::Minimum), 1);
        assert_eq!(margin(&lines, MarginPolicy::FirstIndented), 3);
    }

    #[test]
    fn test_first_indented_skips_unindented_lines() {
        let lines = records(&["top", "\tnested", "\t\tdeeper"]);
        assert_eq!(margin(&lines, MarginPolicy::Minimum), 0);
        assert_eq!(margin(&lines, MarginPolicy::FirstIndented), 1);
    }

    #[test]
    fn test_margin_ignores_blank_lines() {
        let lines = records(&["\t\tfoo", "", "\t", "\t\tbar"]);
        assert_eq!(margin(&lines, MarginPolicy::Minimum), 2);
    }

    #[test]
    fn test_closing_line_lowers_minimum_margin() {
        let lines = records(&["\t\t<a>", "\t\t\t<b/>"]);
        assert_eq!(margin_with_closing(&lines, Some(1), MarginPolicy::Minimum), 1);
        assert_eq!(margin_with_closing(&lines, Some(4), MarginPolicy::Minimum), 2);
        assert_eq!(
            margin_with_closing(&lines, Some(1), MarginPolicy::FirstIndented),
            2
        );
    }

    #[test]
    fn test_normalize_with_less_indented_closing_line() {
        let result = normalize_with_closing(
            ["\t\t<a>", "\t\t\t<b/>", "\t"],
            Some(1),
            MarginPolicy::Minimum,
        );
        assert_eq!(result.margin, 1);
        assert_eq!(result.lines, vec!["\t<a>", "\t\t<b/>"]);
    }

    #[test]
    fn test_margin_of_empty_input_is_zero() {
        assert_eq!(margin(&[], MarginPolicy::Minimum), 0);
        assert_eq!(margin(&[], MarginPolicy::FirstIndented), 0);
    }

    #[test]
    fn test_normalize_removes_one_shared_tab() {
        let result = normalize(["  \tfirst", "  \t\tsecond", "  \tthird"], MarginPolicy::Minimum);
        assert_eq!(result.margin, 1);
        assert_eq!(result.lines, vec!["first", "\tsecond", "third"]);
    }

    #[test]
    fn test_normalize_without_shared_tabs_keeps_lines() {
        let result = normalize(["first", "\tsecond"], MarginPolicy::Minimum);
        assert_eq!(result.margin, 0);
        assert_eq!(result.lines, vec!["first", "\tsecond"]);
    }

    #[test]
    fn test_normalize_non_monotonic_per_policy() {
        let input = ["\t\t\tdeep", "\tshallow", "\t\tmiddle"];

        let minimum = normalize(input, MarginPolicy::Minimum);
        assert_eq!(minimum.lines, vec!["\t\tdeep", "shallow", "\tmiddle"]);

        let legacy = normalize(input, MarginPolicy::FirstIndented);
        assert_eq!(legacy.lines, vec!["deep", "shallow", "middle"]);
    }

    #[test]
    fn test_normalize_trims_blank_edges_and_trailing_spaces() {
        let result = normalize(
            ["", "   ", "\tone  ", "", "\ttwo", "\t", ""],
            MarginPolicy::Minimum,
        );
        assert_eq!(result.lines, vec!["one", "", "two"]);
    }

    #[test]
    fn test_normalize_empty_and_blank_input() {
        assert_eq!(
            normalize(Vec::<&str>::new(), MarginPolicy::Minimum),
            Normalized::default()
        );
        assert_eq!(
            normalize(["", "  ", "\t"], MarginPolicy::Minimum).lines,
            Vec::<String>::new()
        );
    }
}
