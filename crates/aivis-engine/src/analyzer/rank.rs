//! Target-rank extraction from numbered recommendation lists.

use std::sync::LazyLock;

use regex::Regex;

use super::mention::is_mentioned;
use super::AnalyzerConfig;

static LIST_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)[.)]").expect("list label regex is valid")
});

/// Find the numbered-list rank of the business in a recommendation response.
///
/// Scans for the first line that mentions the business (by name-variant
/// matching) and parses a leading `<digits>.` or `<digits>)` label from it.
/// Returns `None` when no line mentions the business or the mentioning line
/// carries no list label.
#[must_use]
pub fn extract_rank(config: &AnalyzerConfig, response: &str, business_name: &str) -> Option<u32> {
    let line = response
        .lines()
        .find(|line| is_mentioned(config, line, business_name))?;
    LIST_LABEL
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}
