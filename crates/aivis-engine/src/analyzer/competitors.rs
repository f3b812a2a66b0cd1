//! Competitor extraction from numbered recommendation lists.
//!
//! Walks every numbered line of a response, cleans the candidate text, and
//! keeps only entries that plausibly name a rival business. The parsed list
//! label doubles as the competitor's position, the same extraction method
//! used for the target's own rank.

use std::sync::LazyLock;

use regex::Regex;

use super::mention::{is_mentioned, strip_corporate_suffix, strip_leading_article};
use super::AnalyzerConfig;
use crate::types::RankedMention;

static LIST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)[.)]\s*(.+)$").expect("list line regex is valid")
});

/// Text that separates a list entry's name from its description.
const SEPARATORS: &[&str] = &[" - ", " – ", " — ", ":", ",", " ("];

/// Extract competitor names (with their list positions) from a
/// recommendation response, in list order.
#[must_use]
pub fn extract_competitors(
    config: &AnalyzerConfig,
    response: &str,
    target_name: &str,
) -> Vec<RankedMention> {
    let mut competitors = Vec::new();

    for line in response.lines() {
        let Some(caps) = LIST_LINE.captures(line) else {
            continue;
        };
        let Ok(position) = caps[1].parse::<u32>() else {
            continue;
        };

        let candidate = clean_candidate(&caps[2]);
        if candidate.is_empty() {
            continue;
        }
        // The target's own entry is not a competitor.
        if is_mentioned(config, &candidate, target_name) {
            continue;
        }
        if is_placeholder(config, &candidate) {
            continue;
        }
        if starts_with_action_word(config, &candidate) {
            continue;
        }
        if !looks_like_business_name(config, &candidate) {
            continue;
        }

        let stripped = strip_leading_article(config, &candidate);
        let name = strip_corporate_suffix(config, stripped);
        if name.is_empty() {
            continue;
        }
        competitors.push(RankedMention { name, position });
    }

    competitors
}

/// Drop markdown emphasis and cut the entry at its first description
/// separator, keeping just the name segment.
fn clean_candidate(raw: &str) -> String {
    let without_emphasis = raw.replace("**", "").replace("__", "");
    let trimmed = without_emphasis.trim_matches(|c| c == '*' || c == '_' || c == '`');

    let cut_at = SEPARATORS
        .iter()
        .filter_map(|sep| trimmed.find(sep))
        .min()
        .unwrap_or(trimmed.len());

    trimmed[..cut_at].trim().to_owned()
}

/// A candidate is a placeholder when it equals a known phrase or starts
/// with one at a word boundary. The boundary check keeps real names that
/// merely share a prefix with a phrase ("Etched Glass Studio" vs "etc",
/// "Nonesuch Books" vs "none").
fn is_placeholder(config: &AnalyzerConfig, candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    config.placeholder_phrases.iter().any(|phrase| {
        lower
            .strip_prefix(phrase.as_str())
            .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_alphanumeric()))
    })
}

/// Entries like "Checking online reviews" are advice, not business names.
fn starts_with_action_word(config: &AnalyzerConfig, candidate: &str) -> bool {
    let Some(first) = candidate.split_whitespace().next() else {
        return false;
    };
    let bare = first
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();
    config.action_words.iter().any(|w| *w == bare)
}

/// A candidate is a plausible business name when it is at least 3 chars,
/// not purely numeric, and either carries a business-indicator word or is
/// capitalized and longer than 5 chars.
fn looks_like_business_name(config: &AnalyzerConfig, candidate: &str) -> bool {
    if candidate.chars().count() < 3 {
        return false;
    }
    if candidate.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()) {
        return false;
    }

    let has_indicator = candidate.split_whitespace().any(|word| {
        let bare = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        config.business_indicators.iter().any(|i| *i == bare)
    });
    if has_indicator {
        return true;
    }

    candidate.chars().count() > 5
        && candidate
            .chars()
            .next()
            .is_some_and(char::is_uppercase)
}
