//! Fuzzy business-name mention detection.
//!
//! Models rarely repeat a registered name verbatim ("Joe's Café &
//! Restaurant, LLC" comes back as "Joe's"), so detection generates a set of
//! name variants and reports a mention when any sufficiently long variant
//! appears as a case-insensitive substring of the response.

use super::AnalyzerConfig;

/// Variants shorter than this are too ambiguous to count as a mention.
const MIN_VARIANT_LEN: usize = 3;

/// Generate the match variants for a business name, longest-signal first:
/// exact, punctuation-stripped, corporate-suffix-stripped, article-stripped,
/// first significant word, and generic-word-filtered key terms.
#[must_use]
pub fn name_variants(config: &AnalyzerConfig, name: &str) -> Vec<String> {
    let trimmed = name.trim();
    let mut variants: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        let candidate = candidate.trim().to_owned();
        if candidate.chars().count() >= MIN_VARIANT_LEN
            && !variants
                .iter()
                .any(|v| v.eq_ignore_ascii_case(&candidate))
        {
            variants.push(candidate);
        }
    };

    push(trimmed.to_owned());
    push(strip_punctuation(trimmed));
    push(strip_corporate_suffix(config, trimmed));
    push(strip_leading_article(config, trimmed).to_owned());

    if let Some(word) = first_significant_word(config, trimmed) {
        push(word.to_owned());
    }

    let key_terms = key_terms(config, trimmed);
    if !key_terms.is_empty() {
        push(key_terms.join(" "));
    }

    variants
}

/// True when any name variant appears in the response, case-insensitively.
#[must_use]
pub fn is_mentioned(config: &AnalyzerConfig, response: &str, name: &str) -> bool {
    let haystack = response.to_lowercase();
    name_variants(config, name)
        .iter()
        .any(|variant| haystack.contains(&variant.to_lowercase()))
}

/// Drop everything except letters, digits, and spaces, collapsing runs of
/// whitespace.
fn strip_punctuation(name: &str) -> String {
    let kept: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove a trailing corporate suffix ("LLC", "Inc.", …) plus any trailing
/// comma left behind.
pub(super) fn strip_corporate_suffix(config: &AnalyzerConfig, name: &str) -> String {
    let mut words: Vec<&str> = name.split_whitespace().collect();
    while let Some(last) = words.last() {
        let bare = last
            .trim_matches(|c: char| c == ',' || c == '.')
            .to_lowercase();
        if words.len() > 1 && config.corporate_suffixes.iter().any(|s| {
            s.trim_end_matches('.') == bare
        }) {
            words.pop();
        } else {
            break;
        }
    }
    words.join(" ").trim_end_matches(',').to_owned()
}

/// Remove a leading article ("The Acme Diner" → "Acme Diner").
pub(super) fn strip_leading_article<'a>(config: &AnalyzerConfig, name: &'a str) -> &'a str {
    let mut split = name.splitn(2, char::is_whitespace);
    let first = split.next().unwrap_or_default();
    let rest = split.next().unwrap_or_default();
    if !rest.is_empty()
        && config
            .articles
            .iter()
            .any(|a| a.eq_ignore_ascii_case(first))
    {
        rest.trim_start()
    } else {
        name
    }
}

/// First word of at least [`MIN_VARIANT_LEN`] characters that is not an
/// article — the token people actually use ("Joe's" for "Joe's Café &
/// Restaurant, LLC").
fn first_significant_word<'a>(config: &AnalyzerConfig, name: &'a str) -> Option<&'a str> {
    name.split_whitespace().find_map(|word| {
        let bare = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
        let significant = bare.chars().count() >= MIN_VARIANT_LEN
            && !config.articles.iter().any(|a| a.eq_ignore_ascii_case(bare));
        significant.then_some(bare)
    })
}

/// Distinctive words in the name: everything left after filtering articles,
/// generic industry words, and short tokens.
fn key_terms<'a>(config: &AnalyzerConfig, name: &'a str) -> Vec<&'a str> {
    name.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .filter(|w| {
            let lower = w.to_lowercase();
            w.chars().count() >= MIN_VARIANT_LEN
                && !config.generic_words.iter().any(|g| *g == lower)
                && !config.articles.iter().any(|a| *a == lower)
        })
        .collect()
}
