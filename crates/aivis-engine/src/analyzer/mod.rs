//! Heuristic response analysis: mention detection, sentiment, rank and
//! competitor extraction.
//!
//! Every function here is pure over `(config, response text, business
//! name)`. Keyword and pattern tables live in [`AnalyzerConfig`] so tests
//! and deployments can swap them without touching the logic. Ambiguity is
//! never an error: when extraction cannot decide, the conservative default
//! wins (not mentioned, neutral, no rank, no competitors).

mod competitors;
mod mention;
mod rank;
mod sentiment;

pub use competitors::extract_competitors;
pub use mention::{is_mentioned, name_variants};
pub use rank::extract_rank;
pub use sentiment::classify_sentiment;

use crate::types::{PromptKind, RankedMention, Sentiment};

const POSITIVE_WORDS: &[&str] = &[
    "excellent",
    "great",
    "outstanding",
    "best",
    "amazing",
    "wonderful",
    "fantastic",
    "top",
    "leading",
    "renowned",
    "reputable",
    "reliable",
    "trusted",
    "recommend",
    "recommended",
    "popular",
    "quality",
    "professional",
    "friendly",
    "exceptional",
    "favorite",
    "beloved",
];

const NEGATIVE_WORDS: &[&str] = &[
    "poor",
    "bad",
    "terrible",
    "awful",
    "worst",
    "unreliable",
    "disappointing",
    "mediocre",
    "subpar",
    "complaint",
    "complaints",
    "avoid",
    "overpriced",
    "rude",
    "slow",
    "dirty",
    "unprofessional",
];

const CORPORATE_SUFFIXES: &[&str] = &[
    "llc",
    "inc",
    "inc.",
    "corp",
    "corp.",
    "corporation",
    "incorporated",
    "ltd",
    "ltd.",
    "co",
    "co.",
    "company",
    "group",
    "holdings",
];

const ARTICLES: &[&str] = &["the", "a", "an"];

/// Words too generic to identify a business on their own; filtered out when
/// deriving key-term name variants.
const GENERIC_WORDS: &[&str] = &[
    "the",
    "and",
    "of",
    "for",
    "cafe",
    "café",
    "restaurant",
    "shop",
    "store",
    "service",
    "services",
    "solutions",
    "group",
    "company",
    "business",
    "agency",
    "firm",
    "studio",
    "bar",
    "grill",
    "center",
    "centre",
];

/// Filler lines models emit in ranked lists that are not real businesses.
const PLACEHOLDER_PHRASES: &[&str] = &[
    "business name",
    "your business",
    "company name",
    "example business",
    "insert name",
    "n/a",
    "not applicable",
    "none",
    "etc",
    "various",
    "and more",
    "among others",
    "other options",
    "local businesses",
    "many options",
    "it depends",
];

/// Leading words marking advice fragments ("checking reviews…") rather than
/// business names.
const ACTION_WORDS: &[&str] = &[
    "checking",
    "comparing",
    "searching",
    "visiting",
    "looking",
    "asking",
    "reading",
    "calling",
    "browsing",
    "considering",
    "contacting",
    "trying",
];

/// Words whose presence marks a candidate string as a plausible business
/// name even when it is not capitalized.
const BUSINESS_INDICATORS: &[&str] = &[
    "cafe",
    "café",
    "restaurant",
    "bar",
    "grill",
    "bistro",
    "bakery",
    "shop",
    "store",
    "salon",
    "spa",
    "studio",
    "gym",
    "clinic",
    "agency",
    "firm",
    "group",
    "company",
    "co",
    "services",
    "solutions",
    "kitchen",
    "house",
    "market",
    "bros",
    "brothers",
    "sons",
    "llc",
    "inc",
];

/// Keyword and pattern tables driving the analyzer heuristics.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub corporate_suffixes: Vec<String>,
    pub articles: Vec<String>,
    pub generic_words: Vec<String>,
    pub placeholder_phrases: Vec<String>,
    pub action_words: Vec<String>,
    pub business_indicators: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_owned()).collect()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            positive_words: owned(POSITIVE_WORDS),
            negative_words: owned(NEGATIVE_WORDS),
            corporate_suffixes: owned(CORPORATE_SUFFIXES),
            articles: owned(ARTICLES),
            generic_words: owned(GENERIC_WORDS),
            placeholder_phrases: owned(PLACEHOLDER_PHRASES),
            action_words: owned(ACTION_WORDS),
            business_indicators: owned(BUSINESS_INDICATORS),
        }
    }
}

/// Analysis fields extracted from a single response.
#[derive(Debug, Clone)]
pub struct ResponseAnalysis {
    pub mentioned: bool,
    pub sentiment: Sentiment,
    pub accuracy: f64,
    pub rank_position: Option<u32>,
    pub competitor_mentions: Option<Vec<RankedMention>>,
}

/// Run the full analysis battery over one response.
///
/// Rank and competitor extraction only apply to recommendation prompts;
/// other kinds always yield `None` for both.
#[must_use]
pub fn analyze(
    config: &AnalyzerConfig,
    response: &str,
    business_name: &str,
    kind: PromptKind,
) -> ResponseAnalysis {
    let mentioned = is_mentioned(config, response, business_name);
    let sentiment = classify_sentiment(config, response);

    let (rank_position, competitor_mentions) = if kind == PromptKind::Recommendation {
        (
            extract_rank(config, response, business_name),
            Some(extract_competitors(config, response, business_name)),
        )
    } else {
        (None, None)
    };

    ResponseAnalysis {
        mentioned,
        sentiment,
        accuracy: accuracy_for(mentioned),
        rank_position,
        competitor_mentions,
    }
}

/// Coarse accuracy placeholder: `0.7` when the business was mentioned,
/// `0.0` otherwise. This is deliberately not a semantic accuracy measure;
/// it stands in until response claims can be checked against crawled facts.
#[must_use]
pub fn accuracy_for(mentioned: bool) -> f64 {
    if mentioned {
        0.7
    } else {
        0.0
    }
}
