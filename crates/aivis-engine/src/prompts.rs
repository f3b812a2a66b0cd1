//! Prompt construction for the fingerprint battery.
//!
//! Builds the three prompt types from a crawled business profile. Pure and
//! deterministic: the same profile always yields the same prompts.

use aivis_core::{BusinessProfile, CrawlData};

use crate::error::FingerprintError;
use crate::types::PromptKind;

/// Maximum characters of the crawled description carried into prompts.
const DESCRIPTION_PREVIEW_CHARS: usize = 200;
/// At most this many services are named in the context preview.
const MAX_PREVIEW_SERVICES: usize = 3;
/// At most this many certifications are named in the context preview.
const MAX_PREVIEW_CERTIFICATIONS: usize = 2;

/// Known industry terms whose plural the fallback rules would get wrong or
/// that are common enough to pin down explicitly.
const INDUSTRY_PLURALS: &[(&str, &str)] = &[
    ("restaurant", "restaurants"),
    ("cafe", "cafes"),
    ("café", "cafés"),
    ("coffee shop", "coffee shops"),
    ("bakery", "bakeries"),
    ("bar", "bars"),
    ("brewery", "breweries"),
    ("gym", "gyms"),
    ("salon", "salons"),
    ("spa", "spas"),
    ("dentist", "dentists"),
    ("law firm", "law firms"),
    ("attorney", "attorneys"),
    ("plumber", "plumbers"),
    ("electrician", "electricians"),
    ("florist", "florists"),
    ("pharmacy", "pharmacies"),
    ("hotel", "hotels"),
    ("marketing agency", "marketing agencies"),
    ("real estate agency", "real estate agencies"),
];

/// The three prompts built for one business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    pub factual: String,
    pub opinion: String,
    pub recommendation: String,
}

impl PromptSet {
    #[must_use]
    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Factual => &self.factual,
            PromptKind::Opinion => &self.opinion,
            PromptKind::Recommendation => &self.recommendation,
        }
    }
}

/// Build the factual/opinion/recommendation prompts for a profile.
///
/// # Errors
///
/// Returns [`FingerprintError::InvalidProfile`] when the profile has no
/// crawled context. Fingerprinting never runs against an uncrawled business.
pub fn build_prompts(profile: &BusinessProfile) -> Result<PromptSet, FingerprintError> {
    let Some(crawl) = profile.crawl.as_ref() else {
        return Err(FingerprintError::InvalidProfile(format!(
            "business '{}' has no crawled website data",
            profile.name
        )));
    };

    let location_phrase = profile
        .location
        .as_ref()
        .map(|loc| format!(" in {}, {}", loc.city, loc.state))
        .unwrap_or_default();

    let industry = profile.industry.trim().to_lowercase();
    let plural = industry_plural(&industry);
    let context = context_preview(crawl);

    let factual = if context.is_empty() {
        format!(
            "What do you know about {name}, a {industry}{location_phrase}? \
             Describe what they do and what they are known for.",
            name = profile.name,
        )
    } else {
        format!(
            "What do you know about {name}, a {industry}{location_phrase}? \
             For reference, their website says: {context} \
             Describe what they do and what they are known for.",
            name = profile.name,
        )
    };

    let opinion = format!(
        "What is your honest opinion of {name}{location_phrase}? \
         Would you recommend this {industry} to someone looking for one?",
        name = profile.name,
    );

    let recommendation = if location_phrase.is_empty() {
        format!(
            "What are the best {plural}? \
             Please provide a ranked list of the top 5 with a short reason for each."
        )
    } else {
        format!(
            "What are the best {plural}{location_phrase}? \
             Please provide a ranked list of the top 5 with a short reason for each."
        )
    };

    Ok(PromptSet {
        factual,
        opinion,
        recommendation,
    })
}

/// Pluralize an industry term: lookup table first, rule-based fallback
/// otherwise (consonant + `y` → `ies`; sibilant endings → `es`; else `s`).
#[must_use]
pub fn industry_plural(industry: &str) -> String {
    let lower = industry.trim().to_lowercase();
    if let Some((_, plural)) = INDUSTRY_PLURALS.iter().find(|(term, _)| *term == lower) {
        return (*plural).to_owned();
    }
    fallback_pluralize(&lower)
}

fn fallback_pluralize(term: &str) -> String {
    if let Some(stem) = term.strip_suffix('y') {
        // "bakery" → "bakeries", but a vowel before the `y` keeps it:
        // "alley" → "alleys".
        let vowel_before = stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !vowel_before {
            return format!("{stem}ies");
        }
        return format!("{term}s");
    }
    let sibilant = term.ends_with('s')
        || term.ends_with('x')
        || term.ends_with('z')
        || term.ends_with("ch")
        || term.ends_with("sh");
    if sibilant {
        format!("{term}es")
    } else {
        format!("{term}s")
    }
}

/// Compact one-line summary of the crawled context, bounded so prompts do
/// not balloon with long website copy.
fn context_preview(crawl: &CrawlData) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(description) = crawl.description.as_deref() {
        let trimmed = description.trim();
        if !trimmed.is_empty() {
            parts.push(truncate_chars(trimmed, DESCRIPTION_PREVIEW_CHARS));
        }
    }

    if !crawl.services.is_empty() {
        let services: Vec<&str> = crawl
            .services
            .iter()
            .take(MAX_PREVIEW_SERVICES)
            .map(String::as_str)
            .collect();
        parts.push(format!("Services include {}.", services.join(", ")));
    }

    if let Some(founded) = crawl.founded.as_deref() {
        if !founded.trim().is_empty() {
            parts.push(format!("Founded {}.", founded.trim()));
        }
    }

    if !crawl.certifications.is_empty() {
        let certs: Vec<&str> = crawl
            .certifications
            .iter()
            .take(MAX_PREVIEW_CERTIFICATIONS)
            .map(String::as_str)
            .collect();
        parts.push(format!("Certified: {}.", certs.join(", ")));
    }

    parts.join(" ")
}

/// Truncate to `max` characters on a char boundary, appending an ellipsis
/// when anything was cut.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
