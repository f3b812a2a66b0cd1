//! Business profile types consumed by the fingerprinting engine.
//!
//! A [`BusinessProfile`] is produced upstream (crawler + enrichment) and is
//! read-only for the duration of a fingerprint run. The engine requires
//! `crawl` to be populated; everything else degrades gracefully.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A business to fingerprint, enriched with crawled website data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: Uuid,
    pub name: String,
    /// Category/industry label, e.g. `"restaurant"` or `"marketing agency"`.
    pub industry: String,
    #[serde(default)]
    pub location: Option<Location>,
    /// Crawled website context. `None` means the crawl has not run yet;
    /// fingerprinting refuses to start without it.
    #[serde(default)]
    pub crawl: Option<CrawlData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// Enrichment context extracted from the business website.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlData {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    /// Founding year/date as crawled, free-form.
    #[serde(default)]
    pub founded: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub awards: Vec<String>,
}
