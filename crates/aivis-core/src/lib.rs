//! Shared domain types and configuration for the AIVIS fingerprinting engine.
//!
//! Holds the business profile shapes handed in by the crawler, the engine
//! configuration (model battery, execution mode, scoring weights), and the
//! env-var loading layer used by the CLI.

pub mod config;
pub mod error;
pub mod profile;

pub use config::{FingerprintConfig, ModelSpec, RunOptions, ScoreWeights};
pub use error::ConfigError;
pub use profile::{BusinessProfile, CrawlData, Location};
