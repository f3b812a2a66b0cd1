use thiserror::Error;

#[derive(Debug, Error)]
pub enum FingerprintError {
    /// The business profile is missing required crawled context. Raised
    /// before any queries are issued; the only error a fingerprint run can
    /// surface to the caller.
    #[error("invalid business profile: {0}")]
    InvalidProfile(String),
}
