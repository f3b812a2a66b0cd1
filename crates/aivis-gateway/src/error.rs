use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model '{0}' returned no completion choices")]
    EmptyResponse(String),

    #[error("no configured provider serves model '{0}'")]
    UnknownModel(String),
}
