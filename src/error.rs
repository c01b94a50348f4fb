use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("instrument '{0}' not found in instruments data")]
    InvalidInstrument(String),

    #[error("invalid time_in_force: {0}")]
    InvalidTimeInForce(String),

    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    // Never carries the key itself, only the reason it was rejected
    #[error("invalid private key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("unknown environment: {0}")]
    ConfigurationError(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error: {0}")]
    ApiError(String),
}

pub type Result<T> = std::result::Result<T, SignerError>;
