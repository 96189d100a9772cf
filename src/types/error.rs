use thiserror::Error;

/// adlens error types
#[derive(Error, Debug)]
pub enum AdlensError {
    /// Missing or malformed connection input, caught before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Graph API returned an error payload (message shown verbatim)
    #[error("Meta API: {0}")]
    Api(String),

    /// HTTP transport failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("decode error: {0}")]
    Decode(String),

    /// AI analysis call failed or returned no usable text
    #[error("analysis error: {0}")]
    Analysis(String),
}

/// Result type alias for adlens
pub type Result<T> = std::result::Result<T, AdlensError>;
