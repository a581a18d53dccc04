use thiserror::Error;

/// The single error type surfaced by every transport call, query and mutation.
///
/// Transport failures and envelope-level business failures are collapsed into
/// this one type so consumers have a single error path. It is `Clone` because
/// one in-flight result is handed to every waiter on the same cache key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not produce a parsed response (network error,
    /// non-2xx status or unparsable body).
    #[error("API Request Failed: {0}")]
    Request(String),

    /// The response parsed but the envelope reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// A mutation payload failed validation and was never sent.
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// The envelope `data` did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
