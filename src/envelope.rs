//! The `{ success, data?, error?, message? }` wrapper every endpoint returns.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Unwrap a detail response. A successful envelope without `data` is a
    /// legitimately absent entity, not an error.
    pub fn into_optional(self, fallback: &str) -> Result<Option<T>, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        Ok(self.data)
    }

    /// Unwrap a response whose `data` is required (mutation results).
    pub fn into_data(self, fallback: &str) -> Result<T, ApiError> {
        self.into_optional(fallback)?
            .ok_or_else(|| ApiError::Decode(format!("{fallback}: response has no data")))
    }
}

impl<T> Envelope<Vec<T>> {
    /// Unwrap a list response; a missing `data` field yields an empty list.
    pub fn into_list(self, fallback: &str) -> Result<Vec<T>, ApiError> {
        Ok(self.into_optional(fallback)?.unwrap_or_default())
    }
}

/// Decode a raw transport body into a typed envelope.
///
/// `data` is only decoded as `T` when `success` is true; a failed envelope
/// keeps its `error` and `message` whatever shape its `data` has.
pub fn parse<T: DeserializeOwned>(body: serde_json::Value) -> Result<Envelope<T>, ApiError> {
    let raw: Envelope<serde_json::Value> = serde_json::from_value(body)?;
    let data = match raw.data {
        Some(data) if raw.success => Some(serde_json::from_value(data)?),
        _ => None,
    };
    Ok(Envelope {
        success: raw.success,
        data,
        error: raw.error,
        message: raw.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_list_data_becomes_empty() {
        let envelope: Envelope<Vec<u32>> = parse(json!({ "success": true })).unwrap();
        assert_eq!(envelope.into_list("Failed to fetch").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn failure_uses_error_field_and_never_returns_data() {
        let envelope: Envelope<Vec<u32>> =
            parse(json!({ "success": false, "error": "nope", "data": [1, 2] })).unwrap();
        let err = envelope.into_list("Failed to fetch").unwrap_err();
        assert_eq!(err, ApiError::Rejected("nope".to_string()));
    }

    #[test]
    fn failure_ignores_data_of_another_shape() {
        let envelope: Envelope<Vec<u32>> =
            parse(json!({ "success": false, "error": "Server busy", "data": {} })).unwrap();
        assert_eq!(envelope.data, None);
        let err = envelope.into_list("Failed to fetch").unwrap_err();
        assert_eq!(err, ApiError::Rejected("Server busy".to_string()));
    }

    #[test]
    fn successful_data_of_the_wrong_shape_is_a_decode_error() {
        let err = parse::<Vec<u32>>(json!({ "success": true, "data": {} })).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn null_data_is_absent() {
        let envelope: Envelope<u32> = parse(json!({ "success": true, "data": null })).unwrap();
        assert_eq!(envelope.into_optional("Failed to fetch job").unwrap(), None);
    }

    #[test]
    fn failure_without_error_falls_back() {
        let envelope: Envelope<u32> = parse(json!({ "success": false })).unwrap();
        let err = envelope.into_optional("Failed to fetch job").unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch job");
    }

    #[test]
    fn serialized_failure_omits_data() {
        let body = serde_json::to_value(Envelope::<()>::failure("Job not found")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "Job not found" }));
    }
}
