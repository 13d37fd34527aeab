//! ARM error envelope (pure data model, no HTTP framework dependencies)
//!
//! The wire shape is `{"error": {"code", "message", "target", "details", "additionalInfo"}}`.
//! The HTTP status travels next to the body and is never serialized.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// ARM error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct ErrorResponse {
    /// HTTP status used when the response is written.
    #[serde(skip)]
    pub status: StatusCode,
    /// The error details.
    pub error: ErrorDetails,
}

/// Error details, possibly nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// The target of the error, usually a resource id or a request field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetails>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_info: Vec<ErrorAdditionalInfo>,
}

/// Additional info attached to an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorAdditionalInfo {
    #[serde(rename = "type")]
    pub info_type: String,
    pub info: serde_json::Value,
}

impl ErrorResponse {
    /// Create a new error response with the given status, code, and message.
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ErrorDetails {
                code: code.into(),
                message: message.into(),
                ..ErrorDetails::default()
            },
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.error.target = Some(target.into());
        self
    }

    pub fn with_detail(mut self, detail: ErrorDetails) -> Self {
        self.error.details.push(detail);
        self
    }

    pub fn with_additional_info(
        mut self,
        info_type: impl Into<String>,
        info: serde_json::Value,
    ) -> Self {
        self.error.additional_info.push(ErrorAdditionalInfo {
            info_type: info_type.into(),
            info,
        });
        self
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.error.code,
            self.status.as_u16(),
            self.error.message
        )
    }
}

impl std::error::Error for ErrorResponse {}

/// Axum integration: make `ErrorResponse` directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn error_response_builder_pattern() {
        let resp = ErrorResponse::new(StatusCode::BAD_REQUEST, "BadRequest", "top is invalid")
            .with_target("top")
            .with_detail(ErrorDetails {
                code: "OutOfRange".to_owned(),
                message: "top must be between 5 and 1000".to_owned(),
                ..ErrorDetails::default()
            })
            .with_additional_info("limits", serde_json::json!({ "min": 5, "max": 1000 }));

        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.error.code, "BadRequest");
        assert_eq!(resp.error.target.as_deref(), Some("top"));
        assert_eq!(resp.error.details.len(), 1);
        assert_eq!(resp.error.additional_info.len(), 1);
    }

    #[test]
    fn error_response_serializes_arm_envelope() {
        let resp = ErrorResponse::new(StatusCode::NOT_FOUND, "NotFound", "no such route");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": { "code": "NotFound", "message": "no such route" } })
        );
    }

    #[test]
    fn error_response_deserializes_nested_details() {
        let json = r#"{"error":{"code":"Internal","message":"boom","details":[{"code":"Inner","message":"x"}],"additionalInfo":[{"type":"t","info":{"a":1}}]}}"#;
        let resp: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.error.details[0].code, "Inner");
        assert_eq!(resp.error.additional_info[0].info_type, "t");
    }
}
