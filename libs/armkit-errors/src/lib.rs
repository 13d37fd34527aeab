//! Core error types for the armkit control plane
//!
//! This crate provides pure data types for error handling, with no dependencies
//! on HTTP frameworks unless the `axum` feature is enabled. It includes:
//! - the ARM error envelope (`ErrorResponse`)
//! - error catalog support (`ErrDef`) with the well-known ARM error codes
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod response;

// Re-export commonly used types
pub use catalog::ErrDef;
pub use response::{ErrorAdditionalInfo, ErrorDetails, ErrorResponse};

/// Helper to attach the request target to an error response.
///
/// The target is only filled in when the error does not already carry one,
/// so errors raised deeper in the stack keep their more specific target.
pub fn finalize(resp: ErrorResponse, target: &str) -> ErrorResponse {
    if resp.error.target.is_some() {
        return resp;
    }
    resp.with_target(target)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn finalize_keeps_existing_target() {
        let resp = catalog::BAD_REQUEST
            .as_response("bad top")
            .with_target("top");
        let resp = finalize(resp, "/planes/radius/local");
        assert_eq!(resp.error.target.as_deref(), Some("top"));
    }

    #[test]
    fn finalize_fills_missing_target() {
        let resp = finalize(
            catalog::INTERNAL.as_response("boom"),
            "/planes/radius/local",
        );
        assert_eq!(resp.error.target.as_deref(), Some("/planes/radius/local"));
    }
}
