use armkit_errors::{ErrorResponse, catalog};

use crate::frontend::ControllerError;

/// Map a controller error to the ARM error envelope.
///
/// Server-side failures are logged here and reach the caller only as a generic message.
pub fn controller_error_to_response(e: &ControllerError, target: &str) -> ErrorResponse {
    let resp = match e {
        ControllerError::UnsupportedApiVersion { .. } => {
            catalog::INVALID_API_VERSION.as_response(e.to_string())
        }
        ControllerError::InvalidSkipToken(_) => {
            catalog::INVALID_SKIP_TOKEN.as_response("The skipToken is not valid for this request")
        }
        ControllerError::Store(_) => {
            tracing::error!(error = %e, request_target = %target, "store failure");
            catalog::INTERNAL.as_response("An internal error occurred")
        }
        ControllerError::Materialization { .. } | ControllerError::Projection { .. } => {
            tracing::error!(error = %e, request_target = %target, "materialization failure");
            catalog::INTERNAL.as_response("An internal error occurred")
        }
    };
    armkit_errors::finalize(resp, target)
}

impl From<ControllerError> for ErrorResponse {
    fn from(e: ControllerError) -> Self {
        controller_error_to_response(&e, "/")
    }
}
