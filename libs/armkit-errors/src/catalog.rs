//! Error catalog: static ARM error definitions

use crate::response::ErrorResponse;
use http::StatusCode;

/// Static error definition from catalog
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub code: &'static str,
}

impl ErrDef {
    /// Convert this error definition into an `ErrorResponse` with the given message
    #[inline]
    pub fn as_response(&self, message: impl Into<String>) -> ErrorResponse {
        // Convert u16 to StatusCode, using INTERNAL_SERVER_ERROR as fallback for invalid codes
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        ErrorResponse::new(status, self.code, message.into())
    }
}

pub const BAD_REQUEST: ErrDef = ErrDef {
    status: 400,
    code: "BadRequest",
};

pub const INVALID_API_VERSION: ErrDef = ErrDef {
    status: 400,
    code: "InvalidApiVersionParameter",
};

pub const INVALID_RESOURCE_ID: ErrDef = ErrDef {
    status: 400,
    code: "InvalidResourceId",
};

pub const INVALID_SKIP_TOKEN: ErrDef = ErrDef {
    status: 400,
    code: "InvalidSkipToken",
};

pub const NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    code: "NotFound",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    code: "Internal",
};
