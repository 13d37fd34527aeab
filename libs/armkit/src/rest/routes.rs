use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::rest::handlers;
use crate::rest::list_router::ListRouter;

/// Bounds on the `top` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLimits {
    pub min_top: usize,
    pub max_top: usize,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            min_top: 5,
            max_top: 1000,
        }
    }
}

/// State shared by every list request.
#[derive(Clone)]
pub struct ApiState {
    pub lists: Arc<ListRouter>,
    pub pagination: PaginationLimits,
}

impl ApiState {
    #[must_use]
    pub fn new(lists: ListRouter) -> Self {
        Self {
            lists: Arc::new(lists),
            pagination: PaginationLimits::default(),
        }
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationLimits) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Build the list API router. Every path is treated as a resource collection id.
///
/// Requests running past `request_timeout` are answered with `504 Gateway Timeout`.
pub fn router(state: ApiState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/{*path}", get(handlers::list_resources))
        .layer(Extension(state))
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, request_timeout))
        .layer(TraceLayer::new_for_http())
}
