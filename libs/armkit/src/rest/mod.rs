//! HTTP surface for list operations.

pub mod error;
mod handlers;
mod list_router;
mod routes;

pub use list_router::{ListRouter, ScopeLevel};
pub use routes::{ApiState, PaginationLimits, router};
