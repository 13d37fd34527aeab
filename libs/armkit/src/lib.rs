//! Resource access and wire projection for an ARM-style control plane.
//!
//! - [`conv`]: stored models, versioned wire models and the projection registry
//! - [`frontend`]: the generic list controller that queries the store and projects pages
//! - [`rest`]: the axum surface that turns list requests into controller calls
//! - [`api`]: request context, the list envelope and the common resource envelope
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod conv;
pub mod frontend;
pub mod rest;

pub use api::{ArmRequestContext, PaginatedList};
pub use conv::{ConversionError, ConverterRegistry, DataModel, VersionedModel};
pub use frontend::{ControllerError, ListOperation, ListResources};
