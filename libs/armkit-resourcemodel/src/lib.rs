//! Canonical resource model shared by resource providers.
//!
//! Everything here is the internal (stored) representation. Versioned wire shapes
//! live with each resource provider and convert to and from these types.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod compute;
pub mod graph;
pub mod k8s;
pub mod output;
pub mod status;

pub use catalog::OutputResourceCatalog;
pub use compute::{ComputeKind, EnvironmentCompute, IdentitySettingKind, IdentitySettings};
pub use graph::{GraphError, OutputResourceGraph, TeardownAction, TeardownPlan, TeardownStep};
pub use output::OutputResource;
pub use status::{BasicResourceProperties, RecipeStatus, ResourceReference, ResourceStatus};
