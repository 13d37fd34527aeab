//! Request context, list envelope and the common resource envelope.

pub mod context;
pub mod paginated;
pub mod resource;

pub use context::ArmRequestContext;
pub use paginated::PaginatedList;
pub use resource::{
    BaseResource, CreatedByType, InternalMetadata, ProvisioningState, SystemData, TrackedResource,
};
