//! Stored (version-independent) models of the Applications.Core resource types.

pub mod container;
pub mod environment;
pub mod volume;

pub use container::{CONTAINER_RESOURCE_TYPE, ContainerResource};
pub use environment::{ENVIRONMENT_RESOURCE_TYPE, Environment};
pub use volume::{VOLUME_RESOURCE_TYPE, VolumeResource};
