//! `2023-10-01-preview` wire models and their projections onto the stored models.

pub mod common;
pub mod container;
mod container_conversion;
pub mod environment;
mod environment_conversion;
pub mod extension;
pub mod volume;
mod volume_conversion;

pub const API_VERSION: &str = "2023-10-01-preview";

pub use container::ContainerResource;
pub use environment::EnvironmentResource;
pub use volume::VolumeResource;
