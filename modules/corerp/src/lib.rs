//! `Applications.Core` resource provider: environments, containers and volumes.
//!
//! The provider contributes its stored models ([`datamodel`]), one wire model per
//! supported API version ([`api`]), and the wiring that plugs both into the generic
//! list surface of `armkit`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod datamodel;

use std::sync::Arc;

use armkit::ConverterRegistry;
use armkit::rest::ListRouter;
use armkit_database::DatabaseClient;

use api::v20231001preview as v20231001;
use datamodel::{ContainerResource, Environment, VolumeResource};

/// Register every projection this provider serves.
#[must_use]
pub fn register_converters(registry: ConverterRegistry) -> ConverterRegistry {
    registry
        .with::<Environment, v20231001::EnvironmentResource>()
        .with::<ContainerResource, v20231001::ContainerResource>()
        .with::<VolumeResource, v20231001::VolumeResource>()
}

/// Register list operations for every resource type of this provider.
#[must_use]
pub fn register_lists(
    router: ListRouter,
    db: &Arc<dyn DatabaseClient>,
    converters: &Arc<ConverterRegistry>,
) -> ListRouter {
    router
        .with_resource::<Environment>(db, converters)
        .with_resource::<ContainerResource>(db, converters)
        .with_resource::<VolumeResource>(db, converters)
}
