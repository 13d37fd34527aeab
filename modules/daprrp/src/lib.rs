//! `Applications.Dapr` resource provider.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod datamodel;

use std::sync::Arc;

use armkit::ConverterRegistry;
use armkit::rest::ListRouter;
use armkit_database::DatabaseClient;

use api::v20231001preview as v20231001;
use datamodel::{DaprConfigurationStore, DaprPubSubBroker, DaprSecretStore, DaprStateStore};

#[must_use]
pub fn register_converters(registry: ConverterRegistry) -> ConverterRegistry {
    registry
        .with::<DaprStateStore, v20231001::DaprStateStoreResource>()
        .with::<DaprPubSubBroker, v20231001::DaprPubSubBrokerResource>()
        .with::<DaprSecretStore, v20231001::DaprSecretStoreResource>()
        .with::<DaprConfigurationStore, v20231001::DaprConfigurationStoreResource>()
}

#[must_use]
pub fn register_lists(
    router: ListRouter,
    db: &Arc<dyn DatabaseClient>,
    converters: &Arc<ConverterRegistry>,
) -> ListRouter {
    router
        .with_resource::<DaprStateStore>(db, converters)
        .with_resource::<DaprPubSubBroker>(db, converters)
        .with_resource::<DaprSecretStore>(db, converters)
        .with_resource::<DaprConfigurationStore>(db, converters)
}
