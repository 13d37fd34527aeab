//! `2023-10-01-preview` wire models of the Dapr resource types.

mod conversion;
pub mod models;

pub const API_VERSION: &str = "2023-10-01-preview";

pub use models::{
    DaprConfigurationStoreResource, DaprPubSubBrokerResource, DaprSecretStoreResource,
    DaprStateStoreResource,
};
