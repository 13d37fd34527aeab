use std::collections::BTreeMap;

use armkit::api::ProvisioningState;
use armkit_polymorphic::discriminated_union;
use serde::{Deserialize, Serialize};

use super::common::{IdentitySettings, ResourceEnvelope, ResourceReference, ResourceStatus};
use super::extension::ExtensionClassification;
use crate::datamodel::container::{
    ConnectionProperties, ContainerPort, ContainerResourceProvisioning, EnvironmentVariable,
    ImagePullPolicy, ManagedStore, RestartPolicy, RuntimeProperties, VolumePermission,
};

/// `Applications.Core/containers` as sent and received in this version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerResource {
    #[serde(flatten)]
    pub envelope: ResourceEnvelope,
    pub properties: ContainerProperties,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProperties {
    #[serde(default)]
    pub application: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub container: Container,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub connections: BTreeMap<String, ConnectionProperties>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensionClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentitySettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<RestartPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_provisioning: Option<ContainerResourceProvisioning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtimes: Option<RuntimeProperties>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<ImagePullPolicy>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, EnvironmentVariable>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ports: BTreeMap<String, ContainerPort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<HealthProbePropertiesClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<HealthProbePropertiesClassification>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, VolumeClassification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

/// Timing settings every probe kind carries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeTiming {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthProbeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub timing: ProbeTiming,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecHealthProbeProperties {
    pub command: String,
    #[serde(flatten)]
    pub timing: ProbeTiming,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpGetHealthProbeProperties {
    pub container_port: i32,
    pub path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(flatten)]
    pub timing: ProbeTiming,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpHealthProbeProperties {
    pub container_port: i32,
    #[serde(flatten)]
    pub timing: ProbeTiming,
}

discriminated_union! {
    pub enum HealthProbePropertiesClassification {
        field = "kind",
        base = Base(HealthProbeProperties) by kind,
        "exec" => Exec(ExecHealthProbeProperties),
        "httpGet" => HttpGet(HttpGetHealthProbeProperties),
        "tcp" => Tcp(TcpHealthProbeProperties),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EphemeralVolume {
    pub managed_store: ManagedStore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolume {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<VolumePermission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
}

discriminated_union! {
    /// A volume mounted into a container.
    pub enum VolumeClassification {
        field = "kind",
        base = Base(Volume) by kind,
        "ephemeral" => Ephemeral(EphemeralVolume),
        "persistent" => Persistent(PersistentVolume),
    }
}
