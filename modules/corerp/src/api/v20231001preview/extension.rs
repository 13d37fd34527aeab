use std::collections::BTreeMap;

use armkit::conv::ConversionError;
use armkit_polymorphic::discriminated_union;
use serde::{Deserialize, Serialize};

use crate::datamodel::container::Extension;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtensionBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaprSidecarExtension {
    pub app_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KubernetesMetadataExtension {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KubernetesNamespaceExtension {
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManualScalingExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

discriminated_union! {
    pub enum ExtensionClassification {
        field = "kind",
        base = Base(ExtensionBase) by kind,
        "daprSidecar" => DaprSidecar(DaprSidecarExtension),
        "kubernetesMetadata" => KubernetesMetadata(KubernetesMetadataExtension),
        "kubernetesNamespace" => KubernetesNamespace(KubernetesNamespaceExtension),
        "manualScaling" => ManualScaling(ManualScalingExtension),
    }
}

#[must_use]
pub fn extension_to_wire(extension: &Extension) -> ExtensionClassification {
    match extension {
        Extension::DaprSidecar {
            app_id,
            app_port,
            config,
            protocol,
        } => DaprSidecarExtension {
            app_id: app_id.clone(),
            app_port: *app_port,
            config: config.clone(),
            protocol: protocol.clone(),
        }
        .into(),
        Extension::KubernetesMetadata {
            annotations,
            labels,
        } => KubernetesMetadataExtension {
            annotations: annotations.clone(),
            labels: labels.clone(),
        }
        .into(),
        Extension::KubernetesNamespace { namespace } => KubernetesNamespaceExtension {
            namespace: namespace.clone(),
        }
        .into(),
        Extension::ManualScaling { replicas } => ManualScalingExtension {
            replicas: Some(*replicas),
        }
        .into(),
    }
}

/// # Errors
/// Returns `ConversionError` for unknown kinds and for a scaling extension without replicas.
pub fn extensions_to_datamodel(
    field: &str,
    extensions: Vec<ExtensionClassification>,
) -> Result<Vec<Extension>, ConversionError> {
    extensions
        .into_iter()
        .enumerate()
        .map(|(i, ext)| extension_to_datamodel(&format!("{field}[{i}]"), ext))
        .collect()
}

fn extension_to_datamodel(
    field: &str,
    extension: ExtensionClassification,
) -> Result<Extension, ConversionError> {
    Ok(match extension {
        ExtensionClassification::DaprSidecar(e) => Extension::DaprSidecar {
            app_id: e.app_id,
            app_port: e.app_port,
            config: e.config,
            protocol: e.protocol,
        },
        ExtensionClassification::KubernetesMetadata(e) => Extension::KubernetesMetadata {
            annotations: e.annotations,
            labels: e.labels,
        },
        ExtensionClassification::KubernetesNamespace(e) => Extension::KubernetesNamespace {
            namespace: e.namespace,
        },
        ExtensionClassification::ManualScaling(e) => Extension::ManualScaling {
            replicas: e.replicas.ok_or_else(|| {
                ConversionError::validation(format!("{field}.replicas"), "is required")
            })?,
        },
        other @ ExtensionClassification::Base(_) => {
            return Err(ConversionError::unsupported_variant(field, &other));
        }
    })
}
