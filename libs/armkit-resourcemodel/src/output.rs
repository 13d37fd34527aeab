use serde::{Deserialize, Serialize};

/// A downstream infrastructure artifact produced when a logical resource is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputResource {
    /// Identifier scoped to the owning resource's graph.
    #[serde(rename = "localID")]
    pub local_id: String,
    /// External id of the artifact.
    pub id: String,
    /// When true, deleting the owner deletes this artifact too.
    #[serde(default)]
    pub radius_managed: bool,
    /// Local ids this artifact must be deployed after.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl OutputResource {
    #[must_use]
    pub fn new(local_id: impl Into<String>, id: impl Into<String>, radius_managed: bool) -> Self {
        Self {
            local_id: local_id.into(),
            id: id.into(),
            radius_managed,
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dependency(mut self, local_id: impl Into<String>) -> Self {
        self.dependencies.push(local_id.into());
        self
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn wire_layout_uses_local_id_and_radius_managed() {
        let out = OutputResource::new(
            "Deployment",
            "/planes/kubernetes/local/namespaces/app/providers/apps/Deployment/web",
            true,
        );
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "localID": "Deployment",
                "id": "/planes/kubernetes/local/namespaces/app/providers/apps/Deployment/web",
                "radiusManaged": true
            })
        );
    }

    #[test]
    fn missing_radius_managed_means_unmanaged() {
        let out: OutputResource =
            serde_json::from_str(r#"{"localID":"Secret","id":"x"}"#).unwrap();
        assert!(!out.radius_managed);
    }
}
