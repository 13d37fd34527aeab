use std::collections::BTreeMap;

use armkit::conv::{ConversionError, VersionedModel};
use armkit_resource_id::ResourceId;
use armkit_resourcemodel::BasicResourceProperties;

use super::API_VERSION;
use super::common::{
    ResourceEnvelope, references_to_datamodel, references_to_wire,
    require_resource_id, status_to_wire,
};
use super::container::{
    Container, ContainerProperties, ContainerResource, EphemeralVolume, ExecHealthProbeProperties,
    HealthProbePropertiesClassification, HttpGetHealthProbeProperties, PersistentVolume,
    ProbeTiming, TcpHealthProbeProperties, VolumeClassification,
};
use super::extension::{extension_to_wire, extensions_to_datamodel};
use crate::datamodel::ContainerResource as StoredContainer;
use crate::datamodel::container::{
    Container as StoredContainerSpec, ContainerProperties as StoredProperties, EnvironmentVariable,
    HealthProbe, HealthProbeKind, Volume, VolumeKind,
};

impl VersionedModel<StoredContainer> for ContainerResource {
    const API_VERSION: &'static str = API_VERSION;

    fn from_datamodel(model: &StoredContainer) -> Self {
        let p = &model.properties;
        Self {
            envelope: ResourceEnvelope::from_base(&model.base),
            properties: ContainerProperties {
                application: p.basic.application.clone(),
                environment: (!p.basic.environment.is_empty())
                    .then(|| p.basic.environment.clone()),
                container: container_to_wire(&p.container),
                connections: p.connections.clone(),
                extensions: p.extensions.iter().map(extension_to_wire).collect(),
                identity: p.identity.as_ref().map(Into::into),
                restart_policy: p.restart_policy,
                resource_provisioning: Some(p.resource_provisioning),
                resources: references_to_wire(&p.resources),
                runtimes: p.runtimes.clone(),
                provisioning_state: Some(model.base.provisioning_state()),
                status: status_to_wire(&p.basic.status),
            },
        }
    }

    fn to_datamodel(self, id: &ResourceId) -> Result<StoredContainer, ConversionError> {
        let p = self.properties;
        require_resource_id("properties.application", &p.application)?;
        if let Some(env) = &p.environment {
            require_resource_id("properties.environment", env)?;
        }
        for (name, conn) in &p.connections {
            if conn.source.is_empty() {
                return Err(ConversionError::validation(
                    format!("properties.connections['{name}'].source"),
                    "is required",
                ));
            }
        }

        Ok(StoredContainer {
            base: self.envelope.into_base(id),
            properties: StoredProperties {
                basic: BasicResourceProperties {
                    application: p.application,
                    environment: p.environment.unwrap_or_default(),
                    status: armkit_resourcemodel::ResourceStatus::default(),
                },
                container: container_to_datamodel(p.container)?,
                connections: p.connections,
                extensions: extensions_to_datamodel("properties.extensions", p.extensions)?,
                identity: p.identity.map(Into::into),
                restart_policy: p.restart_policy,
                resource_provisioning: p.resource_provisioning.unwrap_or_default(),
                resources: references_to_datamodel(p.resources),
                runtimes: p.runtimes,
            },
        })
    }
}

fn container_to_wire(c: &StoredContainerSpec) -> Container {
    Container {
        image: c.image.clone(),
        image_pull_policy: c.image_pull_policy,
        env: c.env.clone(),
        ports: c.ports.clone(),
        readiness_probe: c.readiness_probe.as_ref().map(probe_to_wire),
        liveness_probe: c.liveness_probe.as_ref().map(probe_to_wire),
        volumes: c
            .volumes
            .iter()
            .map(|(name, v)| (name.clone(), volume_to_wire(v)))
            .collect(),
        command: c.command.clone(),
        args: c.args.clone(),
        working_dir: c.working_dir.clone(),
    }
}

fn container_to_datamodel(c: Container) -> Result<StoredContainerSpec, ConversionError> {
    if c.image.is_empty() {
        return Err(ConversionError::validation("properties.container.image", "is required"));
    }
    for (name, var) in &c.env {
        check_env_var(name, var)?;
    }

    let mut volumes = BTreeMap::new();
    for (name, v) in c.volumes {
        let field = format!("properties.container.volumes['{name}']");
        volumes.insert(name, volume_to_datamodel(&field, v)?);
    }

    Ok(StoredContainerSpec {
        image: c.image,
        image_pull_policy: c.image_pull_policy,
        env: c.env,
        ports: c.ports,
        readiness_probe: c
            .readiness_probe
            .map(|p| probe_to_datamodel("properties.container.readinessProbe", p))
            .transpose()?,
        liveness_probe: c
            .liveness_probe
            .map(|p| probe_to_datamodel("properties.container.livenessProbe", p))
            .transpose()?,
        volumes,
        command: c.command,
        args: c.args,
        working_dir: c.working_dir,
    })
}

fn check_env_var(name: &str, var: &EnvironmentVariable) -> Result<(), ConversionError> {
    match (&var.value, &var.value_from) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        _ => Err(ConversionError::validation(
            format!("properties.container.env['{name}']"),
            "exactly one of value and valueFrom must be set",
        )),
    }
}

fn timing_of(probe: &HealthProbe) -> ProbeTiming {
    ProbeTiming {
        initial_delay_seconds: probe.initial_delay_seconds,
        failure_threshold: probe.failure_threshold,
        period_seconds: probe.period_seconds,
        timeout_seconds: probe.timeout_seconds,
    }
}

fn probe_to_wire(probe: &HealthProbe) -> HealthProbePropertiesClassification {
    let timing = timing_of(probe);
    match &probe.kind {
        HealthProbeKind::Exec { command } => ExecHealthProbeProperties {
            command: command.clone(),
            timing,
        }
        .into(),
        HealthProbeKind::HttpGet {
            container_port,
            path,
            headers,
        } => HttpGetHealthProbeProperties {
            container_port: *container_port,
            path: path.clone(),
            headers: headers.clone(),
            timing,
        }
        .into(),
        HealthProbeKind::Tcp { container_port } => TcpHealthProbeProperties {
            container_port: *container_port,
            timing,
        }
        .into(),
    }
}

fn probe_to_datamodel(
    field: &str,
    probe: HealthProbePropertiesClassification,
) -> Result<HealthProbe, ConversionError> {
    let (kind, timing) = match probe {
        HealthProbePropertiesClassification::Exec(p) => {
            (HealthProbeKind::Exec { command: p.command }, p.timing)
        }
        HealthProbePropertiesClassification::HttpGet(p) => (
            HealthProbeKind::HttpGet {
                container_port: p.container_port,
                path: p.path,
                headers: p.headers,
            },
            p.timing,
        ),
        HealthProbePropertiesClassification::Tcp(p) => (
            HealthProbeKind::Tcp {
                container_port: p.container_port,
            },
            p.timing,
        ),
        other @ HealthProbePropertiesClassification::Base(_) => {
            return Err(ConversionError::unsupported_variant(field, &other));
        }
    };
    Ok(HealthProbe {
        kind,
        initial_delay_seconds: timing.initial_delay_seconds,
        failure_threshold: timing.failure_threshold,
        period_seconds: timing.period_seconds,
        timeout_seconds: timing.timeout_seconds,
    })
}

fn volume_to_wire(volume: &Volume) -> VolumeClassification {
    let mount_path = volume.mount_path.clone();
    match &volume.kind {
        VolumeKind::Ephemeral { managed_store } => EphemeralVolume {
            managed_store: *managed_store,
            mount_path,
        }
        .into(),
        VolumeKind::Persistent { source, permission } => PersistentVolume {
            source: source.clone(),
            permission: *permission,
            mount_path,
        }
        .into(),
    }
}

fn volume_to_datamodel(
    field: &str,
    volume: VolumeClassification,
) -> Result<Volume, ConversionError> {
    match volume {
        VolumeClassification::Ephemeral(v) => Ok(Volume {
            kind: VolumeKind::Ephemeral {
                managed_store: v.managed_store,
            },
            mount_path: v.mount_path,
        }),
        VolumeClassification::Persistent(v) => {
            require_resource_id(&format!("{field}.source"), &v.source)?;
            Ok(Volume {
                kind: VolumeKind::Persistent {
                    source: v.source,
                    permission: v.permission,
                },
                mount_path: v.mount_path,
            })
        }
        other @ VolumeClassification::Base(_) => {
            Err(ConversionError::unsupported_variant(field, &other))
        }
    }
}
