//! Compose descriptor records for the generated docker-compose file.
//!
//! Serialization omits everything unset or empty, so a sparse container
//! definition produces an equally sparse service block. Map-typed fields
//! use `BTreeMap` to keep the emitted YAML deterministic.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};

use taskform_common::error::Result;

/// Root of a generated compose descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComposeFile {
    /// Compose schema version.
    pub version: String,
    /// Services keyed by container name.
    pub services: BTreeMap<String, Service>,
}

impl ComposeFile {
    /// Serializes the descriptor to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

/// One service in the generated compose descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Service {
    /// Service name; used as the key in the services map, not serialized.
    #[serde(skip)]
    pub name: String,
    /// Image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Command run inside the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Entry point override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Vec<String>>,
    /// Working directory inside the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    /// Hostname for the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Legacy container links.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    /// DNS server addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns: Vec<String>,
    /// DNS search domains.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns_search: Vec<String>,
    /// User the container runs as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Security options forwarded to the runtime.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_opt: Vec<String>,
    /// Whether a pseudo-terminal is allocated.
    #[serde(skip_serializing_if = "is_false")]
    pub tty: bool,
    /// Whether the container runs privileged.
    #[serde(skip_serializing_if = "is_false")]
    pub privileged: bool,
    /// Whether the root filesystem is mounted read-only.
    #[serde(skip_serializing_if = "is_false")]
    pub read_only: bool,
    /// Resource limits keyed by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ulimits: BTreeMap<String, UlimitsConfig>,
    /// Environment variables.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    /// Additional /etc/hosts entries as `host:ip` strings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_hosts: Vec<String>,
    /// Health check configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<HealthCheckConfig>,
    /// Labels attached to the service.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Logging driver configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,
    /// Whether an init process is run inside the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<bool>,
    /// Shared memory size as a human-readable string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shm_size: Option<String>,
    /// Kernel capabilities to add.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cap_add: Vec<String>,
    /// Kernel capabilities to drop.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cap_drop: Vec<String>,
    /// Device mappings as colon-delimited strings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<String>,
    /// Tmpfs mounts as `path:size=...` strings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tmpfs: Vec<String>,
}

/// Soft/hard pair for one resource limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UlimitsConfig {
    /// Soft limit value.
    pub soft: i64,
    /// Hard limit value.
    pub hard: i64,
}

/// Health check configuration for a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthCheckConfig {
    /// Probe command in the compose `test` array form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test: Vec<String>,
    /// Consecutive failures needed to report unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u64>,
    /// Time between probes.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_duration_secs"
    )]
    pub interval: Option<Duration>,
    /// Time before a probe counts as failed.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_duration_secs"
    )]
    pub timeout: Option<Duration>,
    /// Grace period before failures count.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_duration_secs"
    )]
    pub start_period: Option<Duration>,
}

/// Logging driver configuration for a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Logging {
    /// Log driver name.
    pub driver: String,
    /// Driver-specific options.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn serialize_duration_secs<S>(
    value: &Option<Duration>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(duration) => serializer.serialize_str(&format!("{}s", duration.as_secs())),
        None => serializer.serialize_none(),
    }
}
