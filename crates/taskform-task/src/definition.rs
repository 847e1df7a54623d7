//! Task definition records as returned by the orchestration API.
//!
//! Field names follow the API's camelCase JSON; unknown fields are
//! ignored since the API carries far more than this tool translates.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use taskform_common::error::{Result, TaskformError};

/// A complete task definition: a family of container definitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Family name of the task definition.
    pub family: Option<String>,
    /// Container definitions making up the task.
    #[serde(default)]
    pub container_definitions: Vec<ContainerDefinition>,
}

impl TaskDefinition {
    /// Parses a task definition from an API JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON for this schema.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(Into::into)
    }

    /// Reads and parses a task definition from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "reading task definition");
        let contents = std::fs::read_to_string(path).map_err(|source| TaskformError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }
}

/// One container within a task definition.
///
/// Every field the API may omit is an `Option`; list-valued fields keep
/// the same treatment so an absent list and an empty list stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    /// Container name; becomes the compose service name.
    pub name: Option<String>,
    /// Image reference.
    pub image: Option<String>,
    /// Command passed to the container.
    pub command: Option<Vec<String>>,
    /// Entry point override.
    pub entry_point: Option<Vec<String>>,
    /// Working directory inside the container.
    pub working_directory: Option<String>,
    /// Hostname for the container.
    pub hostname: Option<String>,
    /// Legacy container links.
    pub links: Option<Vec<String>>,
    /// DNS server addresses.
    pub dns_servers: Option<Vec<String>>,
    /// DNS search domains.
    pub dns_search_domains: Option<Vec<String>>,
    /// User the container runs as.
    pub user: Option<String>,
    /// Security options forwarded to the container runtime.
    pub docker_security_options: Option<Vec<String>>,
    /// Whether a pseudo-terminal is allocated.
    pub pseudo_terminal: Option<bool>,
    /// Whether the container runs privileged.
    pub privileged: Option<bool>,
    /// Whether the root filesystem is mounted read-only.
    pub readonly_root_filesystem: Option<bool>,
    /// Resource limit triples.
    pub ulimits: Option<Vec<Ulimit>>,
    /// Environment variable pairs.
    pub environment: Option<Vec<KeyValuePair>>,
    /// Additional /etc/hosts entries.
    pub extra_hosts: Option<Vec<HostEntry>>,
    /// Container health check.
    pub health_check: Option<HealthCheck>,
    /// Labels attached to the container.
    pub docker_labels: Option<BTreeMap<String, String>>,
    /// Log driver configuration.
    pub log_configuration: Option<LogConfiguration>,
    /// Linux-specific settings.
    pub linux_parameters: Option<LinuxParameters>,
}

/// A resource limit as a name with soft and hard values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ulimit {
    /// Limit name, e.g. `nofile`.
    #[serde(default)]
    pub name: String,
    /// Soft limit value.
    #[serde(default)]
    pub soft_limit: i64,
    /// Hard limit value.
    #[serde(default)]
    pub hard_limit: i64,
}

/// A named environment variable value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValuePair {
    /// Variable name.
    #[serde(default)]
    pub name: String,
    /// Variable value.
    #[serde(default)]
    pub value: String,
}

/// An extra hosts entry mapping a hostname to an address.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostEntry {
    /// Hostname to add.
    #[serde(default)]
    pub hostname: String,
    /// IP address the hostname resolves to.
    #[serde(default)]
    pub ip_address: String,
}

/// Container health check with durations expressed in seconds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    /// Probe command array.
    #[serde(default)]
    pub command: Vec<String>,
    /// Consecutive failures needed to report unhealthy.
    pub retries: Option<i64>,
    /// Seconds between probes.
    pub interval: Option<i64>,
    /// Seconds before a probe counts as failed.
    pub timeout: Option<i64>,
    /// Grace period in seconds before failures count.
    pub start_period: Option<i64>,
}

/// Log driver name and driver-specific options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfiguration {
    /// Log driver name.
    pub log_driver: Option<String>,
    /// Driver-specific options.
    pub options: Option<BTreeMap<String, String>>,
}

/// Linux-specific container settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinuxParameters {
    /// Whether an init process is run inside the container.
    pub init_process_enabled: Option<bool>,
    /// Shared memory size in MiB.
    pub shared_memory_size: Option<i64>,
    /// Kernel capabilities to add or drop.
    pub capabilities: Option<KernelCapabilities>,
    /// Device mappings.
    pub devices: Option<Vec<Device>>,
    /// Temporary filesystem mounts.
    pub tmpfs: Option<Vec<Tmpfs>>,
}

/// Kernel capability add and drop lists.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelCapabilities {
    /// Capabilities to add.
    pub add: Option<Vec<String>>,
    /// Capabilities to drop.
    pub drop: Option<Vec<String>>,
}

/// A device mapping from host to container.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Host device path; always present in practice.
    #[serde(default)]
    pub host_path: String,
    /// Container device path.
    pub container_path: Option<String>,
    /// Permissions drawn from `read`, `write`, `mknod`.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// A temporary filesystem mount.
///
/// The API has no unset marker for `size`: an absent size deserializes
/// to zero, and zero therefore means "missing" downstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tmpfs {
    /// Mount point inside the container.
    pub container_path: Option<String>,
    /// Mount options, in order.
    #[serde(default)]
    pub mount_options: Vec<String>,
    /// Size limit in MiB.
    #[serde(default)]
    pub size: i64,
}
