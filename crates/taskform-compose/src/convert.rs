//! Field-level translation from task definition containers to compose
//! services.
//!
//! Every conversion is a pure function of its input: no shared state, no
//! I/O, deterministic output. The entry points copy direct-mapped fields
//! and delegate compound fields to one helper per attribute group,
//! aborting on the first validation error.

use std::collections::BTreeMap;
use std::time::Duration;

use taskform_common::constants::COMPOSE_SCHEMA_VERSION;
use taskform_common::error::{Result, TaskformError};
use taskform_task::definition::{
    ContainerDefinition, Device, HealthCheck, HostEntry, KernelCapabilities, KeyValuePair,
    LogConfiguration, TaskDefinition, Tmpfs, Ulimit,
};

use crate::service::{ComposeFile, HealthCheckConfig, Logging, Service, UlimitsConfig};
use crate::size::format_mebibytes;

/// Translates a whole task definition into a compose descriptor.
///
/// Services are keyed by container name. Translation aborts on the first
/// container that fails to convert; no partial descriptor is produced.
///
/// # Errors
///
/// Returns a validation error if any container definition is invalid.
pub fn convert_task_definition(task: &TaskDefinition) -> Result<ComposeFile> {
    tracing::debug!(
        family = task.family.as_deref().unwrap_or_default(),
        containers = task.container_definitions.len(),
        "translating task definition"
    );

    let mut services = BTreeMap::new();
    for container in &task.container_definitions {
        let service = convert_to_compose_service(container)?;
        let _ = services.insert(service.name.clone(), service);
    }

    Ok(ComposeFile {
        version: COMPOSE_SCHEMA_VERSION.to_owned(),
        services,
    })
}

/// Translates one container definition into a compose service record.
///
/// Scalar and list fields are copied with type adaptation only; compound
/// fields go through the per-field conversions below. Linux parameters
/// populate the init, shared-memory, capability, device, and tmpfs fields
/// only when the block is present.
///
/// # Errors
///
/// Returns a validation error if a tmpfs entry is missing its container
/// path or size.
pub fn convert_to_compose_service(container: &ContainerDefinition) -> Result<Service> {
    let mut service = Service {
        name: container.name.clone().unwrap_or_default(),
        image: container.image.clone(),
        command: container.command.clone(),
        entrypoint: container.entry_point.clone(),
        working_dir: container.working_directory.clone(),
        hostname: container.hostname.clone(),
        links: container.links.clone().unwrap_or_default(),
        dns: container.dns_servers.clone().unwrap_or_default(),
        dns_search: container.dns_search_domains.clone().unwrap_or_default(),
        user: container.user.clone(),
        security_opt: container.docker_security_options.clone().unwrap_or_default(),
        tty: container.pseudo_terminal.unwrap_or_default(),
        privileged: container.privileged.unwrap_or_default(),
        read_only: container.readonly_root_filesystem.unwrap_or_default(),
        ulimits: convert_ulimits(container.ulimits.as_deref().unwrap_or_default()),
        environment: convert_environment(container.environment.as_deref().unwrap_or_default()),
        extra_hosts: convert_extra_hosts(container.extra_hosts.as_deref().unwrap_or_default()),
        healthcheck: convert_health_check(container.health_check.as_ref()),
        labels: convert_docker_labels(container.docker_labels.as_ref()),
        logging: convert_logging(container.log_configuration.as_ref()),
        ..Service::default()
    };

    if let Some(linux) = container.linux_parameters.as_ref() {
        service.init = linux.init_process_enabled;
        service.shm_size = convert_shm_size(linux.shared_memory_size);
        service.cap_add = convert_cap_add(linux.capabilities.as_ref());
        service.cap_drop = convert_cap_drop(linux.capabilities.as_ref());
        service.devices = convert_devices(linux.devices.as_deref().unwrap_or_default());
        service.tmpfs = convert_to_tmpfs(linux.tmpfs.as_deref().unwrap_or_default())?;
    }

    Ok(service)
}

/// Collapses resource limit triples into a name-keyed soft/hard map.
///
/// Later entries overwrite earlier ones with the same name; limit values
/// pass through without validation.
fn convert_ulimits(ulimits: &[Ulimit]) -> BTreeMap<String, UlimitsConfig> {
    let mut converted = BTreeMap::new();
    for ulimit in ulimits {
        let _ = converted.insert(
            ulimit.name.clone(),
            UlimitsConfig {
                soft: ulimit.soft_limit,
                hard: ulimit.hard_limit,
            },
        );
    }
    converted
}

/// Renders tmpfs mounts as `<path>:size=<size>[,option,...]` strings.
///
/// A zero size counts as missing: the source schema has no unset marker
/// for it, so zero and absent are indistinguishable and both reject.
///
/// # Errors
///
/// Returns a validation error naming the first entry without a container
/// path or without a positive size; the path check runs first.
fn convert_to_tmpfs(mounts: &[Tmpfs]) -> Result<Vec<String>> {
    let mut converted = Vec::with_capacity(mounts.len());
    for (index, mount) in mounts.iter().enumerate() {
        let path =
            mount
                .container_path
                .as_deref()
                .ok_or(TaskformError::MissingAttribute {
                    kind: "tmpfs",
                    index,
                    attribute: "container path",
                })?;
        if mount.size <= 0 {
            return Err(TaskformError::MissingAttribute {
                kind: "tmpfs",
                index,
                attribute: "size",
            });
        }

        let mut rendered = format!("{path}:size={}", format_mebibytes(mount.size));
        if !mount.mount_options.is_empty() {
            rendered.push(',');
            rendered.push_str(&mount.mount_options.join(","));
        }
        converted.push(rendered);
    }
    Ok(converted)
}

/// Renders device mappings as colon-delimited compose device strings.
fn convert_devices(devices: &[Device]) -> Vec<String> {
    devices.iter().map(device_string).collect()
}

fn device_string(device: &Device) -> String {
    let mut rendered = device.host_path.clone();
    if let Some(container_path) = device.container_path.as_deref() {
        rendered.push(':');
        rendered.push_str(container_path);

        let permissions = permission_abbrev(&device.permissions);
        if !permissions.is_empty() {
            rendered.push(':');
            rendered.push_str(&permissions);
        }
    }
    rendered
}

/// First-letter abbreviation in the fixed read, write, mknod order.
fn permission_abbrev(permissions: &[String]) -> String {
    ["read", "write", "mknod"]
        .iter()
        .filter(|known| permissions.iter().any(|p| p == *known))
        .map(|known| &known[..1])
        .collect()
}

/// Formats the shared memory size as a human-readable binary size string.
fn convert_shm_size(size: Option<i64>) -> Option<String> {
    size.map(format_mebibytes)
}

/// Copies the capability add list verbatim.
fn convert_cap_add(capabilities: Option<&KernelCapabilities>) -> Vec<String> {
    capabilities
        .and_then(|caps| caps.add.clone())
        .unwrap_or_default()
}

/// Copies the capability drop list verbatim.
fn convert_cap_drop(capabilities: Option<&KernelCapabilities>) -> Vec<String> {
    capabilities
        .and_then(|caps| caps.drop.clone())
        .unwrap_or_default()
}

/// Copies container labels onto the service.
fn convert_docker_labels(labels: Option<&BTreeMap<String, String>>) -> BTreeMap<String, String> {
    labels.cloned().unwrap_or_default()
}

/// Collapses environment pairs into a name-keyed map, last write wins.
fn convert_environment(environment: &[KeyValuePair]) -> BTreeMap<String, String> {
    let mut converted = BTreeMap::new();
    for pair in environment {
        let _ = converted.insert(pair.name.clone(), pair.value.clone());
    }
    converted
}

/// Renders extra host entries as `<hostname>:<ip>` strings in input order.
fn convert_extra_hosts(extra_hosts: &[HostEntry]) -> Vec<String> {
    extra_hosts
        .iter()
        .map(|entry| format!("{}:{}", entry.hostname, entry.ip_address))
        .collect()
}

/// Converts the health check, widening the retry count and turning second
/// counts into durations. Unset source fields stay unset.
#[allow(clippy::cast_sign_loss)]
fn convert_health_check(health_check: Option<&HealthCheck>) -> Option<HealthCheckConfig> {
    health_check.map(|check| HealthCheckConfig {
        test: check.command.clone(),
        retries: check.retries.map(|retries| retries as u64),
        interval: check.interval.map(seconds),
        timeout: check.timeout.map(seconds),
        start_period: check.start_period.map(seconds),
    })
}

#[allow(clippy::cast_sign_loss)]
fn seconds(value: i64) -> Duration {
    Duration::from_secs(value as u64)
}

/// Converts the log configuration, copying driver-specific options.
fn convert_logging(logging: Option<&LogConfiguration>) -> Option<Logging> {
    logging.map(|config| Logging {
        driver: config.log_driver.clone().unwrap_or_default(),
        options: config.options.clone().unwrap_or_default(),
    })
}
