//! Workspace-wide constants and default file names.

/// Compose schema version emitted in generated descriptors.
pub const COMPOSE_SCHEMA_VERSION: &str = "3.4";

/// Default task definition input file name.
pub const DEFAULT_TASK_FILE: &str = "taskdef.json";

/// Default name for the generated compose descriptor.
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.local.yml";

/// Application name used in CLI output.
pub const APP_NAME: &str = "taskform";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "tkf";
