// Path: crates/monitor/src/config.rs
//! Configuration structures for the check engine.

use std::path::Path;
use vigil_types::error::CheckError;

// Re-export the config types from the central `types` crate
// so binaries only need to depend on the engine.
pub use vigil_types::config::{
    AlertConfig, GeneralConfig, HeartbeatConfig, HeartbeatSource, MaintainersConfig,
    MonitorConfig, TelemetryConfig,
};

/// Reads, parses and validates a `vigil.toml`.
pub fn load(path: &Path) -> Result<MonitorConfig, CheckError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CheckError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
    })?;
    let config: MonitorConfig = toml::from_str(&raw).map_err(|e| {
        CheckError::InvalidConfig(format!("cannot parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}
