// Path: crates/types/src/config/mod.rs

//! Configuration structures for the monitor (`vigil.toml`).
use crate::app::AccountAddress;
use crate::error::CheckError;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}
fn default_interval_secs() -> u64 {
    60
}
fn default_check_timeout_secs() -> u64 {
    120
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_check_n() -> u32 {
    5
}
fn default_window_length() -> u64 {
    50
}
fn default_try_cnt() -> u32 {
    5
}
fn default_miss_threshold() -> u32 {
    3
}
fn default_max_age_secs() -> u64 {
    300
}
fn default_listen_addr() -> String {
    "127.0.0.1:9617".to_string()
}

/// The top-level configuration file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitorConfig {
    /// Endpoints, identities and scheduling.
    pub general: GeneralConfig,
    /// Heartbeat liveness check parameters.
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,
    /// Maintainer-set membership check parameters.
    #[serde(default)]
    pub maintainers: MaintainersConfig,
    /// Alert delivery.
    #[serde(default)]
    pub alert: AlertConfig,
    /// Metrics and status HTTP server.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Endpoints, identities and scheduling shared by both checks.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    /// CometBFT JSON-RPC endpoint used for heights and block transactions.
    pub rpc_url: String,
    /// Cosmos REST endpoint used for chain and maintainer queries.
    #[serde(default)]
    pub lcd_url: Option<String>,
    /// Bech32 address of the broadcaster account expected to submit heartbeats.
    pub broadcaster_acc: String,
    /// Bech32 address of the validator whose maintainer membership is audited.
    #[serde(default)]
    pub validator_acc: Option<String>,
    /// Additional senders whose heartbeats are accepted (e.g. a known relayer).
    #[serde(default)]
    pub fallback_senders: Vec<String>,
    /// Chains that are never audited and always count as maintained.
    /// Matched case-insensitively.
    #[serde(default)]
    pub except_chains: Vec<String>,
    /// Seconds between check cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Deadline for a single check invocation, in seconds.
    #[serde(default = "default_check_timeout_secs")]
    pub check_timeout_secs: u64,
    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Where heartbeat evidence comes from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum HeartbeatSource {
    /// Scan blocks on chain for the nested heartbeat envelope.
    #[default]
    Chain,
    /// Ask an indexer for recent heartbeats and check their age.
    Indexer,
}

/// Heartbeat liveness check parameters.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HeartbeatConfig {
    /// Whether the check runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// The evidence source.
    #[serde(default)]
    pub source: HeartbeatSource,
    /// Number of windows (or indexer records) to check per cycle.
    #[serde(default = "default_check_n")]
    pub check_n: u32,
    /// Heartbeat window length in blocks.
    #[serde(default = "default_window_length")]
    pub window_length: u64,
    /// Consecutive heights searched from each window boundary.
    #[serde(default = "default_try_cnt")]
    pub try_cnt: u32,
    /// The check fails once this many windows are missed.
    #[serde(default = "default_miss_threshold")]
    pub miss_threshold: u32,
    /// Base URL of the heartbeat indexer; required for the `Indexer` source.
    #[serde(default)]
    pub indexer_url: Option<String>,
    /// Maximum accepted age of an indexed heartbeat, in seconds.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source: HeartbeatSource::default(),
            check_n: default_check_n(),
            window_length: default_window_length(),
            try_cnt: default_try_cnt(),
            miss_threshold: default_miss_threshold(),
            indexer_url: None,
            max_age_secs: default_max_age_secs(),
        }
    }
}

/// Maintainer-set membership check parameters.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MaintainersConfig {
    /// Whether the check runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MaintainersConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Alert delivery configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlertConfig {
    /// Webhook receiving JSON alerts. Alerts are only logged when unset.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Whether healthy outcomes are also delivered.
    #[serde(default = "default_true")]
    pub notify_healthy: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            notify_healthy: true,
        }
    }
}

/// Metrics and status HTTP server configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TelemetryConfig {
    /// Listen address for `/metrics`, `/healthz`, `/readyz` and `/status`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl MonitorConfig {
    /// Rejects configurations the engine cannot run with.
    pub fn validate(&self) -> crate::Result<()> {
        let hb = &self.heartbeat;
        if hb.enabled {
            if hb.check_n == 0 {
                return Err(CheckError::InvalidConfig("heartbeat.check_n must be > 0".into()));
            }
            if hb.miss_threshold == 0 {
                return Err(CheckError::InvalidConfig(
                    "heartbeat.miss_threshold must be > 0".into(),
                ));
            }
            match hb.source {
                HeartbeatSource::Chain => {
                    if hb.window_length == 0 {
                        return Err(CheckError::InvalidConfig(
                            "heartbeat.window_length must be > 0".into(),
                        ));
                    }
                    if hb.try_cnt == 0 {
                        return Err(CheckError::InvalidConfig(
                            "heartbeat.try_cnt must be > 0".into(),
                        ));
                    }
                }
                HeartbeatSource::Indexer => {
                    if hb.indexer_url.is_none() {
                        return Err(CheckError::InvalidConfig(
                            "heartbeat.indexer_url is required for the Indexer source".into(),
                        ));
                    }
                }
            }
            self.broadcaster()?;
            self.fallback_senders()?;
        }
        if self.maintainers.enabled {
            if self.general.lcd_url.is_none() {
                return Err(CheckError::InvalidConfig(
                    "general.lcd_url is required when the maintainers check is enabled".into(),
                ));
            }
            self.validator()?;
        }
        Ok(())
    }

    /// The parsed broadcaster address.
    pub fn broadcaster(&self) -> crate::Result<AccountAddress> {
        Ok(AccountAddress::from_bech32(&self.general.broadcaster_acc)?)
    }

    /// The parsed fallback sender allow-list.
    pub fn fallback_senders(&self) -> crate::Result<Vec<AccountAddress>> {
        self.general
            .fallback_senders
            .iter()
            .map(|s| AccountAddress::from_bech32(s).map_err(CheckError::from))
            .collect()
    }

    /// The parsed validator address.
    pub fn validator(&self) -> crate::Result<AccountAddress> {
        let acc = self.general.validator_acc.as_deref().ok_or_else(|| {
            CheckError::InvalidConfig("general.validator_acc is required".into())
        })?;
        Ok(AccountAddress::from_bech32(acc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8, hrp: &str) -> String {
        AccountAddress::from_bytes(vec![byte; 20])
            .to_bech32(hrp)
            .unwrap()
    }

    fn minimal(extra: &str) -> String {
        format!(
            r#"
[general]
rpc_url = "http://localhost:26657"
lcd_url = "http://localhost:1317"
broadcaster_acc = "{}"
validator_acc = "{}"
{extra}
"#,
            addr(1, "axelar"),
            addr(2, "axelarvaloper"),
        )
    }

    #[test]
    fn test_defaults_apply() {
        let cfg: MonitorConfig = toml::from_str(&minimal("")).unwrap();
        assert_eq!(cfg.heartbeat.check_n, 5);
        assert_eq!(cfg.heartbeat.window_length, 50);
        assert_eq!(cfg.heartbeat.try_cnt, 5);
        assert_eq!(cfg.heartbeat.miss_threshold, 3);
        assert_eq!(cfg.heartbeat.source, HeartbeatSource::Chain);
        assert_eq!(cfg.general.interval_secs, 60);
        assert_eq!(cfg.telemetry.listen_addr, "127.0.0.1:9617");
        assert!(cfg.maintainers.enabled);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_indexer_requires_url() {
        let mut cfg: MonitorConfig = toml::from_str(&minimal("")).unwrap();
        cfg.heartbeat.source = HeartbeatSource::Indexer;
        assert!(matches!(cfg.validate(), Err(CheckError::InvalidConfig(_))));
        cfg.heartbeat.indexer_url = Some("https://api.axelarscan.io".into());
        cfg.validate().unwrap();
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut cfg: MonitorConfig = toml::from_str(&minimal("")).unwrap();
        cfg.heartbeat.window_length = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_bad_fallback_sender_rejected() {
        let cfg: MonitorConfig =
            toml::from_str(&minimal(r#"fallback_senders = ["nope"]"#)).unwrap();
        assert!(matches!(cfg.validate(), Err(CheckError::InvalidAddress(_))));
    }

    #[test]
    fn test_maintainers_need_lcd() {
        let mut cfg: MonitorConfig = toml::from_str(&minimal("")).unwrap();
        cfg.general.lcd_url = None;
        assert!(cfg.validate().is_err());
        cfg.maintainers.enabled = false;
        cfg.validate().unwrap();
    }
}
