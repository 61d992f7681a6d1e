// Path: crates/node/src/bin/vigil.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

use anyhow::{anyhow, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vigil_api::{AlertSink, ChainSource, HeartbeatIndexer, MaintainerSource};
use vigil_client::{AxelarscanClient, CometRpcClient, LcdClient, WebhookAlertSink};
use vigil_monitor::heartbeat::HeartbeatMatcher;
use vigil_monitor::{
    ChainScanLiveness, IndexerLiveness, LivenessCheck, LivenessParams, MaintainerAuditor, Monitor,
    ResultPublisher,
};
use vigil_telemetry::init::LogFormat;
use vigil_telemetry::SharedStatus;
use vigil_types::config::{HeartbeatSource, MonitorConfig};

#[derive(Parser, Debug)]
#[clap(version, about)]
struct VigilOpts {
    /// Path to vigil.toml.
    #[clap(long, env = "VIGIL_CONFIG", default_value = "vigil.toml")]
    config: PathBuf,
    /// Run every enabled check once and exit; non-zero if any check errored.
    #[clap(long)]
    once: bool,
    #[clap(
        long,
        env = "TELEMETRY_ADDR",
        help = "Overrides telemetry.listen_addr in vigil.toml"
    )]
    listen_addr: Option<String>,
    /// Human-readable logs instead of JSON.
    #[clap(long)]
    pretty: bool,
}

fn liveness_check(cfg: &MonitorConfig, timeout: Duration) -> Result<Box<dyn LivenessCheck>> {
    let hb = &cfg.heartbeat;
    match hb.source {
        HeartbeatSource::Chain => {
            let chain: Arc<dyn ChainSource> =
                Arc::new(CometRpcClient::new(&cfg.general.rpc_url, timeout)?);
            let matcher = HeartbeatMatcher::new(cfg.broadcaster()?, cfg.fallback_senders()?);
            Ok(Box::new(ChainScanLiveness::new(
                chain,
                matcher,
                LivenessParams::from_config(hb),
            )))
        }
        HeartbeatSource::Indexer => {
            let url = hb
                .indexer_url
                .as_deref()
                .ok_or_else(|| anyhow!("heartbeat.indexer_url is required for the Indexer source"))?;
            let indexer: Arc<dyn HeartbeatIndexer> = Arc::new(AxelarscanClient::new(url, timeout)?);
            Ok(Box::new(IndexerLiveness::new(
                indexer,
                cfg.general.broadcaster_acc.clone(),
                hb,
            )))
        }
    }
}

fn build_monitor(cfg: &MonitorConfig, status: SharedStatus) -> Result<Monitor> {
    let timeout = Duration::from_secs(cfg.general.request_timeout_secs);

    let mut sinks: Vec<Arc<dyn AlertSink>> = Vec::new();
    if let Some(url) = &cfg.alert.webhook_url {
        sinks.push(Arc::new(WebhookAlertSink::new(url, timeout)?));
    }
    let publisher = ResultPublisher::new(status, sinks, cfg.alert.notify_healthy);
    let mut monitor = Monitor::new(&cfg.general, publisher);

    if cfg.heartbeat.enabled {
        let check = liveness_check(cfg, timeout)?;
        tracing::info!(target: "vigil", source = ?check.source(), "heartbeat check enabled");
        monitor = monitor.with_liveness(check);
    }
    if cfg.maintainers.enabled {
        let lcd_url = cfg
            .general
            .lcd_url
            .as_deref()
            .ok_or_else(|| anyhow!("general.lcd_url is required by the maintainers check"))?;
        let source: Arc<dyn MaintainerSource> = Arc::new(LcdClient::new(lcd_url, timeout)?);
        monitor = monitor.with_auditor(MaintainerAuditor::from_config(source, cfg)?);
        tracing::info!(target: "vigil", "maintainers check enabled");
    }
    Ok(monitor)
}

fn telemetry_addr(opts: &VigilOpts, cfg: &MonitorConfig) -> Result<SocketAddr> {
    let raw = opts
        .listen_addr
        .as_deref()
        .unwrap_or(&cfg.telemetry.listen_addr);
    raw.parse()
        .map_err(|e| anyhow!("invalid telemetry listen address '{raw}': {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = VigilOpts::parse();

    // 1. Initialize tracing FIRST
    let format = if opts.pretty {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    };
    vigil_telemetry::init::init_tracing(format)?;
    vigil_telemetry::prometheus::install()?;

    let cfg = vigil_monitor::config::load(&opts.config)?;
    tracing::info!(target: "vigil", event = "startup", config = %opts.config.display());

    let shutdown = CancellationToken::new();
    let status = vigil_telemetry::new_shared_status();

    // 2. Spawn the telemetry server
    let addr = telemetry_addr(&opts, &cfg)?;
    let server_stop = shutdown.clone();
    let server = tokio::spawn(vigil_telemetry::http::run_server(
        addr,
        status.clone(),
        async move { server_stop.cancelled().await },
    ));

    let monitor = build_monitor(&cfg, status)?;

    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!(target: "vigil", event = "shutdown", reason = "ctrl-c"),
            Err(e) => tracing::error!(target: "vigil", error = %e, "failed to listen for ctrl-c"),
        }
        signal.cancel();
    });

    let mut failed = false;
    if opts.once {
        let report = monitor.run_once(&shutdown).await;
        for (check, err) in &report.errors {
            tracing::error!(target: "vigil", check, error = %err, "check did not produce a verdict");
        }
        failed = report.has_errors();
    } else {
        monitor.run(shutdown.clone()).await;
    }

    shutdown.cancel();
    if let Err(e) = server.await {
        tracing::warn!(target: "vigil", error = %e, "telemetry server task ended abnormally");
    }
    tracing::info!(target: "vigil", event = "shutdown", reason = "complete");

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const BROADCASTER: &str = "axelar17xpfvakm2amg962yls6f84z3kell8c5l5h4gqu";

    fn config(extra: &str) -> MonitorConfig {
        let raw = format!(
            r#"
[general]
rpc_url = "http://localhost:26657"
lcd_url = "http://localhost:1317"
broadcaster_acc = "{BROADCASTER}"
validator_acc = "{BROADCASTER}"
{extra}
"#
        );
        toml::from_str(&raw).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        VigilOpts::command().debug_assert();
    }

    #[test]
    fn test_flag_overrides_config_listen_addr() {
        let cfg = config("");
        let opts = VigilOpts::parse_from(["vigil", "--listen-addr", "0.0.0.0:9000"]);
        assert_eq!(telemetry_addr(&opts, &cfg).unwrap().port(), 9000);
        let opts = VigilOpts::parse_from(["vigil", "--once"]);
        assert!(opts.once);
        assert_eq!(telemetry_addr(&opts, &cfg).unwrap().port(), 9617);
    }

    #[test]
    fn test_builds_monitor_for_both_sources() {
        let status = vigil_telemetry::new_shared_status();
        build_monitor(&config(""), status.clone()).unwrap();

        let mut cfg = config("");
        cfg.heartbeat.source = HeartbeatSource::Indexer;
        cfg.heartbeat.indexer_url = Some("https://api.axelarscan.io".into());
        cfg.alert.webhook_url = Some("https://hooks.example.invalid/vigil".into());
        build_monitor(&cfg, status).unwrap();
    }
}
