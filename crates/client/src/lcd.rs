// Path: crates/client/src/lcd.rs
//! A Cosmos REST (LCD) client for the cross-chain registry, implementing `MaintainerSource`.

use crate::http::HttpTransport;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use vigil_api::MaintainerSource;
use vigil_types::app::{AccountAddress, ChainName};
use vigil_types::error::CheckError;

/// `ChainStatus::Activated` in the nexus module.
const CHAIN_STATUS_ACTIVATED: &str = "1";

#[derive(Debug, Deserialize)]
struct ChainsResponse {
    #[serde(default)]
    chains: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChainMaintainersResponse {
    #[serde(default)]
    maintainers: Vec<String>,
}

fn parse_maintainers(chain: &str, raw: &[String]) -> Result<Vec<AccountAddress>, CheckError> {
    raw.iter()
        .map(|m| {
            AccountAddress::from_bech32(m).map_err(|e| {
                CheckError::Transport(format!("chain {chain}: malformed maintainer '{m}': {e}"))
            })
        })
        .collect()
}

/// Reads activated chains and their maintainer sets over REST.
#[derive(Clone, Debug)]
pub struct LcdClient {
    http: HttpTransport,
}

impl LcdClient {
    pub fn new(lcd_url: &str, timeout: Duration) -> Result<Self, CheckError> {
        Ok(Self {
            http: HttpTransport::new(lcd_url, timeout)?,
        })
    }
}

#[async_trait]
impl MaintainerSource for LcdClient {
    async fn chains(&self) -> Result<Vec<ChainName>, CheckError> {
        let resp: ChainsResponse = self
            .http
            .get_json(
                "/axelar/nexus/v1beta1/chains",
                &[("status", CHAIN_STATUS_ACTIVATED.to_string())],
            )
            .await?;
        log::debug!(target: "client", "registry reports {} activated chains", resp.chains.len());
        Ok(resp.chains)
    }

    async fn chain_maintainers(&self, chain: &str) -> Result<Vec<AccountAddress>, CheckError> {
        let path = format!("/axelar/nexus/v1beta1/chain_maintainers/{chain}");
        let resp: ChainMaintainersResponse = self.http.get_json(&path, &[]).await?;
        parse_maintainers(chain, &resp.maintainers)
    }
}
