// Path: crates/client/src/axelarscan.rs
//! An Axelarscan client implementing `HeartbeatIndexer`.

use crate::http::HttpTransport;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use vigil_api::{HeartbeatIndexer, HeartbeatRecord};
use vigil_types::error::CheckError;

#[derive(Debug, Deserialize)]
struct HeartbeatResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Vec<HeartbeatRecord>,
}

/// Queries recent heartbeats of an address from the indexer API.
#[derive(Clone, Debug)]
pub struct AxelarscanClient {
    http: HttpTransport,
}

impl AxelarscanClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CheckError> {
        Ok(Self {
            http: HttpTransport::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl HeartbeatIndexer for AxelarscanClient {
    async fn recent_heartbeats(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<Vec<HeartbeatRecord>, CheckError> {
        let resp: HeartbeatResponse = self
            .http
            .get_json(
                "/validator/heartbeat",
                &[("address", address.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        log::debug!(
            target: "client",
            "indexer returned {} heartbeats for {} (status {:?})",
            resp.data.len(),
            address,
            resp.status
        );
        Ok(resp.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape() {
        let json = r#"{"status":"success","data":[{"height":100,"tx_hash":"ABC","timestamp":"2024-01-01T00:00:00Z"}]}"#;
        let resp: HeartbeatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status.as_deref(), Some("success"));
        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.data[0].height, 100);
        assert_eq!(resp.data[0].tx_hash, "ABC");
    }
}
