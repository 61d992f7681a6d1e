// Path: crates/client/src/comet.rs
//! A CometBFT JSON-RPC client implementing `ChainSource`.

use crate::http::HttpTransport;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use prost::Message;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use vigil_api::ChainSource;
use vigil_types::app::{Envelope, TxBody, TxRaw};
use vigil_types::error::CheckError;

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct StatusResult {
    sync_info: SyncInfo,
}

#[derive(Debug, Deserialize)]
struct SyncInfo {
    latest_block_height: String,
}

#[derive(Debug, Deserialize)]
struct BlockResult {
    block: RpcBlock,
}

#[derive(Debug, Deserialize)]
struct RpcBlock {
    data: RpcBlockData,
}

#[derive(Debug, Deserialize)]
struct RpcBlockData {
    #[serde(default)]
    txs: Option<Vec<String>>,
}

fn into_result<T>(resp: RpcResponse<T>, method: &str) -> Result<T, CheckError> {
    if let Some(err) = resp.error {
        let data = err.data.map(|d| d.to_string()).unwrap_or_default();
        return Err(CheckError::Transport(format!(
            "rpc {method} error {}: {} {}",
            err.code, err.message, data
        )));
    }
    resp.result
        .ok_or_else(|| CheckError::Transport(format!("rpc {method}: response has no result")))
}

/// Decodes one base64 `TxRaw` from a block into its message envelope.
///
/// Undecodable bytes mean the client could not produce envelopes for the
/// block, which is reported as a transport failure.
pub fn decode_tx(height: u64, encoded: &str) -> Result<Envelope, CheckError> {
    let raw_bytes = B64
        .decode(encoded)
        .map_err(|e| CheckError::Transport(format!("block {height}: tx is not base64: {e}")))?;
    let raw = TxRaw::decode(raw_bytes.as_slice())
        .map_err(|e| CheckError::Transport(format!("block {height}: invalid TxRaw: {e}")))?;
    let body = TxBody::decode(raw.body_bytes.as_slice())
        .map_err(|e| CheckError::Transport(format!("block {height}: invalid TxBody: {e}")))?;
    Ok(Envelope::from(body))
}

fn parse_height(s: &str) -> Result<u64, CheckError> {
    s.trim()
        .parse::<u64>()
        .map_err(|e| CheckError::Transport(format!("rpc status: bad latest_block_height '{s}': {e}")))
}

/// Reads heights and block transactions from a CometBFT node.
#[derive(Clone, Debug)]
pub struct CometRpcClient {
    http: HttpTransport,
}

impl CometRpcClient {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, CheckError> {
        Ok(Self {
            http: HttpTransport::new(rpc_url, timeout)?,
        })
    }
}

#[async_trait]
impl ChainSource for CometRpcClient {
    async fn latest_height(&self) -> Result<u64, CheckError> {
        let resp: RpcResponse<StatusResult> = self.http.get_json("/status", &[]).await?;
        let status = into_result(resp, "status")?;
        parse_height(&status.sync_info.latest_block_height)
    }

    async fn transactions(&self, height: u64) -> Result<Vec<Envelope>, CheckError> {
        let resp: RpcResponse<BlockResult> = self
            .http
            .get_json("/block", &[("height", height.to_string())])
            .await?;
        let block = into_result(resp, "block")?;
        let txs = block.block.data.txs.unwrap_or_default();
        log::debug!(target: "client", "block {}: {} transactions", height, txs.len());
        txs.iter().map(|tx| decode_tx(height, tx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::app::ProtoAny;

    fn encoded_tx(type_url: &str) -> String {
        let body = TxBody {
            messages: vec![ProtoAny::new(type_url, vec![1, 2, 3])],
            memo: String::new(),
            timeout_height: 0,
        };
        let raw = TxRaw {
            body_bytes: body.encode_to_vec(),
            auth_info_bytes: vec![],
            signatures: vec![vec![0u8; 64]],
        };
        B64.encode(raw.encode_to_vec())
    }

    #[test]
    fn test_decode_tx_yields_messages() {
        let env = decode_tx(10, &encoded_tx("/cosmos.bank.v1beta1.MsgSend")).unwrap();
        assert_eq!(env.messages.len(), 1);
        assert_eq!(env.messages[0].type_url, "/cosmos.bank.v1beta1.MsgSend");
        assert_eq!(env.messages[0].value, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_tx_rejects_non_base64_as_transport() {
        let err = decode_tx(10, "!!!").unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_block_response_with_null_txs() {
        let json = r#"{"jsonrpc":"2.0","id":-1,"result":{"block":{"header":{"height":"5"},"data":{"txs":null}}}}"#;
        let resp: RpcResponse<BlockResult> = serde_json::from_str(json).unwrap();
        let block = into_result(resp, "block").unwrap();
        assert!(block.block.data.txs.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_rpc_error_is_transport() {
        let json = r#"{"jsonrpc":"2.0","id":-1,"error":{"code":-32603,"message":"Internal error","data":"height 999 must be less than or equal to the current blockchain height 123"}}"#;
        let resp: RpcResponse<BlockResult> = serde_json::from_str(json).unwrap();
        let err = into_result(resp, "block").unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("-32603"));
    }

    #[test]
    fn test_status_height_parses() {
        let json = r#"{"result":{"node_info":{},"sync_info":{"latest_block_height":"12345","catching_up":false}}}"#;
        let resp: RpcResponse<StatusResult> = serde_json::from_str(json).unwrap();
        let status = into_result(resp, "status").unwrap();
        assert_eq!(parse_height(&status.sync_info.latest_block_height).unwrap(), 12345);
        assert!(parse_height("abc").unwrap_err().is_transport());
    }
}
