// Path: crates/client/src/http.rs
//! A small JSON-over-HTTP transport with bounded retries.

use reqwest::{
    header::{HeaderValue, RETRY_AFTER},
    Client, StatusCode,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use vigil_types::error::CheckError;

const HTTP_RETRIES: usize = 3;
const BASE_BACKOFF_MS: u64 = 200;
const MAX_BACKOFF_MS: u64 = 2_000;
const MAX_RETRY_AFTER_SECS: u64 = 5;

fn retry_delay(attempt: usize, retry_after: Option<&HeaderValue>) -> Duration {
    if let Some(secs) = retry_after
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
    {
        return Duration::from_secs(secs.min(MAX_RETRY_AFTER_SECS));
    }
    let shift = u32::try_from(attempt).unwrap_or(u32::MAX).min(16);
    let ms = BASE_BACKOFF_MS.saturating_mul(1u64 << shift).min(MAX_BACKOFF_MS);
    Duration::from_millis(ms)
}

/// A printable, bounded excerpt of a response body for error messages.
pub(crate) fn ascii_snippet(bytes: &[u8]) -> String {
    let s = String::from_utf8_lossy(bytes);
    let s: String = s.trim().chars().take(160).collect();
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// A base URL plus a shared `reqwest` client.
///
/// Every failure is reported as `CheckError::Transport`: the caller only needs
/// to know the request could not be completed.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base: String,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport for `base`, applying `timeout` to every request.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, CheckError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The base URL without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// GETs `{base}{path}` with `query` and decodes the JSON body.
    ///
    /// Send errors, 429 and 5xx responses are retried with exponential backoff.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CheckError> {
        let url = format!("{}{}", self.base, path);
        let mut attempt = 0;
        let (status, body) = loop {
            let resp = match self.client.get(&url).query(query).send().await {
                Ok(r) => r,
                Err(e) => {
                    if attempt < HTTP_RETRIES {
                        log::debug!(target: "client", "GET {} send error (attempt {}): {}; retrying", url, attempt, e);
                        sleep(retry_delay(attempt, None)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(CheckError::Transport(format!(
                        "GET {url} failed after {HTTP_RETRIES} retries: {e}"
                    )));
                }
            };

            let status = resp.status();
            let retry_after = resp.headers().get(RETRY_AFTER).cloned();
            let body = resp
                .bytes()
                .await
                .map_err(|e| CheckError::Transport(format!("GET {url}: reading body: {e}")))?;

            if is_retryable(status) && attempt < HTTP_RETRIES {
                let delay = retry_delay(attempt, retry_after.as_ref());
                log::debug!(
                    target: "client",
                    "GET {} returned HTTP {}; backoff {:?}; body='{}'",
                    url,
                    status.as_u16(),
                    delay,
                    ascii_snippet(&body)
                );
                sleep(delay).await;
                attempt += 1;
                continue;
            }
            break (status, body);
        };

        if !status.is_success() {
            return Err(CheckError::Transport(format!(
                "GET {url} returned HTTP {}: {}",
                status.as_u16(),
                ascii_snippet(&body)
            )));
        }
        serde_json::from_slice(&body).map_err(|e| {
            CheckError::Transport(format!(
                "GET {url}: unexpected response body ({e}): {}",
                ascii_snippet(&body)
            ))
        })
    }

    /// POSTs `body` as JSON to the absolute `url`. Not retried.
    pub async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<(), CheckError> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| CheckError::Transport(format!("POST {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(CheckError::Transport(format!(
                "POST {url} returned HTTP {}: {}",
                status.as_u16(),
                ascii_snippet(&body)
            )));
        }
        Ok(())
    }
}
