// Path: crates/client/src/webhook.rs
//! Delivers alerts as JSON to a webhook.

use crate::http::HttpTransport;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use vigil_api::{Alert, AlertSink};
use vigil_types::error::CheckError;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    /// Chat-compatible rendering.
    text: String,
    #[serde(flatten)]
    alert: &'a Alert,
}

/// Renders an alert as a single chat message.
pub fn render(alert: &Alert) -> String {
    let marker = if alert.is_error {
        "⚠️"
    } else if alert.healthy {
        "🟢"
    } else {
        "🔴"
    };
    let mut text = format!("{marker} [{}] {}", alert.check, alert.summary);
    for line in &alert.details {
        text.push_str("\n  ");
        text.push_str(line);
    }
    text
}

/// POSTs every alert to a fixed URL.
#[derive(Clone, Debug)]
pub struct WebhookAlertSink {
    url: String,
    http: HttpTransport,
}

impl WebhookAlertSink {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CheckError> {
        Ok(Self {
            url: url.to_string(),
            http: HttpTransport::new(url, timeout)?,
        })
    }
}

#[async_trait]
impl AlertSink for WebhookAlertSink {
    async fn send(&self, alert: &Alert) -> anyhow::Result<()> {
        let payload = WebhookPayload {
            text: render(alert),
            alert,
        };
        self.http.post_json(&self.url, &payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_details() {
        let alert = Alert::verdict(
            "maintainers",
            "Maintainers status",
            vec!["(Ethereum: true)".into(), "(Polygon: false)".into()],
            false,
        );
        let text = render(&alert);
        assert!(text.starts_with("🔴 [maintainers] Maintainers status"));
        assert!(text.contains("\n  (Polygon: false)"));
    }

    #[test]
    fn test_payload_flattens_alert() {
        let alert = Alert::error("heartbeat", "rpc unreachable");
        let v = serde_json::to_value(WebhookPayload {
            text: render(&alert),
            alert: &alert,
        })
        .unwrap();
        assert_eq!(v["check"], "heartbeat");
        assert_eq!(v["is_error"], true);
        assert!(v["text"].as_str().unwrap().contains("rpc unreachable"));
    }
}
