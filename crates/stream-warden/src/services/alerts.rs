//! Outbound alert delivery
//!
//! Alerts are fire-and-forget: delivery failures are logged and swallowed,
//! never surfaced to the lifecycle operation that raised them.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Delivery timeout for one alert
const ALERT_TIMEOUT: Duration = Duration::from_secs(5);

/// Best-effort notification channel
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Telegram Bot API sink
pub struct TelegramAlertSink {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramAlertSink {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        let client = Client::builder()
            .timeout(ALERT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            bot_token,
            chat_id,
        }
    }
}

#[async_trait]
impl AlertSink for TelegramAlertSink {
    async fn notify(&self, message: &str) {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": message,
            "parse_mode": "HTML",
        });

        match self.client.post(&url).json(&body).send().await {
            Ok(response) if !response.status().is_success() => {
                warn!("Telegram alert rejected: HTTP {}", response.status());
            }
            Ok(_) => debug!("Alert delivered: {}", message),
            Err(e) => warn!("Telegram alert failed: {}", e),
        }
    }
}

/// Sink used when no alert channel is configured
pub struct NoopAlertSink;

#[async_trait]
impl AlertSink for NoopAlertSink {
    async fn notify(&self, message: &str) {
        debug!("Alert (no sink configured): {}", message);
    }
}
