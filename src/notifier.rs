use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{Config, Settings};
use crate::event_log::EventLog;

/// Delivers a text message to whoever watches the accounts.
#[async_trait::async_trait]
pub trait Notifier {
    /// `true` only when the message was accepted.
    async fn send_message(&self, text: &str) -> bool;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API `sendMessage` client.
pub struct TelegramNotifier {
    http: Client,
    api_url: String,
    token: String,
    chat_id: String,
    event_log: EventLog,
}

impl TelegramNotifier {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        event_log: EventLog,
    ) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
            event_log,
        }
    }

    pub fn from_config(config: &Config, settings: &Settings, event_log: EventLog) -> Self {
        Self::new(
            settings.telegram_api_url.clone(),
            config.tg_bot_token.clone(),
            config.tg_group_id.clone(),
            event_log,
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.token
        )
    }

    fn report_failure(&self, reason: &str) -> bool {
        warn!("Unable to send telegram message: {}", reason);
        self.event_log
            .write(&format!("Unable to send telegram message. {}", reason));
        false
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> bool {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = match self.http.post(self.endpoint()).json(&request).send().await {
            Ok(response) => response,
            Err(e) => return self.report_failure(&format!("Error: {}", e)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return self.report_failure(&format!("Status: {}", status.as_u16()));
        }

        match response.json::<SendMessageResponse>().await {
            Ok(SendMessageResponse { ok: true, .. }) => {
                info!("Telegram message sent to {}", self.chat_id);
                true
            }
            Ok(SendMessageResponse { description, .. }) => self.report_failure(&format!(
                "Not acknowledged: {}",
                description.as_deref().unwrap_or("no description")
            )),
            Err(e) => self.report_failure(&format!("Unreadable response: {}", e)),
        }
    }
}
