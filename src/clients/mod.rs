/// External API clients module
use crate::domain::GeoInfo;
use crate::errors::{ApiError, ApiResult};
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("notify-relay/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// IP geolocation lookup client (ipinfo.io)
pub struct IpinfoClient {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl IpinfoClient {
    pub fn new(base_url: String, token: Option<String>) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
            token,
        })
    }

    /// Look up geolocation data for the requesting address.
    pub async fn lookup(&self) -> ApiResult<GeoInfo> {
        let mut req = self.http_client.get_client().get(&self.base_url);

        if let Some(token) = &self.token {
            req = req.query(&[("token", token)]);
        }

        let resp = req.send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "ipinfo request failed with status {}",
                resp.status()
            )));
        }

        let geo = resp.json().await?;
        Ok(geo)
    }
}

/// Telegram Bot API client
pub struct TelegramClient {
    http_client: HttpClient,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(base_url: String, token: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
            token,
        })
    }

    /// Send a Markdown text message to a chat.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> ApiResult<()> {
        self.call(
            "sendMessage",
            &serde_json::json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }),
        )
        .await
    }

    /// Send a photo (base64 data URI) with a caption to a chat.
    pub async fn send_photo(&self, chat_id: &str, photo: &str, caption: &str) -> ApiResult<()> {
        self.call(
            "sendPhoto",
            &serde_json::json!({
                "chat_id": chat_id,
                "photo": photo,
                "caption": caption,
            }),
        )
        .await
    }

    async fn call(&self, method: &str, body: &serde_json::Value) -> ApiResult<()> {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);

        let resp = self
            .http_client
            .get_client()
            .post(&url)
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(ApiError::Upstream(format!(
                "Telegram {method} failed with status {status}: {body}"
            )));
        }

        Ok(())
    }
}
