/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Telegram bot token. Required for dispatch; its absence is reported
    /// per request, not at startup.
    pub bot_token: Option<String>,
    /// Chat id that always receives the report.
    pub primary_chat_id: Option<String>,
    /// ipinfo.io access token; the lookup works unauthenticated without it.
    pub ipinfo_token: Option<String>,
    pub telegram_api_url: String,
    pub ipinfo_url: String,
    pub bind_addr: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bot_token = env_nonempty("BOT_TOKEN");
        let primary_chat_id = env_nonempty("MAIN_CHAT_ID");
        let ipinfo_token = env_nonempty("IPINFO_TOKEN");

        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .unwrap_or_else(|_| "https://api.telegram.org".to_string());

        let ipinfo_url =
            env::var("IPINFO_URL").unwrap_or_else(|_| "https://ipinfo.io/json".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            bot_token,
            primary_chat_id,
            ipinfo_token,
            telegram_api_url,
            ipinfo_url,
            bind_addr,
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
