//! # Bot Configuration Module
//!
//! Process configuration read from the environment (after `.env` has been
//! loaded). Only the bot token is required; everything else has a default.

use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Url;

use crate::banner::MediaSource;
use crate::errors::BotError;
use crate::localization::SUPPORTED_LANGUAGES;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_IMAGE_PATH: &str = "assets/logo.png";
pub const DEFAULT_LANGUAGE: &str = "uk";

/// How updates reach the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotMode {
    /// Long polling through `getUpdates`
    Polling,
    /// Telegram pushes updates to `POST /telegram/webhook`
    Webhook,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Configuration structure for the bot process
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    pub mode: BotMode,
    /// Listen address for the webhook server
    pub bind_addr: SocketAddr,
    /// Public base URL registered with `setWebhook`, if any
    pub public_url: Option<Url>,
    pub banner_image: Option<PathBuf>,
    pub banner_video: Option<PathBuf>,
    /// Language used when the sender's language is unsupported
    pub default_language: String,
    pub log_format: LogFormat,
}

impl BotConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup, used by tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token = get("TELEGRAM_BOT_TOKEN").ok_or_else(|| {
            BotError::MissingCredential("TELEGRAM_BOT_TOKEN is not defined in the environment".to_string())
        })?;

        let mode = match get("BOT_MODE").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("polling") => BotMode::Polling,
            Some("webhook") => BotMode::Webhook,
            Some(other) => {
                return Err(BotError::InvalidConfig(format!(
                    "BOT_MODE must be `polling` or `webhook`, got `{other}`"
                )))
            }
        };

        let bind_raw = get("WEBHOOK_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| {
            BotError::InvalidConfig(format!("WEBHOOK_BIND_ADDR `{bind_raw}`: {e}"))
        })?;

        let public_url = get("WEBHOOK_PUBLIC_URL")
            .map(|raw| {
                Url::parse(&raw)
                    .map_err(|e| BotError::InvalidConfig(format!("WEBHOOK_PUBLIC_URL `{raw}`: {e}")))
            })
            .transpose()?;

        let default_language = get("BOT_LANGUAGE")
            .map(|lang| lang.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        if !SUPPORTED_LANGUAGES.contains(&default_language.as_str()) {
            return Err(BotError::InvalidConfig(format!(
                "BOT_LANGUAGE `{default_language}` is not one of {SUPPORTED_LANGUAGES:?}"
            )));
        }

        let log_format = match get("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        // Unset means the bundled logo; set but blank disables banner media
        let banner_image = match lookup("BANNER_IMAGE_PATH") {
            None => Some(PathBuf::from(DEFAULT_IMAGE_PATH)),
            Some(_) => get("BANNER_IMAGE_PATH").map(PathBuf::from),
        };

        Ok(Self {
            token,
            mode,
            bind_addr,
            public_url,
            banner_image,
            banner_video: get("BANNER_VIDEO_PATH").map(PathBuf::from),
            default_language,
            log_format,
        })
    }

    /// Banner media to send: the video wins over the image when both are set
    pub fn media_source(&self) -> MediaSource {
        match (&self.banner_video, &self.banner_image) {
            (Some(video), _) => MediaSource::Video(video.clone()),
            (None, Some(image)) => MediaSource::Image(image.clone()),
            (None, None) => MediaSource::None,
        }
    }

    /// Full webhook URL registered with Telegram
    pub fn webhook_url(&self) -> Option<Result<Url, BotError>> {
        self.public_url.as_ref().map(|base| {
            let base = base.as_str().trim_end_matches('/');
            Url::parse(&format!("{base}{}", crate::bot::receiver::WEBHOOK_PATH))
                .map_err(|e| BotError::InvalidConfig(format!("webhook url: {e}")))
        })
    }
}
