use anyhow::{Context, Result};
use promo_bot::bot::{run_polling, run_webhook, UpdateDispatcher};
use promo_bot::config::{BotConfig, BotMode, LogFormat};
use promo_bot::content::ContentCatalog;
use promo_bot::localization::LocalizationManager;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Fail before touching Telegram if the token or any setting is unusable
    let config = BotConfig::from_env().context("failed to load configuration")?;

    init_tracing(config.log_format);

    info!(mode = ?config.mode, language = %config.default_language, "Starting promo Telegram bot");

    let content = {
        let localization = LocalizationManager::new().context("failed to load locales")?;
        ContentCatalog::load(&localization, &config.default_language)
    };
    info!(default_language = %content.default_language(), "Bot content resolved");

    let media = config.media_source();
    if let Some(path) = media.path() {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Banner media not found, banners will be text-only until it appears");
        }
    }

    let bot = Bot::new(config.token.clone());
    let dispatcher = Arc::new(UpdateDispatcher::new(Arc::new(bot.clone()), content, media));

    match config.mode {
        BotMode::Polling => run_polling(bot, dispatcher).await,
        BotMode::Webhook => {
            let webhook_url = config.webhook_url().transpose()?;
            run_webhook(bot, dispatcher, config.bind_addr, webhook_url).await
        }
    }
}
