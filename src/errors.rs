//! # Bot Error Types Module
//!
//! Error types shared by configuration loading, banner asset handling and
//! the Telegram transport. Startup errors are fatal; everything raised while
//! handling an update is logged and swallowed by the dispatcher.

/// Custom error types for bot operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    /// Required credential is absent or blank
    MissingCredential(String),
    /// A configuration value could not be parsed
    InvalidConfig(String),
    /// Banner media file could not be read
    AssetUnavailable(String),
    /// A Telegram API round-trip failed
    Transport(String),
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::MissingCredential(msg) => write!(f, "Missing credential: {msg}"),
            BotError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            BotError::AssetUnavailable(msg) => write!(f, "Asset unavailable: {msg}"),
            BotError::Transport(msg) => write!(f, "Transport error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let err = BotError::MissingCredential("TELEGRAM_BOT_TOKEN".to_string());
        assert_eq!(err.to_string(), "Missing credential: TELEGRAM_BOT_TOKEN");

        let err = BotError::AssetUnavailable("assets/promo.mp4: not found".to_string());
        assert_eq!(err.to_string(), "Asset unavailable: assets/promo.mp4: not found");
    }
}
