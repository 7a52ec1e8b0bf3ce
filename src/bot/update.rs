//! Update classification: teloxide `Update` → [`BotUpdate`]

use teloxide::types::{CallbackQuery, Message, Update, UpdateKind};

/// The kinds of update the dispatcher distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotUpdate {
    /// `/name [args]`, with any `@botname` suffix removed
    Command {
        chat_id: i64,
        name: String,
        language_code: Option<String>,
    },
    TextMessage {
        chat_id: i64,
        text: String,
        language_code: Option<String>,
    },
    /// Inline button press
    CallbackInteraction {
        query_id: String,
        chat_id: i64,
        action_key: String,
        language_code: Option<String>,
    },
    /// Anything else: media, edits, channel posts, undecodable payloads
    Other,
}

impl BotUpdate {
    pub fn chat_id(&self) -> Option<i64> {
        match self {
            BotUpdate::Command { chat_id, .. }
            | BotUpdate::TextMessage { chat_id, .. }
            | BotUpdate::CallbackInteraction { chat_id, .. } => Some(*chat_id),
            BotUpdate::Other => None,
        }
    }

    pub fn language_code(&self) -> Option<&str> {
        match self {
            BotUpdate::Command { language_code, .. }
            | BotUpdate::TextMessage { language_code, .. }
            | BotUpdate::CallbackInteraction { language_code, .. } => language_code.as_deref(),
            BotUpdate::Other => None,
        }
    }
}

impl From<&Update> for BotUpdate {
    fn from(update: &Update) -> Self {
        match &update.kind {
            UpdateKind::Message(msg) => classify_message(msg),
            UpdateKind::CallbackQuery(query) => classify_callback(query),
            _ => BotUpdate::Other,
        }
    }
}

fn classify_message(msg: &Message) -> BotUpdate {
    let Some(text) = msg.text() else {
        return BotUpdate::Other;
    };

    let chat_id = msg.chat.id.0;
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.clone());

    match parse_command(text) {
        Some(name) => BotUpdate::Command {
            chat_id,
            name,
            language_code,
        },
        None => BotUpdate::TextMessage {
            chat_id,
            text: text.to_string(),
            language_code,
        },
    }
}

fn classify_callback(query: &CallbackQuery) -> BotUpdate {
    let (Some(action_key), Some(message)) = (query.data.as_ref(), query.message.as_ref()) else {
        return BotUpdate::Other;
    };

    BotUpdate::CallbackInteraction {
        query_id: query.id.to_string(),
        chat_id: message.chat().id.0,
        action_key: action_key.clone(),
        language_code: query.from.language_code.clone(),
    }
}

/// Extract the command name from `/start@my_bot payload`
pub fn parse_command(text: &str) -> Option<String> {
    let first = text.trim_start().split_whitespace().next()?;
    let command = first.strip_prefix('/')?;
    let name = command.split('@').next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    Some(name.to_ascii_lowercase())
}
