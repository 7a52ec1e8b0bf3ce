//! # Bot Content Module
//!
//! Menu definition, reply table and banner caption. Everything here is
//! resolved once at startup and shared read-only between updates.

use std::collections::HashMap;
use tracing::warn;

use crate::localization::{LocalizationManager, FALLBACK_LANGUAGE, SUPPORTED_LANGUAGES};

/// Action keys carried in callback data
pub const ACTION_SERVICES: &str = "services";
pub const ACTION_CONTACT: &str = "contact";
pub const ACTION_FABRICS: &str = "fabrics";
pub const ACTION_QUOTE: &str = "quote";

/// Buttons shown under the banner, in display order: (label key, action key)
const MENU_LAYOUT: &[(&str, &str)] = &[
    ("menu-services", ACTION_SERVICES),
    ("menu-fabrics", ACTION_FABRICS),
    ("menu-quote", ACTION_QUOTE),
];

/// Actions with a dedicated reply: (action key, reply key).
/// `fabrics` has no entry and resolves to the fallback reply.
const REPLY_LAYOUT: &[(&str, &str)] = &[
    (ACTION_SERVICES, "reply-services"),
    (ACTION_CONTACT, "reply-contact"),
    (ACTION_QUOTE, "reply-quote"),
];

const FALLBACK_REPLY_KEY: &str = "reply-unknown";
const CAPTION_KEY: &str = "banner-caption";

/// A single inline button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub action_key: String,
}

/// Ordered list of inline buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuDefinition {
    entries: Vec<MenuEntry>,
}

impl MenuDefinition {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn contains(&self, action_key: &str) -> bool {
        self.entries.iter().any(|entry| entry.action_key == action_key)
    }
}

/// Canned replies keyed by action, with an explicit fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTable {
    replies: HashMap<String, String>,
    fallback: String,
}

impl ReplyTable {
    pub fn new(replies: HashMap<String, String>, fallback: impl Into<String>) -> Self {
        Self {
            replies,
            fallback: fallback.into(),
        }
    }

    pub fn contains(&self, action_key: &str) -> bool {
        self.replies.contains_key(action_key)
    }

    /// Reply for the action, or the fallback when the table has no entry
    pub fn reply_for(&self, action_key: &str) -> &str {
        self.replies
            .get(action_key)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// Caption, menu and replies for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotContent {
    pub caption: String,
    pub menu: MenuDefinition,
    pub replies: ReplyTable,
}

impl BotContent {
    /// Resolve the content for a language from the Fluent bundles.
    /// Caption and labels follow `language`; replies are always the English table.
    pub fn resolve(localization: &LocalizationManager, language: &str) -> Self {
        let t = |key: &str| localization.get_message_in_language(key, language);
        let reply = |key: &str| localization.get_message_in_language(key, FALLBACK_LANGUAGE);

        let menu = MenuDefinition::new(
            MENU_LAYOUT
                .iter()
                .map(|&(label_key, action_key)| MenuEntry {
                    label: t(label_key),
                    action_key: action_key.to_string(),
                })
                .collect(),
        );

        let replies = ReplyTable::new(
            REPLY_LAYOUT
                .iter()
                .map(|&(action_key, reply_key)| (action_key.to_string(), reply(reply_key)))
                .collect(),
            reply(FALLBACK_REPLY_KEY),
        );

        Self {
            caption: t(CAPTION_KEY),
            menu,
            replies,
        }
    }

    /// Whether a callback with this action key gets a reply at all
    pub fn is_recognized(&self, action_key: &str) -> bool {
        self.menu.contains(action_key) || self.replies.contains(action_key)
    }

    /// Menu actions that would fall through to the fallback reply
    pub fn unmapped_actions(&self) -> Vec<&str> {
        self.menu
            .entries()
            .iter()
            .map(|entry| entry.action_key.as_str())
            .filter(|key| !self.replies.contains(key))
            .collect()
    }
}

/// Per-language content with a default language
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    by_language: HashMap<String, BotContent>,
    default_language: String,
    default_content: BotContent,
}

impl ContentCatalog {
    /// Resolve content for every supported language
    pub fn load(localization: &LocalizationManager, default_language: &str) -> Self {
        let by_language: HashMap<String, BotContent> = SUPPORTED_LANGUAGES
            .iter()
            .map(|lang| (lang.to_string(), BotContent::resolve(localization, lang)))
            .collect();

        if let Some(content) = by_language.get(default_language) {
            let unmapped = content.unmapped_actions();
            if !unmapped.is_empty() {
                warn!(
                    actions = ?unmapped,
                    "Menu buttons without a reply entry will answer with the fallback reply"
                );
            }
        }

        let default_content = by_language
            .get(default_language)
            .cloned()
            .unwrap_or_else(|| BotContent::resolve(localization, default_language));

        Self {
            by_language,
            default_language: default_language.to_string(),
            default_content,
        }
    }

    /// Build a catalog holding a single language
    pub fn single(language: &str, content: BotContent) -> Self {
        Self {
            by_language: HashMap::new(),
            default_language: language.to_string(),
            default_content: content,
        }
    }

    /// Language of the content sent to senders with no supported language
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Content for the language, falling back to the default language
    pub fn for_language(&self, language: Option<&str>) -> &BotContent {
        language
            .and_then(|lang| self.by_language.get(lang))
            .unwrap_or(&self.default_content)
    }
}
