//! Dispatcher module: routes each update to the callback reply or the
//! banner-and-menu responder
//!
//! Nothing here returns an error to the caller. Failed Telegram calls are
//! logged with the operation name and chat id, and the only recovery is the
//! single media → text-only fallback for the banner.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::banner::{MediaKind, MediaSource};
use crate::content::{BotContent, ContentCatalog};
use crate::localization::detect_language;

use super::transport::BotTransport;
use super::ui_builder::create_menu_keyboard;
use super::update::BotUpdate;

/// How the handling of one update concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Callback acknowledged (if possible) and reply sent
    Replied,
    /// Banner sent; `with_media` is false for the text-only variant
    BannerSent { with_media: bool },
    /// Every send attempt failed; nothing reached the user
    Unresolved,
    /// Update kind is not handled
    Ignored,
}

/// Stateless update handler shared by both receivers
pub struct UpdateDispatcher<T: BotTransport> {
    transport: Arc<T>,
    content: ContentCatalog,
    media: MediaSource,
}

impl<T: BotTransport> UpdateDispatcher<T> {
    pub fn new(transport: Arc<T>, content: ContentCatalog, media: MediaSource) -> Self {
        Self {
            transport,
            content,
            media,
        }
    }

    fn content_for(&self, update: &BotUpdate) -> &BotContent {
        self.content
            .for_language(detect_language(update.language_code()))
    }

    /// Handle one update to completion
    pub async fn handle(&self, update: BotUpdate) -> DispatchOutcome {
        let content = self.content_for(&update);

        match &update {
            BotUpdate::CallbackInteraction {
                query_id,
                chat_id,
                action_key,
                ..
            } if content.is_recognized(action_key) => {
                self.reply_to_action(content, query_id, *chat_id, action_key)
                    .await
            }
            BotUpdate::CallbackInteraction {
                chat_id, action_key, ..
            } => {
                debug!(chat_id, action_key = %action_key, "Ignoring callback with unrecognized action");
                DispatchOutcome::Ignored
            }
            BotUpdate::Command { chat_id, name, .. } => {
                info!(chat_id, command = %name, "Received command");
                self.send_banner_and_menu(content, *chat_id).await
            }
            BotUpdate::TextMessage { chat_id, .. } => {
                info!(chat_id, "Received text message");
                self.send_banner_and_menu(content, *chat_id).await
            }
            BotUpdate::Other => {
                debug!("Ignoring unsupported update kind");
                DispatchOutcome::Ignored
            }
        }
    }

    async fn reply_to_action(
        &self,
        content: &BotContent,
        query_id: &str,
        chat_id: i64,
        action_key: &str,
    ) -> DispatchOutcome {
        // Acknowledge first so the client drops the loading indicator
        if let Err(e) = self.transport.answer_callback(query_id).await {
            error!(chat_id, action_key, error = %e, "answer_callback failed");
        }

        let reply = content.replies.reply_for(action_key);
        if !content.replies.contains(action_key) {
            warn!(chat_id, action_key, "No reply entry for action, sending fallback reply");
        }

        match self.transport.send_text(chat_id, reply, None).await {
            Ok(()) => {
                info!(chat_id, action_key, "Action reply sent");
                DispatchOutcome::Replied
            }
            Err(e) => {
                error!(chat_id, action_key, error = %e, "send_text failed for action reply");
                DispatchOutcome::Unresolved
            }
        }
    }

    /// Send the banner with media, falling back to caption text on failure
    pub async fn send_banner_and_menu(&self, content: &BotContent, chat_id: i64) -> DispatchOutcome {
        let keyboard = create_menu_keyboard(&content.menu);

        match self.media.load().await {
            Ok(Some(media)) => {
                let kind = media.kind;
                let result = match kind {
                    MediaKind::Image => {
                        self.transport
                            .send_photo(chat_id, media, &content.caption, keyboard.clone())
                            .await
                    }
                    MediaKind::Video => {
                        self.transport
                            .send_video(chat_id, media, &content.caption, keyboard.clone())
                            .await
                    }
                };

                match result {
                    Ok(()) => {
                        info!(chat_id, media = ?kind, "Banner with media and menu sent");
                        return DispatchOutcome::BannerSent { with_media: true };
                    }
                    Err(e) => {
                        error!(chat_id, media = ?kind, error = %e, "Banner media send failed");
                    }
                }
            }
            Ok(None) => {
                debug!(chat_id, "No banner media configured");
            }
            Err(e) => {
                error!(chat_id, error = %e, "Banner media could not be loaded");
            }
        }

        match self
            .transport
            .send_text(chat_id, &content.caption, Some(keyboard))
            .await
        {
            Ok(()) => {
                info!(chat_id, "Banner sent without media");
                DispatchOutcome::BannerSent { with_media: false }
            }
            Err(e) => {
                error!(chat_id, error = %e, "Banner text-only send failed");
                DispatchOutcome::Unresolved
            }
        }
    }
}
