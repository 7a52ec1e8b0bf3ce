//! Transport module: the Telegram calls the dispatcher depends on
//!
//! The dispatcher talks to Telegram only through [`BotTransport`], so the
//! update handling logic can be driven by a recording double in tests.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, InlineKeyboardMarkup, InputFile};

use crate::banner::BannerMedia;
use crate::errors::BotError;

/// Outbound operations consumed by the dispatcher. Each is one round-trip.
#[async_trait]
pub trait BotTransport: Send + Sync {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError>;

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: BannerMedia,
        caption: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<(), BotError>;

    async fn send_video(
        &self,
        chat_id: i64,
        video: BannerMedia,
        caption: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<(), BotError>;

    /// Stop the loading indicator on the pressed button
    async fn answer_callback(&self, query_id: &str) -> Result<(), BotError>;
}

/// Callback query ids travel as plain strings through the dispatcher
pub fn callback_query_id(query_id: &str) -> CallbackQueryId {
    CallbackQueryId(query_id.to_string())
}

fn input_file(media: BannerMedia) -> InputFile {
    InputFile::memory(media.bytes).file_name(media.file_name)
}

#[async_trait]
impl BotTransport for Bot {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        let request = self.send_message(ChatId(chat_id), text);
        match keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: BannerMedia,
        caption: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<(), BotError> {
        Requester::send_photo(self, ChatId(chat_id), input_file(photo))
            .caption(caption)
            .reply_markup(keyboard)
            .await?;
        Ok(())
    }

    async fn send_video(
        &self,
        chat_id: i64,
        video: BannerMedia,
        caption: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<(), BotError> {
        Requester::send_video(self, ChatId(chat_id), input_file(video))
            .caption(caption)
            .reply_markup(keyboard)
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str) -> Result<(), BotError> {
        self.answer_callback_query(callback_query_id(query_id)).await?;
        Ok(())
    }
}
