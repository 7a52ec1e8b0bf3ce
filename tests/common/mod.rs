//! Recording `BotTransport` double shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use promo_bot::banner::{BannerMedia, MediaSource};
use promo_bot::bot::{BotTransport, UpdateDispatcher};
use promo_bot::content::{BotContent, ContentCatalog};
use promo_bot::errors::BotError;
use promo_bot::localization::LocalizationManager;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use teloxide::types::{InlineKeyboardButtonKind, InlineKeyboardMarkup};

/// One outbound call as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Text {
        chat_id: i64,
        text: String,
        buttons: Option<Vec<(String, String)>>,
    },
    Photo {
        chat_id: i64,
        file_name: String,
        caption: String,
        buttons: Vec<(String, String)>,
    },
    Video {
        chat_id: i64,
        file_name: String,
        caption: String,
        buttons: Vec<(String, String)>,
    },
    AnswerCallback {
        query_id: String,
    },
}

/// Flatten a keyboard into (label, callback data) pairs, asserting one button per row
pub fn buttons(keyboard: &InlineKeyboardMarkup) -> Vec<(String, String)> {
    keyboard
        .inline_keyboard
        .iter()
        .map(|row| {
            assert_eq!(row.len(), 1, "menu rows hold exactly one button");
            let data = match &row[0].kind {
                InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                other => panic!("unexpected button kind {other:?}"),
            };
            (row[0].text.clone(), data)
        })
        .collect()
}

#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    pub fail_media: AtomicBool,
    pub fail_text: AtomicBool,
    pub fail_answer: AtomicBool,
}

impl RecordingTransport {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<(), BotError> {
        if flag.load(Ordering::SeqCst) {
            Err(BotError::Transport(format!("{op} rejected")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BotTransport for RecordingTransport {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        Self::check(&self.fail_text, "send_text")?;
        self.record(Call::Text {
            chat_id,
            text: text.to_string(),
            buttons: keyboard.as_ref().map(buttons),
        });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: BannerMedia,
        caption: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<(), BotError> {
        Self::check(&self.fail_media, "send_photo")?;
        self.record(Call::Photo {
            chat_id,
            file_name: photo.file_name,
            caption: caption.to_string(),
            buttons: buttons(&keyboard),
        });
        Ok(())
    }

    async fn send_video(
        &self,
        chat_id: i64,
        video: BannerMedia,
        caption: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<(), BotError> {
        Self::check(&self.fail_media, "send_video")?;
        self.record(Call::Video {
            chat_id,
            file_name: video.file_name,
            caption: caption.to_string(),
            buttons: buttons(&keyboard),
        });
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str) -> Result<(), BotError> {
        Self::check(&self.fail_answer, "answer_callback")?;
        self.record(Call::AnswerCallback {
            query_id: query_id.to_string(),
        });
        Ok(())
    }
}

pub fn english_content() -> BotContent {
    let localization = LocalizationManager::new().unwrap();
    BotContent::resolve(&localization, "en")
}

/// Dispatcher over English content only
pub fn dispatcher(media: MediaSource) -> (Arc<RecordingTransport>, UpdateDispatcher<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let content = ContentCatalog::single("en", english_content());
    let dispatcher = UpdateDispatcher::new(Arc::clone(&transport), content, media);
    (transport, dispatcher)
}

/// Dispatcher over every bundled language, Ukrainian by default
pub fn localized_dispatcher(
    media: MediaSource,
) -> (Arc<RecordingTransport>, UpdateDispatcher<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let localization = LocalizationManager::new().unwrap();
    let content = ContentCatalog::load(&localization, "uk");
    let dispatcher = UpdateDispatcher::new(Arc::clone(&transport), content, media);
    (transport, dispatcher)
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install an error-level subscriber on the current thread
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::ERROR)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn error_lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains("ERROR"))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
