//! # Banner Module
//!
//! The banner sent for `/start` and plain text: caption, optional media file
//! and the inline menu. Media bytes are read from disk on every send so a
//! replaced asset is picked up without a restart.

use std::path::{Path, PathBuf};

use crate::errors::BotError;

/// Where the banner media comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Image(PathBuf),
    Video(PathBuf),
    /// Text-only banner
    None,
}

/// Kind of attached media, decides between `sendPhoto` and `sendVideo`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Media file loaded into memory, ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerMedia {
    pub kind: MediaKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl MediaSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            MediaSource::Image(path) | MediaSource::Video(path) => Some(path),
            MediaSource::None => None,
        }
    }

    /// Read the media file; `Ok(None)` when no media is configured
    pub async fn load(&self) -> Result<Option<BannerMedia>, BotError> {
        let (kind, path) = match self {
            MediaSource::Image(path) => (MediaKind::Image, path),
            MediaSource::Video(path) => (MediaKind::Video, path),
            MediaSource::None => return Ok(None),
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BotError::AssetUnavailable(format!("{}: {e}", path.display())))?;

        if bytes.is_empty() {
            return Err(BotError::AssetUnavailable(format!(
                "{}: file is empty",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| match kind {
                MediaKind::Image => "banner.png".to_string(),
                MediaKind::Video => "banner.mp4".to_string(),
            });

        Ok(Some(BannerMedia {
            kind,
            file_name,
            bytes,
        }))
    }
}
