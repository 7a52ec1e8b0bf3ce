//! # Promo Telegram Bot
//!
//! A promotional Telegram bot: any message is answered with a banner and an
//! inline menu, and each menu button returns a canned reply.

pub mod banner;
pub mod bot;
pub mod config;
pub mod content;
pub mod errors;
pub mod localization;
