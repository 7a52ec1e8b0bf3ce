//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `update`: Classifies raw teloxide updates into the kinds the bot handles
//! - `dispatcher`: Routes updates to the callback reply or the banner responder
//! - `transport`: The Telegram calls the dispatcher depends on
//! - `receiver`: Long polling and webhook bindings
//! - `ui_builder`: Creates the inline menu keyboard

pub mod dispatcher;
pub mod receiver;
pub mod transport;
pub mod ui_builder;
pub mod update;

pub use dispatcher::{DispatchOutcome, UpdateDispatcher};
pub use receiver::{run_polling, run_webhook, webhook_router, WEBHOOK_PATH};
pub use transport::BotTransport;
pub use update::BotUpdate;
