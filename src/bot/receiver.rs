//! Update Receiver module: long polling and webhook bindings
//!
//! Both bindings hand every update, unchanged, to
//! [`UpdateDispatcher::handle`]. The webhook always answers `200 OK` with an
//! empty body; Telegram only needs to know the payload was accepted.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Update;
use tracing::{debug, error, info, warn};

use super::dispatcher::UpdateDispatcher;
use super::transport::BotTransport;
use super::update::BotUpdate;

pub const WEBHOOK_PATH: &str = "/telegram/webhook";
pub const HEALTH_PATH: &str = "/health";

/// Receive updates with `getUpdates` until ctrl-c
pub async fn run_polling(bot: Bot, dispatcher: Arc<UpdateDispatcher<Bot>>) -> Result<()> {
    let handler = dptree::entry().endpoint({
        let dispatcher = Arc::clone(&dispatcher);
        move |update: Update| {
            let dispatcher = Arc::clone(&dispatcher);
            async move {
                dispatcher.handle(BotUpdate::from(&update)).await;
                respond(())
            }
        }
    });

    info!("Telegram bot started, receiving updates by long polling");

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Update stream stopped");
    Ok(())
}

/// Router exposing `POST /telegram/webhook` and `GET /health`
pub fn webhook_router<T>(dispatcher: Arc<UpdateDispatcher<T>>) -> Router
where
    T: BotTransport + 'static,
{
    Router::new()
        .route(WEBHOOK_PATH, post(handle_webhook::<T>))
        .route(HEALTH_PATH, get(|| async { StatusCode::OK }))
        .with_state(dispatcher)
}

async fn handle_webhook<T>(
    State(dispatcher): State<Arc<UpdateDispatcher<T>>>,
    body: Bytes,
) -> StatusCode
where
    T: BotTransport + 'static,
{
    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => {
            let outcome = dispatcher.handle(BotUpdate::from(&update)).await;
            debug!(update_id = ?update.id, outcome = ?outcome, "Webhook update handled");
        }
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "Discarding undecodable webhook payload");
        }
    }

    StatusCode::OK
}

/// Serve the webhook until ctrl-c, registering it with Telegram when a
/// public URL is configured and removing it again on shutdown
pub async fn run_webhook(
    bot: Bot,
    dispatcher: Arc<UpdateDispatcher<Bot>>,
    bind_addr: SocketAddr,
    webhook_url: Option<reqwest::Url>,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind webhook listener to {bind_addr}"))?;

    if let Some(url) = &webhook_url {
        bot.set_webhook(url.clone())
            .await
            .with_context(|| format!("failed to register webhook {url}"))?;
        info!(url = %url, "Webhook registered with Telegram");
    }

    info!(addr = %bind_addr, path = WEBHOOK_PATH, "Telegram bot started, serving webhook");

    axum::serve(listener, webhook_router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("webhook server error")?;

    if webhook_url.is_some() {
        if let Err(e) = bot.delete_webhook().await {
            error!(error = %e, "Failed to delete webhook on shutdown");
        } else {
            info!("Webhook removed");
        }
    }

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
