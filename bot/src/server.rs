//! Webhook endpoint telegram posts updates to.

use crate::errors::Result;
use crate::event_log::UpdateLog;
use crate::handler::replies::build_failure_reply;
use crate::handler::Handler;
use crate::structs::{Update, UpdateKind};
use crate::telegram::{is_not_modified, TelegramClient};

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use log::{debug, error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct AppState {
    handler: Handler,
    telegram: TelegramClient,
}

impl AppState {
    pub const fn new(handler: Handler, telegram: TelegramClient) -> AppState {
        AppState { handler, telegram }
    }

    /// Handles an update end to end. Failures are logged here, telegram
    /// can't do anything useful with them.
    async fn process(&self, update: &Update) {
        if let UpdateKind::CallbackQuery(query) = &update.kind {
            if let Some(id) = &query.id {
                if let Err(why) = self.telegram.answer_callback_query(id).await {
                    warn!("failed to answer callback query {id}: {why}");
                }
            }
        }

        let log = UpdateLog::new(update.update_id);
        let reply = match self.handler.handle(update, &log).await {
            Ok(Some(reply)) => reply,
            Ok(None) => return,
            Err(why) if why.is_store_unavailable() => {
                error!("failed to handle update {}: {why}", update.update_id);
                match update.chat_id() {
                    Some(chat_id) => build_failure_reply(chat_id),
                    None => return,
                }
            }
            Err(why) => {
                error!("failed to handle update {}: {why}", update.update_id);
                return;
            }
        };

        match self.telegram.send_reply(&reply).await {
            Ok(()) => debug!("replied to update {}", update.update_id),
            Err(why) if is_not_modified(&why) => {
                debug!("update {} left the message unchanged", update.update_id)
            }
            Err(why) => error!(
                "failed to reply to update {} in chat {}: {why}",
                update.update_id,
                reply.chat_id()
            ),
        }
    }
}

pub fn router(state: Arc<AppState>, webhook_url_id: &str) -> Router {
    Router::new()
        .route("/", get(hello))
        .route(&format!("/{webhook_url_id}"), post(webhook))
        .with_state(state)
}

async fn hello() -> &'static str {
    "ok"
}

async fn webhook(State(state): State<Arc<AppState>>, body: Bytes) -> (StatusCode, &'static str) {
    let update = match Update::from_slice(&body) {
        Ok(update) => update,
        Err(why) => {
            warn!("rejecting webhook call: {why}");
            return (StatusCode::BAD_REQUEST, "bad update");
        }
    };

    state.process(&update).await;
    (StatusCode::OK, "ok")
}

pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening for updates on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(why) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {why}");
    }
    info!("shutting down");
}
