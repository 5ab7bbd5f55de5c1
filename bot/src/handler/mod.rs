pub mod commands;
pub mod links;
pub mod replies;

use commands::{is_command_of, LINKS_COMMAND};
use links::{create_links_from_message, find_all_url_types, parse_link_contents, Resolver};
use replies::{build_add_link_response, build_recent_links};

use crate::errors::Result;
use crate::event_log::EventLog;
use crate::structs::page::PAGE_SIZE;
use crate::structs::{CallbackQuery, Message, Page, PageRequest, Reply, ReplyType, Update, UpdateKind};

use chrono::Utc;
use db::LinkStore;
use std::sync::Arc;

/// Turns a single update into at most one reply. Holds no state between
/// updates so one handler serves any number of concurrent requests.
///
/// `Ok(None)` means the update was noise and nothing should be sent. Errors
/// are only returned when the store fails, nothing is rendered in that case.
#[derive(Clone)]
pub struct Handler {
    store: Arc<dyn LinkStore>,
    resolver: Arc<dyn Resolver>,
}

impl Handler {
    pub fn new(store: Arc<dyn LinkStore>, resolver: Arc<dyn Resolver>) -> Handler {
        Handler { store, resolver }
    }

    pub async fn handle(&self, update: &Update, log: &dyn EventLog) -> Result<Option<Reply>> {
        match &update.kind {
            UpdateKind::Message(msg) => self.handle_message(msg, log).await,
            UpdateKind::CallbackQuery(query) => self.handle_callback_query(query, log),
            UpdateKind::Other => {
                log.debug(format_args!("ignoring update kind"));
                Ok(None)
            }
        }
    }

    async fn handle_message(&self, msg: &Message, log: &dyn EventLog) -> Result<Option<Reply>> {
        let text = match msg.text.as_deref() {
            Some(text) => text,
            None => return Ok(None),
        };

        if is_command_of(text, LINKS_COMMAND) {
            log.info(format_args!("listing links in chat {}", msg.chat.id));
            let place = ReplyType::Chat {
                chat_id: msg.chat.id,
            };
            return build_recent_links(&*self.store, Page::first(), place).map(Some);
        }

        let spans = find_all_url_types(text, &msg.entities);
        if spans.is_empty() {
            return Ok(None);
        }

        let author = match &msg.from {
            Some(author) => author,
            None => {
                log.warn(format_args!("message with urls has no sender, ignoring"));
                return Ok(None);
            }
        };

        let submitted_at = Utc::now();
        let extracted = parse_link_contents(&spans, &*self.resolver, log).await;
        let added = create_links_from_message(
            &*self.store,
            author,
            &extracted.accepted,
            submitted_at,
        )?;
        log.info(format_args!(
            "added {} links and skipped {} for user {}",
            added.len(),
            extracted.skipped.len(),
            author.id
        ));

        Ok(Some(build_add_link_response(
            msg.chat.id,
            &extracted.skipped,
            &added,
        )))
    }

    fn handle_callback_query(
        &self,
        query: &CallbackQuery,
        log: &dyn EventLog,
    ) -> Result<Option<Reply>> {
        let data = match query.data.as_deref() {
            Some(data) => data,
            None => return Ok(None),
        };
        log.debug(format_args!("parsing callback query {data:?}"));

        let offset = match PageRequest::parse(data) {
            Some(PageRequest::Offset(offset)) => offset,
            Some(PageRequest::Noop) => return Ok(None),
            None => {
                log.debug(format_args!("ignoring unknown callback data"));
                return Ok(None);
            }
        };

        let message = match query.message {
            Some(message) => message,
            None => {
                log.debug(format_args!("callback query is not attached to a message"));
                return Ok(None);
            }
        };

        let place = ReplyType::Edit {
            chat_id: message.chat.id,
            message_id: message.message_id,
        };
        build_recent_links(&*self.store, Page::new(PAGE_SIZE, offset), place).map(Some)
    }
}
