//! Inbound telegram updates.
//!
//! Only the fields the bot reads are decoded, anything else telegram sends
//! is ignored. Updates that are neither a message nor a callback query decode
//! to [`UpdateKind::Other`] rather than failing.

use crate::errors::{Error, Result};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub update_id: i64,
    pub kind: UpdateKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateKind {
    Message(Message),
    CallbackQuery(CallbackQuery),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    // both counted in utf-16 code units
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
}

/// The message a pressed button is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CallbackMessage {
    pub message_id: i64,
    pub chat: Chat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallbackQuery {
    pub id: Option<String>,
    pub data: Option<String>,
    pub message: Option<CallbackMessage>,
}

#[derive(Deserialize)]
struct RawUpdate {
    update_id: i64,
    message: Option<Message>,
    callback_query: Option<CallbackQuery>,
}

impl Update {
    pub fn from_slice(body: &[u8]) -> Result<Update> {
        let raw: RawUpdate = serde_json::from_slice(body)
            .map_err(|why| Error::InvalidArgument(format!("malformed update: {why}")))?;

        let kind = match (raw.message, raw.callback_query) {
            (Some(message), _) => UpdateKind::Message(message),
            (None, Some(query)) => UpdateKind::CallbackQuery(query),
            (None, None) => UpdateKind::Other,
        };

        Ok(Update {
            update_id: raw.update_id,
            kind,
        })
    }

    /// The chat a reply to this update would go to, if there is one
    pub fn chat_id(&self) -> Option<i64> {
        match &self.kind {
            UpdateKind::Message(msg) => Some(msg.chat.id),
            UpdateKind::CallbackQuery(query) => query.message.map(|msg| msg.chat.id),
            UpdateKind::Other => None,
        }
    }
}

impl User {
    /// Username if set, otherwise first name, otherwise the numeric id
    pub fn display_name(&self) -> String {
        self.username
            .as_deref()
            .or(self.first_name.as_deref())
            .map_or_else(|| self.id.to_string(), String::from)
    }
}

impl MessageEntity {
    #[inline(always)]
    pub fn is_url(&self) -> bool {
        self.kind == "url"
    }
}
