use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "Markdown")]
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// Where a reply ends up, a new message in a chat or an edit of one the bot
/// already sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplyType {
    Chat { chat_id: i64 },
    Edit { chat_id: i64, message_id: i64 },
}

/// An outbound message. Serializes directly into the body of a
/// `sendMessage` or `editMessageText` bot api call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    #[serde(flatten)]
    pub place: ReplyType,
    pub text: String,
    pub parse_mode: ParseMode,
    pub disable_notification: bool,
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Reply {
    /// A reply that doesn't notify anyone or expand link previews
    pub const fn new(text: String, parse_mode: ParseMode, place: ReplyType) -> Reply {
        Reply {
            place,
            text,
            parse_mode,
            disable_notification: true,
            disable_web_page_preview: true,
            reply_markup: None,
        }
    }

    pub fn with_markup(mut self, markup: InlineKeyboardMarkup) -> Reply {
        self.reply_markup = Some(markup);
        self
    }

    #[inline(always)]
    pub const fn is_edit(&self) -> bool {
        matches!(self.place, ReplyType::Edit { .. })
    }

    #[inline(always)]
    pub const fn chat_id(&self) -> i64 {
        match self.place {
            ReplyType::Chat { chat_id } | ReplyType::Edit { chat_id, .. } => chat_id,
        }
    }
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> InlineKeyboardButton {
        InlineKeyboardButton {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_chat_reply() {
        let reply = Reply::new(
            "*Links added*".to_string(),
            ParseMode::Markdown,
            ReplyType::Chat { chat_id: 5 },
        );

        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "chat_id": 5,
                "text": "*Links added*",
                "parse_mode": "Markdown",
                "disable_notification": true,
                "disable_web_page_preview": true,
            })
        );
        assert!(!reply.is_edit());
    }

    #[test]
    fn test_serialize_edit_reply_with_markup() {
        let reply = Reply::new(
            "<b>Last 10 links added</b>".to_string(),
            ParseMode::Html,
            ReplyType::Edit {
                chat_id: 5,
                message_id: 9,
            },
        )
        .with_markup(InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton::new("1", "links:noop:0")]],
        });

        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "chat_id": 5,
                "message_id": 9,
                "text": "<b>Last 10 links added</b>",
                "parse_mode": "HTML",
                "disable_notification": true,
                "disable_web_page_preview": true,
                "reply_markup": {
                    "inline_keyboard": [[{"text": "1", "callback_data": "links:noop:0"}]]
                },
            })
        );
        assert!(reply.is_edit());
        assert_eq!(reply.chat_id(), 5);
    }
}
