//! Minimal bot api client, only the three calls the bot makes.

use crate::errors::{Error, Result};
use crate::structs::Reply;

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use url::Url;

pub const API_URL: &str = "https://api.telegram.org";

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

// keep the token out of logs
impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    pub fn new(http: reqwest::Client, token: &str) -> TelegramClient {
        TelegramClient::with_api_url(http, API_URL, token)
    }

    pub fn with_api_url(http: reqwest::Client, api_url: &str, token: &str) -> TelegramClient {
        TelegramClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn method_url(&self, method: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}/bot{}/{method}",
            self.api_url, self.token
        ))?)
    }

    /// Sends a new message, or edits the one the reply points at
    pub async fn send_reply(&self, reply: &Reply) -> Result<()> {
        self.call(method_for(reply), reply).await
    }

    /// Stops the loading spinner on a pressed button
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<()> {
        self.call(
            "answerCallbackQuery",
            &json!({ "callback_query_id": callback_query_id }),
        )
        .await
    }

    async fn call<T: Serialize + ?Sized>(&self, method: &str, body: &T) -> Result<()> {
        trace!("calling {method}");
        let response: ApiResponse = self
            .http
            .post(self.method_url(method)?)
            .json(body)
            .send()
            .await?
            .json()
            .await?;

        if response.ok {
            Ok(())
        } else {
            Err(Error::Telegram(response.description.unwrap_or_else(|| {
                format!("{method} failed without a description")
            })))
        }
    }
}

#[inline(always)]
pub const fn method_for(reply: &Reply) -> &'static str {
    if reply.is_edit() {
        "editMessageText"
    } else {
        "sendMessage"
    }
}

/// Telegram refuses edits that wouldn't change anything, e.g. pressing
/// back on the first page. Those aren't worth more than a debug line.
pub fn is_not_modified(err: &Error) -> bool {
    matches!(err, Error::Telegram(description) if description.contains("message is not modified"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::{ParseMode, ReplyType};

    #[test]
    fn test_method_url() {
        let client =
            TelegramClient::with_api_url(reqwest::Client::new(), "http://localhost:8081/", "123:ABC");

        assert_eq!(
            client.method_url("sendMessage").unwrap().as_str(),
            "http://localhost:8081/bot123:ABC/sendMessage"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TelegramClient::new(reqwest::Client::new(), "123:SECRET");
        assert!(!format!("{client:?}").contains("SECRET"));
    }

    #[test]
    fn test_method_for() {
        let send = Reply::new(
            "hi".to_string(),
            ParseMode::Html,
            ReplyType::Chat { chat_id: 1 },
        );
        let edit = Reply::new(
            "hi".to_string(),
            ParseMode::Html,
            ReplyType::Edit {
                chat_id: 1,
                message_id: 2,
            },
        );

        assert_eq!(method_for(&send), "sendMessage");
        assert_eq!(method_for(&edit), "editMessageText");
    }

    #[test]
    fn test_is_not_modified() {
        assert!(is_not_modified(&Error::Telegram(
            "Bad Request: message is not modified: specified new message content".to_string()
        )));
        assert!(!is_not_modified(&Error::Telegram(
            "Bad Request: chat not found".to_string()
        )));
        assert!(!is_not_modified(&Error::ConstStr("message is not modified")));
    }
}
