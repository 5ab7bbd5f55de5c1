//! Rendering of everything the bot says. The listing is sent as HTML, the
//! summary of added links in telegram's legacy Markdown.

use super::links::SkippedUrl;
use crate::errors::Result;
use crate::structs::{
    InlineKeyboardButton, InlineKeyboardMarkup, Page, PageAction, ParseMode, Reply, ReplyType,
};

use db::{Link, LinkStore};
use html_escape::{encode_double_quoted_attribute, encode_text};

pub const FAILURE_TEXT: &str = "Something went wrong, try again later";

fn build_link_line(number: u64, link: &Link) -> String {
    format!(
        "{number}. <a href=\"{}\">{}</a> by {}",
        encode_double_quoted_attribute(&link.link),
        encode_text(&link.title),
        encode_text(&link.by_username),
    )
}

fn reply_keyboard_markup(page: Page) -> InlineKeyboardMarkup {
    let previous = page.previous_offset();
    InlineKeyboardMarkup {
        inline_keyboard: vec![vec![
            InlineKeyboardButton::new(
                format!("<{previous}"),
                PageAction::Less.callback_data(previous),
            ),
            InlineKeyboardButton::new(
                page.number().to_string(),
                PageAction::Noop.callback_data(page.offset),
            ),
            InlineKeyboardButton::new(
                format!("{}>", page.limit),
                PageAction::More.callback_data(page.next_offset()),
            ),
        ]],
    }
}

/// A page of the most recently added links with buttons to move between
/// pages. Nothing is rendered if the store fails.
pub fn build_recent_links(store: &dyn LinkStore, page: Page, place: ReplyType) -> Result<Reply> {
    let links = store.list_links(page.limit, page.offset)?;

    let first = u64::from(page.offset) + 1;
    let body = links
        .iter()
        .zip(first..)
        .map(|(link, number)| build_link_line(number, link))
        .collect::<Vec<String>>()
        .join("\n");

    let text = format!("<b>Last {} links added</b>\n\n{body}", page.limit);
    Ok(
        Reply::new(text.trim_end().to_string(), ParseMode::Html, place)
            .with_markup(reply_keyboard_markup(page)),
    )
}

// Legacy markdown has no escaping inside a link, brackets would end the
// link text early and a `)` the url
fn markdown_link(number: usize, link: &Link) -> String {
    let title = link.title.trim().replace('[', "(").replace(']', ")");
    let url = link.link.replace(')', "%29");
    format!("{number}. [{title}]({url})")
}

fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Summary of a link submission, either section is left out when empty.
pub fn build_add_link_response(chat_id: i64, skipped: &[SkippedUrl], added: &[Link]) -> Reply {
    let mut sections = Vec::new();

    if !skipped.is_empty() {
        let lines = skipped
            .iter()
            .map(|skip| {
                format!(
                    "{} ({})",
                    escape_markdown(&skip.reason),
                    escape_markdown(&skip.url)
                )
            })
            .collect::<Vec<String>>()
            .join("\n");
        sections.push(format!("*Skipped urls*\n{lines}"));
    }

    if !added.is_empty() {
        let lines = added
            .iter()
            .enumerate()
            .map(|(idx, link)| markdown_link(idx + 1, link))
            .collect::<Vec<String>>()
            .join("\n");
        sections.push(format!("*Links added*\n{lines}"));
    }

    Reply::new(
        sections.join("\n\n"),
        ParseMode::Markdown,
        ReplyType::Chat { chat_id },
    )
}

/// Sent in place of a reply when the store couldn't be reached
pub fn build_failure_reply(chat_id: i64) -> Reply {
    Reply::new(
        FAILURE_TEXT.to_string(),
        ParseMode::Html,
        ReplyType::Chat { chat_id },
    )
}
