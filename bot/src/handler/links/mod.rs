mod resolver;

pub use resolver::{HttpTitleResolver, Resolution, Resolver};

use crate::errors::{Error, Result};
use crate::event_log::EventLog;
use crate::structs::{MessageEntity, User};

use chrono::{DateTime, Utc};
use db::{Link, LinkStore};
use std::borrow::Cow;
use url::Url;

/// A url entity as found in the message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSpan<'a> {
    Text(&'a str),
    /// The entity doesn't line up with the text it claims to annotate
    Invalid { offset: usize, length: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUrl {
    pub reason: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedUrl {
    pub url: String,
    pub title: String,
}

/// Every url span ends up in exactly one of the two lists, each kept in the
/// order the urls appear in the message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractedLinks {
    pub skipped: Vec<SkippedUrl>,
    pub accepted: Vec<AcceptedUrl>,
}

impl ExtractedLinks {
    fn skip(&mut self, reason: &str, url: String) {
        self.skipped.push(SkippedUrl {
            reason: reason.to_string(),
            url,
        });
    }
}

/// Slices `text` by a span counted in utf-16 code units the way telegram
/// counts entity offsets. None if the span runs past the text or cuts a
/// character in half.
fn utf16_slice(text: &str, offset: usize, length: usize) -> Option<&str> {
    if length == 0 {
        return None;
    }
    let end = offset.checked_add(length)?;

    let mut start = None;
    let mut units = 0;
    // the trailing sentinel lets a span end exactly at the end of the text
    for (idx, ch) in text.char_indices().chain(std::iter::once((text.len(), '\0'))) {
        if units == offset {
            start = Some(idx);
        }
        if units == end {
            return text.get(start?..idx);
        }
        if units > end {
            return None;
        }
        units += ch.len_utf16();
    }
    None
}

pub fn find_all_url_types<'a>(text: &'a str, entities: &[MessageEntity]) -> Vec<UrlSpan<'a>> {
    entities
        .iter()
        .filter(|entity| entity.is_url())
        .map(|entity| match utf16_slice(text, entity.offset, entity.length) {
            Some(url) => UrlSpan::Text(url),
            None => UrlSpan::Invalid {
                offset: entity.offset,
                length: entity.length,
            },
        })
        .collect()
}

/// Telegram marks bare domains like `x.co` as urls, those are assumed http
pub fn normalize_url(raw: &str) -> Result<Url> {
    let candidate = if raw.contains("://") {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("http://{raw}"))
    };

    let url = Url::parse(&candidate)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidArgument(format!("unsupported scheme {other}"))),
    }
}

/// Resolves every span in order. Resolution failures are reported back as
/// skipped urls, never as errors.
pub async fn parse_link_contents(
    spans: &[UrlSpan<'_>],
    resolver: &dyn Resolver,
    log: &dyn EventLog,
) -> ExtractedLinks {
    let mut extracted = ExtractedLinks::default();

    for span in spans {
        let raw = match span {
            UrlSpan::Text(raw) => *raw,
            UrlSpan::Invalid { offset, length } => {
                log.warn(format_args!(
                    "url entity at {offset} with length {length} is outside the text"
                ));
                extracted.skip("Invalid url span", format!("{offset}:{length}"));
                continue;
            }
        };

        let url = match normalize_url(raw) {
            Ok(url) => url,
            Err(why) => {
                log.debug(format_args!("skipping {raw:?}: {why}"));
                extracted.skip("Invalid url", raw.to_string());
                continue;
            }
        };

        match resolver.resolve(url.as_str()).await {
            Resolution::Title(title) => extracted.accepted.push(AcceptedUrl {
                url: url.into(),
                title,
            }),
            Resolution::Skipped(reason) => {
                log.debug(format_args!("skipping {raw}: {reason}"));
                extracted.skipped.push(SkippedUrl {
                    reason,
                    url: raw.to_string(),
                });
            }
        }
    }

    extracted
}

/// Persists the accepted urls as links submitted by `author` at
/// `submitted_at`, in one batch.
pub fn create_links_from_message(
    store: &dyn LinkStore,
    author: &User,
    accepted: &[AcceptedUrl],
    submitted_at: DateTime<Utc>,
) -> Result<Vec<Link>> {
    if accepted.is_empty() {
        return Ok(Vec::new());
    }

    let by_username = author.display_name();
    let links = accepted
        .iter()
        .map(|url| {
            Link::new(
                url.url.clone(),
                url.title.trim().to_string(),
                author.id,
                by_username.clone(),
                submitted_at,
            )
        })
        .collect();

    Ok(store.create_multi(links)?)
}
