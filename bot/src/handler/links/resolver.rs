use async_trait::async_trait;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;

const MAX_TITLE_CHARS: usize = 200;
// the title lives in the head, nothing past this is read
const MAX_BODY_BYTES: usize = 256 * 1024;
const TITLE_END: &[u8] = b"</title>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Title(String),
    /// The url can't be stored, holds a reason to show the user
    Skipped(String),
}

/// Looks up what a url points to. Called once per url, never retried.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Resolution;
}

/// Fetches the page and uses its `<title>`, falling back to the url itself.
/// Request timeouts are whatever the client was built with.
#[derive(Debug, Clone)]
pub struct HttpTitleResolver {
    client: reqwest::Client,
}

impl HttpTitleResolver {
    pub const fn new(client: reqwest::Client) -> HttpTitleResolver {
        HttpTitleResolver { client }
    }
}

#[async_trait]
impl Resolver for HttpTitleResolver {
    async fn resolve(&self, url: &str) -> Resolution {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(why) => {
                info!("failed to fetch {url}: {why}");
                return Resolution::Skipped("Unavailable".to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!("{url} responded with {status}");
            return Resolution::Skipped(format!("Unavailable ({})", status.as_u16()));
        }

        if !is_html(&response) {
            debug!("{url} is not a html page");
            return Resolution::Title(url.to_string());
        }

        let title = match read_head(response).await {
            Ok(body) => extract_title(&body),
            Err(why) => {
                debug!("couldn't read body of {url}: {why}");
                None
            }
        };
        Resolution::Title(title.unwrap_or_else(|| url.to_string()))
    }
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| {
            let value = value.to_ascii_lowercase();
            value.contains("text/html") || value.contains("application/xhtml+xml")
        })
}

fn contains_title_end(body: &[u8], from: usize) -> bool {
    body[from.min(body.len())..]
        .windows(TITLE_END.len())
        .any(|window| window.eq_ignore_ascii_case(TITLE_END))
}

/// Reads the body up to the end of the first `</title>`, never more than
/// `MAX_BODY_BYTES`.
async fn read_head(mut response: Response) -> reqwest::Result<String> {
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        // a closing tag may straddle two chunks
        let from = body.len().saturating_sub(TITLE_END.len() - 1);
        body.extend_from_slice(&chunk);
        if body.len() >= MAX_BODY_BYTES || contains_title_end(&body, from) {
            break;
        }
    }
    body.truncate(MAX_BODY_BYTES);
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// The text of the first `<title>` in a page, whitespace collapsed and
/// entities decoded. None if there isn't one or it's blank.
pub fn extract_title(html: &str) -> Option<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title>").unwrap();
    }
    let raw = RE.captures(html)?.get(1)?.as_str();
    let decoded = html_escape::decode_html_entities(raw);
    let title = decoded.split_whitespace().collect::<Vec<&str>>().join(" ");

    if title.is_empty() {
        return None;
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        let mut truncated: String = title.chars().take(MAX_TITLE_CHARS - 1).collect();
        truncated.push('…');
        return Some(truncated);
    }
    Some(title)
}
