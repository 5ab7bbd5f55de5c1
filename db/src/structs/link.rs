use crate::errors::{Error, Result};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// A link shared in chat. Records are never modified once created, `id` is
/// only assigned by the store and a link without one has not been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Option<i64>,
    pub link: String,
    pub title: String,
    // telegram user id of whoever shared the link
    pub by: i64,
    pub by_username: String,
    // submission time, not the time it was written to the store
    pub date: DateTime<Utc>,
}

impl Link {
    #[inline]
    pub fn new(
        link: String,
        title: String,
        by: i64,
        by_username: String,
        date: DateTime<Utc>,
    ) -> Link {
        Link {
            id: None,
            link,
            title,
            by,
            by_username,
            date,
        }
    }

    #[inline(always)]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Builds an unpersisted link out of a json mapping. All of `link`, `title`,
    /// `by`, `by_username` and `date` (rfc3339) must be present.
    pub fn from_dict(data: &Value) -> Result<Link> {
        let map = match data {
            Value::Object(map) => map,
            _ => return Err(Error::invalid("data must be a mapping")),
        };
        if map.is_empty() {
            return Err(Error::invalid("data must not be empty"));
        }

        let link = required_str(map, "link")?;
        if link.is_empty() {
            return Err(Error::invalid("`link` must not be empty"));
        }
        let title = required_str(map, "title")?;
        let by = required(map, "by")?
            .as_i64()
            .ok_or_else(|| Error::invalid("`by` must be an integer"))?;
        let by_username = required_str(map, "by_username")?;
        let date = decode_date(required_str(map, "date")?)
            .map_err(|why| Error::invalid(format!("`date` is not rfc3339: {why}")))?;

        Ok(Link::new(
            link.to_string(),
            title.to_string(),
            by,
            by_username.to_string(),
            date,
        ))
    }
}

fn required<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    map.get(key)
        .ok_or_else(|| Error::invalid(format!("missing required key `{key}`")))
}

fn required_str<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    required(map, key)?
        .as_str()
        .ok_or_else(|| Error::invalid(format!("`{key}` must be a string")))
}

// Fixed width so that ordering the text column orders by time
#[inline(always)]
pub(crate) fn encode_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[inline(always)]
pub(crate) fn decode_date(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|date| date.with_timezone(&Utc))
}
