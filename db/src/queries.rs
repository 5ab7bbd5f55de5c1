use crate::structs::{decode_date, Link};
use rusqlite::types::Type;
use rusqlite::{Connection, Error, Result, Row};

pub(crate) const LINK_COLUMNS: &str = "id, link, title, \"by\", by_username, date";

#[inline(always)]
pub fn get_version(conn: &Connection) -> Result<u32> {
    conn.query_row("SELECT user_version FROM pragma_user_version;", [], |row| {
        row.get(0)
    })
}

#[inline(always)]
pub fn set_version(conn: &Connection, version: u32) -> Result<()> {
    conn.pragma_update(None, "user_version", version)
}

/// Maps a row selected with `LINK_COLUMNS`. Rows without a username get the
/// user id in its place.
pub fn link_from_row(row: &Row<'_>) -> Result<Link> {
    let by: i64 = row.get(3)?;
    let by_username: Option<String> = row.get(4)?;
    let raw_date: String = row.get(5)?;
    let date = decode_date(&raw_date)
        .map_err(|why| Error::FromSqlConversionFailure(5, Type::Text, Box::new(why)))?;

    Ok(Link {
        id: Some(row.get(0)?),
        link: row.get(1)?,
        title: row.get(2)?,
        by,
        by_username: by_username.unwrap_or_else(|| by.to_string()),
        date,
    })
}
