use crate::errors::{Error, Result};
use crate::structs::Link;
use crate::{read_only_db_call, writable_db_call, ReadOnlyDb, WriteableDb};

use log::{debug, info};
use std::path::{Path, PathBuf};

/// Everything the bot is allowed to do with stored links.
pub trait LinkStore: Send + Sync {
    /// Persists all of `links` atomically, either every link is written or
    /// none are. Returns the links in input order with their ids assigned.
    fn create_multi(&self, links: Vec<Link>) -> Result<Vec<Link>>;

    /// Up to `limit` links, newest first, skipping the first `offset`.
    fn list_links(&self, limit: u32, offset: u32) -> Result<Vec<Link>>;

    fn read(&self, id: &str) -> Result<Option<Link>>;
}

/// Parses an id as handed out by the store. Zero is never assigned by sqlite
/// so it is rejected along with anything that is not a positive integer.
pub fn parse_id(id: &str) -> Result<i64> {
    match id.trim().parse::<i64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(Error::InvalidArgument(format!("id {id:?} is not valid"))),
    }
}

/// Sqlite backed store. Holds no connection, each operation opens its own so
/// a single `Db` can be shared between concurrent requests.
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    /// Opens the database at `path`, creating and migrating it if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Db> {
        let path = path.into();
        crate::migrate(&path)?;
        info!("sucessfully loaded and migrated db at {}", path.display());
        Ok(Db { path })
    }

    #[inline(always)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LinkStore for Db {
    fn create_multi(&self, links: Vec<Link>) -> Result<Vec<Link>> {
        if links.is_empty() {
            return Ok(links);
        }
        if let Some(persisted) = links.iter().find(|link| link.is_persisted()) {
            return Err(Error::InvalidArgument(format!(
                "link {} was already created",
                persisted.link
            )));
        }

        let ids = writable_db_call(&self.path, |mut db| db.insert_links(&links))?;
        debug!("created {} links", ids.len());

        Ok(links
            .into_iter()
            .zip(ids)
            .map(|(link, id)| Link {
                id: Some(id),
                ..link
            })
            .collect())
    }

    fn list_links(&self, limit: u32, offset: u32) -> Result<Vec<Link>> {
        read_only_db_call(&self.path, |db| db.list_links(limit, offset))
    }

    fn read(&self, id: &str) -> Result<Option<Link>> {
        let id = parse_id(id)?;
        read_only_db_call(&self.path, |db| db.get_link(id))
    }
}
