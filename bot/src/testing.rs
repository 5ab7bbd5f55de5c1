//! In-memory stand-ins for the store and resolver.

use crate::handler::links::{Resolution, Resolver};

use async_trait::async_trait;
use db::{Link, LinkStore};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    links: Mutex<Vec<Link>>,
    unavailable: bool,
}

impl MemoryStore {
    /// A store that fails every operation
    pub fn unavailable() -> MemoryStore {
        MemoryStore {
            links: Mutex::new(Vec::new()),
            unavailable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    fn check(&self) -> db::Result<()> {
        if self.unavailable {
            Err(db::Error::StoreUnavailable(rusqlite::Error::InvalidPath(
                PathBuf::from("links.db3"),
            )))
        } else {
            Ok(())
        }
    }
}

impl LinkStore for MemoryStore {
    fn create_multi(&self, links: Vec<Link>) -> db::Result<Vec<Link>> {
        self.check()?;
        let mut stored = self.links.lock().unwrap();
        let mut created = Vec::with_capacity(links.len());
        for link in links {
            let link = Link {
                id: Some(stored.len() as i64 + 1),
                ..link
            };
            stored.push(link.clone());
            created.push(link);
        }
        Ok(created)
    }

    fn list_links(&self, limit: u32, offset: u32) -> db::Result<Vec<Link>> {
        self.check()?;
        let mut links = self.links.lock().unwrap().clone();
        links.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(links
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    fn read(&self, id: &str) -> db::Result<Option<Link>> {
        self.check()?;
        let id = db::parse_id(id)?;
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|link| link.id == Some(id))
            .cloned())
    }
}

/// Answers from a fixed table, anything unknown is skipped as unavailable.
/// Records every url it's asked about.
#[derive(Debug, Default)]
pub struct StubResolver {
    answers: HashMap<String, Resolution>,
    calls: Mutex<Vec<String>>,
}

impl StubResolver {
    pub fn new() -> StubResolver {
        StubResolver::default()
    }

    pub fn title(mut self, url: &str, title: &str) -> StubResolver {
        self.answers
            .insert(url.to_string(), Resolution::Title(title.to_string()));
        self
    }

    pub fn skip(mut self, url: &str, reason: &str) -> StubResolver {
        self.answers
            .insert(url.to_string(), Resolution::Skipped(reason.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Resolver for StubResolver {
    async fn resolve(&self, url: &str) -> Resolution {
        self.calls.lock().unwrap().push(url.to_string());
        self.answers
            .get(url)
            .cloned()
            .unwrap_or_else(|| Resolution::Skipped("Unavailable".to_string()))
    }
}
