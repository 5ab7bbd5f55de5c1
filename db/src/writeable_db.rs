use crate::connections::GetConnectionMutable;
use crate::structs::{encode_date, Link};
use crate::ReadOnlyDb;

use log::{debug, trace};
use rusqlite::{params, Result, Transaction, TransactionBehavior};

/// A scoped write. Everything put into the batch becomes visible on
/// `commit`, dropping the batch before that rolls all of it back.
pub struct Batch<'conn> {
    tx: Transaction<'conn>,
    count: usize,
}

impl Batch<'_> {
    pub fn put(&mut self, link: &Link) -> Result<i64> {
        trace!("batching link {:?}", link.link);
        self.tx.execute(
            "INSERT INTO link (link, title, \"by\", by_username, date)
            VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                link.link,
                link.title,
                link.by,
                link.by_username,
                encode_date(&link.date)
            ],
        )?;
        self.count += 1;
        Ok(self.tx.last_insert_rowid())
    }

    pub fn commit(self) -> Result<()> {
        let count = self.count;
        self.tx.commit()?;
        debug!("commited batch of {count} links");
        Ok(())
    }
}

pub trait WriteableDb: GetConnectionMutable + ReadOnlyDb {
    #[inline]
    fn batch(&mut self) -> Result<Batch<'_>> {
        // take the write lock up front rather than on the first insert
        let tx = self
            .get_mutable_connection()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(Batch { tx, count: 0 })
    }

    /// Inserts every link in a single transaction, returning the assigned ids
    /// in input order.
    #[inline]
    fn insert_links(&mut self, links: &[Link]) -> Result<Vec<i64>> {
        let mut batch = self.batch()?;
        let mut ids = Vec::with_capacity(links.len());
        for link in links {
            ids.push(batch.put(link)?);
        }
        batch.commit()?;
        Ok(ids)
    }
}
