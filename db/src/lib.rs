mod errors;
mod migrations;
mod queries;
mod read_only_db;
mod store;
pub mod structs;
mod writeable_db;

pub use errors::{Error, Result};
pub use read_only_db::ReadOnlyDb;
pub use store::{parse_id, Db, LinkStore};
pub use structs::Link;
pub use writeable_db::{Batch, WriteableDb};

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

pub(crate) mod connections {
    use rusqlite::Connection;

    pub trait GetConnectionImmutable {
        fn get_connection(&self) -> &Connection;
    }

    pub trait GetConnectionMutable: GetConnectionImmutable {
        fn get_mutable_connection(&mut self) -> &mut Connection;
    }
}

pub struct ReadOnlyConn {
    conn: Connection,
}

impl connections::GetConnectionImmutable for ReadOnlyConn {
    #[inline]
    fn get_connection(&self) -> &Connection {
        &self.conn
    }
}

impl ReadOnlyDb for ReadOnlyConn {}

pub struct WriteableConn {
    conn: Connection,
}

impl connections::GetConnectionImmutable for WriteableConn {
    #[inline]
    fn get_connection(&self) -> &Connection {
        &self.conn
    }
}

impl connections::GetConnectionMutable for WriteableConn {
    #[inline]
    fn get_mutable_connection(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

impl ReadOnlyDb for WriteableConn {}

impl WriteableDb for WriteableConn {}

// How long a connection waits on another writer's lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[inline(always)]
fn open_database(path: &Path, read_only: bool) -> rusqlite::Result<Connection> {
    let conn = if read_only {
        Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?
    } else {
        Connection::open(path)?
    };
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

impl ReadOnlyConn {
    #[inline(always)]
    fn new(path: &Path) -> rusqlite::Result<ReadOnlyConn> {
        Ok(ReadOnlyConn {
            conn: open_database(path, true)?,
        })
    }
}

impl WriteableConn {
    #[inline(always)]
    fn new(path: &Path) -> rusqlite::Result<WriteableConn> {
        Ok(WriteableConn {
            conn: open_database(path, false)?,
        })
    }
}

#[inline]
pub fn migrate(path: &Path) -> Result<()> {
    migrations::migrate(&mut open_database(path, false)?)?;
    Ok(())
}

#[inline]
pub fn writable_db_call<F, T>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(WriteableConn) -> rusqlite::Result<T>,
{
    Ok(f(WriteableConn::new(path)?)?)
}

#[inline]
pub fn read_only_db_call<F, T>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(ReadOnlyConn) -> rusqlite::Result<T>,
{
    Ok(f(ReadOnlyConn::new(path)?)?)
}
