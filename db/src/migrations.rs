use super::queries;
use log::{info, trace};

use rusqlite::{Connection, Result};

macro_rules! migration {
    ( $n:literal, $( $x:literal ),* ) => {
        paste::item! {
            fn [< migration_$n >] (conn: &Connection) -> Result<()> {
                trace!("running migration {}", $n);

                $(
                    conn.execute($x, [])?;
                )*
                queries::set_version(conn, $n)?;
                trace!("finished migration {}", $n);
                Ok(())
            }
        }
    };
}

migration![
    1,
    "CREATE TABLE link (
        id INTEGER PRIMARY KEY,
        link TEXT NOT NULL,
        title TEXT NOT NULL,
        \"by\" INTEGER NOT NULL,
        by_username TEXT DEFAULT NULL,
        date TEXT NOT NULL
    );",
    "CREATE INDEX idx_link_date ON link (date);"
];

pub fn migrate(conn: &mut Connection) -> Result<()> {
    // be sure to increment this everytime a new migration is added
    const FINAL_VER: u32 = 1;

    let ver = queries::get_version(conn)?;
    info!("database version is currently: {ver} with target ver {FINAL_VER}");
    if ver == FINAL_VER {
        return Ok(());
    }

    let tx = conn.transaction()?;
    trace!("starting migration transaction");

    if ver < 1 {
        migration_1(&tx)?;
    }

    trace!("commiting migration transaction");
    tx.commit()?;
    info!("migration successful");
    Ok(())
}
