use crate::connections::GetConnectionImmutable;
use crate::queries::{self, LINK_COLUMNS};
use crate::structs::Link;

use rusqlite::{params, OptionalExtension, Result};

pub trait ReadOnlyDb: GetConnectionImmutable {
    /// Most recent first, ties broken by insertion order so that a page
    /// boundary never shifts between two identical queries
    #[inline]
    fn list_links(&self, limit: u32, offset: u32) -> Result<Vec<Link>> {
        let mut stmt = self.get_connection().prepare(&format!(
            "SELECT {LINK_COLUMNS} FROM link
            ORDER BY date DESC, id DESC
            LIMIT (?1) OFFSET (?2)"
        ))?;
        let rows = stmt.query_map(params![limit, offset], queries::link_from_row)?;

        let mut links = Vec::new();
        for row in rows {
            links.push(row?)
        }
        Ok(links)
    }

    #[inline]
    fn get_link(&self, id: i64) -> Result<Option<Link>> {
        self.get_connection()
            .query_row(
                &format!("SELECT {LINK_COLUMNS} FROM link WHERE id=(?1)"),
                [id],
                queries::link_from_row,
            )
            .optional()
    }

    #[inline]
    fn count_links(&self) -> Result<u64> {
        self.get_connection()
            .query_row("SELECT COUNT(*) FROM link", [], |row| row.get(0))
    }
}
