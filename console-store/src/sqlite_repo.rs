use std::path::Path;

use packet_model::TaskId;
use rusqlite::{params, Connection};

use crate::{PacketSource, StoreError};

/// SQLite-backed console packet store.
///
/// The export path only reads; `ensure_schema` and `insert_packet` exist
/// for fixtures and demos. The connection is released when the repo is
/// dropped, on success and failure alike.
pub struct ConsoleRepo {
    conn: Connection,
}

impl ConsoleRepo {
    /// Open a file-backed datastore at `path`.
    ///
    /// No DDL is issued here: this side of the tool reads datastores
    /// produced elsewhere, and a missing `consoles` table surfaces as a
    /// query error instead.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory datastore with the schema created, for tests.
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// Create the `consoles` table if absent. Fixture/demo setup only.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS consoles (
                packet TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Append one raw payload row. Fixture/demo setup only.
    pub fn insert_packet(&self, raw: &str) -> Result<(), StoreError> {
        self.conn
            .execute("INSERT INTO consoles (packet) VALUES (?1)", params![raw])?;
        Ok(())
    }

    /// Row count for one task, matched the same way as the fetch.
    pub fn count_for_task(&self, task_id: &TaskId) -> Result<i64, StoreError> {
        let n = self.conn.query_row(
            "SELECT count(*) FROM consoles WHERE json_extract(packet, '$.a_task_id') = ?1",
            params![task_id.as_str()],
            |r| r.get(0),
        )?;
        Ok(n)
    }

    /// Distinct task identifiers present in the datastore, rendered as
    /// text so numeric identifiers come back as digit strings.
    pub fn list_task_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT CAST(json_extract(packet, '$.a_task_id') AS TEXT)
             FROM consoles
             WHERE json_extract(packet, '$.a_task_id') IS NOT NULL
             ORDER BY 1",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

impl PacketSource for ConsoleRepo {
    /// `json_extract` filters on the identifier nested inside the payload;
    /// there is no dedicated task-id column. Exact match, engine row order.
    fn fetch_packets(&self, task_id: &TaskId) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT packet FROM consoles WHERE json_extract(packet, '$.a_task_id') = ?1",
        )?;
        let rows = stmt.query_map(params![task_id.as_str()], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}
