//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Generators never see a connection; the orchestrator hands finished
//! tables to the store through the Sink trait.

use crate::{
    error::SeedResult,
    record::TableBatch,
    sink::Sink,
};
use rusqlite::{params_from_iter, Connection};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> SeedResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode: one writer per run, readers never block it.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SeedResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    // ── Full-table replace ─────────────────────────────────────

    /// Drop, recreate and fill `batch.table` in one transaction.
    /// Column types come from the batch's column descriptors.
    pub fn replace_table(&mut self, batch: &TableBatch) -> SeedResult<()> {
        let table = quote_ident(batch.table);
        let column_defs = batch
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(c.name), c.kind.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");
        let column_names = batch
            .columns
            .iter()
            .map(|c| quote_ident(c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=batch.columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} ({column_defs});"
        ))?;
        {
            let mut stmt =
                tx.prepare(&format!("INSERT INTO {table} ({column_names}) VALUES ({placeholders})"))?;
            for row in &batch.rows {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    // ── Inspection (tests and run summaries) ───────────────────

    pub fn row_count(&self, table: &str) -> SeedResult<i64> {
        let n: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
            [],
            |r| r.get(0),
        )?;
        Ok(n)
    }

    pub fn column_names(&self, table: &str) -> SeedResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn distinct_count(&self, table: &str, column: &str) -> SeedResult<i64> {
        let n: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(DISTINCT {}) FROM {}",
                quote_ident(column),
                quote_ident(table)
            ),
            [],
            |r| r.get(0),
        )?;
        Ok(n)
    }

    /// Rows of `child` whose `fk` has no match in `parent.pk`.
    pub fn orphan_count(&self, child: &str, fk: &str, parent: &str, pk: &str) -> SeedResult<i64> {
        let n: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {child} c
                 WHERE NOT EXISTS (SELECT 1 FROM {parent} p WHERE p.{pk} = c.{fk})",
                child = quote_ident(child),
                parent = quote_ident(parent),
                pk = quote_ident(pk),
                fk = quote_ident(fk),
            ),
            [],
            |r| r.get(0),
        )?;
        Ok(n)
    }

    pub fn min_real(&self, table: &str, column: &str) -> SeedResult<Option<f64>> {
        let min: Option<f64> = self.conn.query_row(
            &format!("SELECT MIN({}) FROM {}", quote_ident(column), quote_ident(table)),
            [],
            |r| r.get(0),
        )?;
        Ok(min)
    }
}

impl Sink for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn load(&mut self, batch: &TableBatch) -> anyhow::Result<()> {
        self.replace_table(batch)?;
        Ok(())
    }
}

/// Double-quote an SQL identifier.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
