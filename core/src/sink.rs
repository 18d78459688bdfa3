//! Sink boundary — where generated tables leave the pipeline.
//!
//! RULE: A sink replaces a table wholesale or fails loudly.
//! It never appends to existing rows and never drops rows silently.

use crate::record::TableBatch;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// A destination that can take one full table at a time.
pub trait Sink {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Replace `batch.table` with exactly `batch.rows`.
    fn load(&mut self, batch: &TableBatch) -> anyhow::Result<()>;
}

/// Writes each table to `<dir>/<table>.jsonl`, one object per row.
///
/// Rows go to a temp file first and are renamed into place, so readers
/// see either the previous table or the complete new one.
pub struct JsonLinesSink {
    dir: PathBuf,
}

impl JsonLinesSink {
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("Cannot create {}: {e}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.jsonl"))
    }

    fn write_rows(path: &Path, batch: &TableBatch) -> anyhow::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for row in &batch.rows {
            let mut object = serde_json::Map::with_capacity(batch.columns.len());
            for (column, value) in batch.columns.iter().zip(row) {
                object.insert(column.name.to_string(), serde_json::to_value(value)?);
            }
            serde_json::to_writer(&mut out, &object)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Sink for JsonLinesSink {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    fn load(&mut self, batch: &TableBatch) -> anyhow::Result<()> {
        let target = self.table_path(batch.table);
        let staging = self.dir.join(format!(".{}.jsonl.tmp", batch.table));
        if let Err(e) = Self::write_rows(&staging, batch) {
            let _ = fs::remove_file(&staging);
            return Err(e.context(format!("writing {}", staging.display())));
        }
        fs::rename(&staging, &target)?;
        Ok(())
    }
}
