use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Cannot generate {volume} {child} row(s) per parent: no {parent} identifiers available")]
    EmptyParentSet {
        child:  &'static str,
        parent: &'static str,
        volume: usize,
    },

    #[error("Loading table '{table}' failed: {source}")]
    SinkFailure {
        table:  String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SeedError {
    /// Table name for sink failures, used by the runner's exit report.
    pub fn failed_table(&self) -> Option<&str> {
        match self {
            Self::SinkFailure { table, .. } => Some(table),
            _ => None,
        }
    }
}

pub type SeedResult<T> = Result<T, SeedError>;
