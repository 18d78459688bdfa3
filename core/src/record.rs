//! Record shape and table batches.
//!
//! RULE: Sinks know nothing about entity types.
//! Every row type describes its own columns through `Record`, and the
//! orchestrator hands sinks type-erased `TableBatch`es built from them.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{ToSql, ToSqlOutput, Value};
use serde::Serialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Real,
    Date,
    Timestamp,
}

impl ColumnKind {
    /// Declared SQL type for CREATE TABLE.
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Text      => "TEXT",
            Self::Real      => "REAL",
            Self::Date      => "DATE",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// One cell of a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Real(f64),
    #[serde(serialize_with = "serialize_date")]
    Date(NaiveDate),
    #[serde(serialize_with = "serialize_timestamp")]
    Timestamp(NaiveDateTime),
}

impl FieldValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Text(_)      => ColumnKind::Text,
            Self::Real(_)      => ColumnKind::Real,
            Self::Date(_)      => ColumnKind::Date,
            Self::Timestamp(_) => ColumnKind::Timestamp,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        Self::Real(x)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(ts: NaiveDateTime) -> Self {
        Self::Timestamp(ts)
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Text(s)       => ToSqlOutput::from(s.as_str()),
            Self::Real(x)       => ToSqlOutput::from(*x),
            Self::Date(d)       => ToSqlOutput::Owned(Value::Text(d.format(DATE_FORMAT).to_string())),
            Self::Timestamp(ts) => {
                ToSqlOutput::Owned(Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()))
            }
        })
    }
}

fn serialize_date<S: serde::Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&d.format(DATE_FORMAT))
}

fn serialize_timestamp<S: serde::Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

/// A row type that knows its destination table and column layout.
pub trait Record {
    const TABLE: &'static str;
    const COLUMNS: &'static [Column];

    /// Cell values in `COLUMNS` order.
    fn values(&self) -> Vec<FieldValue>;
}

/// A whole table's worth of rows, ready for a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBatch {
    pub table:   &'static str,
    pub columns: &'static [Column],
    pub rows:    Vec<Vec<FieldValue>>,
}

impl TableBatch {
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        Self {
            table:   R::TABLE,
            columns: R::COLUMNS,
            rows:    records.iter().map(Record::values).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tick {
        label: String,
        price: f64,
        on:    NaiveDate,
    }

    impl Record for Tick {
        const TABLE: &'static str = "ticks";
        const COLUMNS: &'static [Column] = &[
            Column::new("label", ColumnKind::Text),
            Column::new("price", ColumnKind::Real),
            Column::new("on", ColumnKind::Date),
        ];

        fn values(&self) -> Vec<FieldValue> {
            vec![self.label.clone().into(), self.price.into(), self.on.into()]
        }
    }

    #[test]
    fn batch_cells_match_declared_columns() {
        let on = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let batch = TableBatch::from_records(&[
            Tick { label: "a".into(), price: 1.5, on },
            Tick { label: "b".into(), price: 2.5, on },
        ]);
        assert_eq!(batch.table, "ticks");
        assert_eq!(batch.len(), 2);
        for row in &batch.rows {
            let kinds: Vec<_> = row.iter().map(FieldValue::kind).collect();
            let declared: Vec<_> = batch.columns.iter().map(|c| c.kind).collect();
            assert_eq!(kinds, declared);
        }
        assert_eq!(batch.column_index("price"), Some(1));
    }

    #[test]
    fn dates_serialize_as_iso_strings() {
        let on = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let ts = on.and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(serde_json::to_string(&FieldValue::Date(on)).unwrap(), "\"2024-01-02\"");
        assert_eq!(
            serde_json::to_string(&FieldValue::Timestamp(ts)).unwrap(),
            "\"2024-01-02 03:04:05\""
        );
        assert_eq!(serde_json::to_string(&FieldValue::Real(1.25)).unwrap(), "1.25");
    }
}
