//! Query results shaped for JSON

use rusqlite::types::ValueRef;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// One result row: column name to value, in column order
pub type Row = Map<String, Value>;

/// Message reported for every successful write
pub const MUTATION_MESSAGE: &str = "Query executed successfully";

/// Outcome of one successful query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    /// Rows returned by a read
    Rows {
        /// Column names in result order
        columns: Vec<String>,
        /// Rows in result order
        rows: Vec<Row>,
    },
    /// Summary of a write
    Mutation {
        /// Human-readable status
        message: String,
        /// Rows changed, as reported by the engine
        rows_affected: usize,
    },
}

impl QueryOutcome {
    pub(crate) fn mutation(rows_affected: usize) -> Self {
        Self::Mutation {
            message: MUTATION_MESSAGE.to_string(),
            rows_affected,
        }
    }

    /// Result columns; empty for writes
    pub fn columns(&self) -> &[String] {
        match self {
            Self::Rows { columns, .. } => columns,
            Self::Mutation { .. } => &[],
        }
    }

    /// Result rows; empty for writes
    pub fn rows(&self) -> &[Row] {
        match self {
            Self::Rows { rows, .. } => rows,
            Self::Mutation { .. } => &[],
        }
    }

    /// Affected-row count for writes
    pub fn rows_affected(&self) -> Option<usize> {
        match self {
            Self::Rows { .. } => None,
            Self::Mutation { rows_affected, .. } => Some(*rows_affected),
        }
    }

    /// The `results` payload: the row array for reads, the summary for writes
    pub fn results_json(&self) -> Value {
        match self {
            Self::Rows { rows, .. } => {
                Value::Array(rows.iter().cloned().map(Value::Object).collect())
            }
            Self::Mutation {
                message,
                rows_affected,
            } => serde_json::json!({
                "message": message,
                "rows_affected": rows_affected,
            }),
        }
    }
}

/// Map a SQLite value to JSON.
///
/// Non-finite reals become `null`, text is decoded lossily and blobs are
/// hex-encoded.
pub fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(hex::encode(bytes)),
    }
}
