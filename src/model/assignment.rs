use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// What a waiter is responsible for: a single table or a named zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRef {
    Table(u32),
    Zone(String),
}

impl TableRef {
    /// Whether a ticket for `table_number` falls under this assignment.
    /// Zones are opaque here, so they never match a bare table number.
    pub fn covers_table(&self, table_number: u32) -> bool {
        matches!(self, TableRef::Table(n) if *n == table_number)
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableRef::Table(n) => write!(f, "table {n}"),
            TableRef::Zone(zone) => write!(f, "zone {zone}"),
        }
    }
}

/// Current responsibility of one waiter. Keyed by waiter name; a reassignment
/// overwrites the record and no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiterAssignment {
    pub waiter: String,
    pub table: TableRef,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AssignmentCreate {
    pub table: TableRef,
    pub assigned_at: DateTime<Utc>,
}
