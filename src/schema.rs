//! Table shape the parcel store relies on.
//!
//! Creating and migrating the table is the caller's business; these helpers
//! exist so callers and tests can set it up the same way.

use rusqlite::Connection;
use tracing::debug;

pub const PARCEL_TABLE: &str = "parcel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
}

impl DataType {
    fn sql(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    /// Never reuse a rowid, tracked in `sqlite_sequence`.
    Autoincrement,
    NotNull,
}

impl ColumnConstraint {
    fn sql(&self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::Autoincrement => "AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn sql(&self) -> String {
        let mut parts = vec![self.name.clone(), self.data_type.sql().to_string()];
        parts.extend(self.constraints.iter().map(|c| c.sql().to_string()));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Render an idempotent `CREATE TABLE` statement
    pub fn create_statement(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDefinition::sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            self.name,
            columns.join(", ")
        )
    }
}

/// The `parcel` table.
pub fn parcel_table() -> TableDefinition {
    use ColumnConstraint::*;
    use DataType::*;

    TableDefinition::new(PARCEL_TABLE)
        .add_column(
            ColumnDefinition::new("number", Integer)
                .with_constraint(PrimaryKey)
                .with_constraint(Autoincrement),
        )
        .add_column(ColumnDefinition::new("client", Integer).with_constraint(NotNull))
        .add_column(ColumnDefinition::new("status", Text).with_constraint(NotNull))
        .add_column(ColumnDefinition::new("address", Text).with_constraint(NotNull))
        .add_column(ColumnDefinition::new("created_at", Text).with_constraint(NotNull))
}

/// Create the parcel table if it does not exist yet.
pub fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    let sql = parcel_table().create_statement();
    debug!(table = PARCEL_TABLE, "initializing schema");
    conn.execute_batch(&sql)
}

/// Remove every parcel and reset numbering so the next insert gets 1.
pub fn truncate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "DELETE FROM parcel; DELETE FROM sqlite_sequence WHERE name = 'parcel';",
    )
}
