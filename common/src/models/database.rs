//! Listing models.
//!
//! Bodies of the three listing endpoints (databases, tables, columns).

use serde::{Deserialize, Serialize};

/// Body of `GET /database/` and `POST /database/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseList {
    /// Uploaded database identifiers, in service order.
    pub databases: Vec<String>,
}

/// Body of `GET /database/{db}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableList {
    /// Table names of the database.
    pub tables: Vec<String>,
}

/// Body of `GET /database/{db}/{table}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnList {
    /// Column names of the table.
    pub columns: Vec<String>,
}

impl From<DatabaseList> for Vec<String> {
    fn from(list: DatabaseList) -> Self {
        list.databases
    }
}

impl From<TableList> for Vec<String> {
    fn from(list: TableList) -> Self {
        list.tables
    }
}

impl From<ColumnList> for Vec<String> {
    fn from(list: ColumnList) -> Self {
        list.columns
    }
}
