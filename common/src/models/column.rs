//! Column summary model.
//!
//! The service has shipped two shapes for the column-data body: a flat
//! `values` array, and `values: { index, data }`. Both decode into the same
//! [`ColumnSummary`]; the flat shape is what gets serialized.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Summary of one column: its (possibly clipped) values and row counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "WireSummary")]
pub struct ColumnSummary {
    /// Keys paired with `values`, when the service sends them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Vec<Value>>,
    /// Returned values (one entry per distinct value or row).
    pub values: Vec<Value>,
    /// Total number of values before clipping.
    pub values_length: u64,
    /// Total number of rows in the table.
    pub rows_length: u64,
    /// Rows left out of the returned sample.
    pub missing_rows: u64,
}

impl ColumnSummary {
    /// Whether the returned sample was clipped.
    pub fn is_clipped(&self) -> bool {
        self.missing_rows > 0 || (self.values.len() as u64) < self.values_length
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireValues {
    // A sequence would also match the struct variant positionally, so the
    // flat shape has to be tried first.
    Flat(Vec<Value>),
    Indexed {
        #[serde(default)]
        index: Option<Vec<Value>>,
        data: Vec<Value>,
    },
}

#[derive(Deserialize)]
struct WireSummary {
    values: WireValues,
    #[serde(default)]
    values_length: u64,
    #[serde(default)]
    rows_length: u64,
    #[serde(default)]
    missing_rows: u64,
    // Set when `index` sits next to a flat `values` array.
    #[serde(default)]
    index: Option<Vec<Value>>,
}

impl From<WireSummary> for ColumnSummary {
    fn from(wire: WireSummary) -> Self {
        let (index, values) = match wire.values {
            WireValues::Indexed { index, data } => (index, data),
            WireValues::Flat(values) => (wire.index, values),
        };
        Self {
            index,
            values,
            values_length: wire.values_length,
            rows_length: wire.rows_length,
            missing_rows: wire.missing_rows,
        }
    }
}
