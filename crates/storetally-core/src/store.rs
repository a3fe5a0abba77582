//! Store figures as read off the screen and as exported.

use serde::{Deserialize, Serialize};

/// One store row as displayed, before any numeric parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReading {
    pub name: String,
    /// Currency-formatted, e.g. `"¥1,234"`.
    pub sales: String,
    pub order_count: String,
}

/// Numeric form of a store's figures, as posted to the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub restaurant_name: String,
    pub sales: i64,
    pub order_count: i64,
}

/// Request body for the export endpoint: `{"data": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub data: Vec<ExportRecord>,
}
