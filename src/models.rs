//! Data types that flow between the seeder, the store, and the HTTP layer.

use serde::Serialize;
use serde_json::Value;

/// One component read from a spec file, ready to be inserted.
#[derive(Debug, Clone)]
pub struct SpecItem {
    pub component_type: String,
    pub name: String,
    /// Parsed attribute record.
    pub specs: Value,
    /// Path relative to the specs directory.
    pub source_path: String,
}

/// A component row loaded from the database.
#[derive(Debug, Clone)]
pub struct ComponentRecord {
    pub id: i64,
    pub component_type: String,
    pub name: String,
    pub specs: Value,
    pub source_path: Option<String>,
    pub created_at: i64,
}

/// A computed price for one stored component.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceQuote {
    pub component: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub price: f64,
    pub currency: String,
}
