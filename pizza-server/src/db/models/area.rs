//! Area Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Delivery zone: fee, ETA and postal-code coverage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    /// Fee charged at checkout for orders delivered here
    pub delivery_fee: f64,
    /// Free-text ETA shown to customers ("30-45 min")
    pub delivery_time: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub postal_codes: Vec<String>,
    /// Running counter, incremented per checkout
    #[serde(default)]
    pub order_count: i64,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCreate {
    pub name: String,
    /// Defaults to the standard fee (3.99) when omitted
    pub delivery_fee: Option<f64>,
    pub delivery_time: String,
    pub is_active: Option<bool>,
    pub postal_codes: Option<Vec<String>>,
}

/// Partial update; absent fields are left untouched by the merge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_codes: Option<Vec<String>>,
}
