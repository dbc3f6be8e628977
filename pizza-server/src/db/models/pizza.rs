//! Pizza Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Catalog entry. Managed by the admin panel; read-only to the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pizza {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    /// Base price for a Medium; size tiers multiply this
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub featured: bool,
    /// Customer rating, 0–5
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    pub category: String,
    pub is_veg: Option<bool>,
    pub is_spicy: Option<bool>,
    pub is_available: Option<bool>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
    pub ingredients: Option<Vec<String>>,
}

/// Partial update; absent fields are left untouched by the merge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_veg: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_spicy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}
