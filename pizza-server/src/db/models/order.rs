//! Order Model
//!
//! An order is a self-contained snapshot: item names, sizes, extras and unit
//! prices are copied from the catalog at checkout and never re-derived, so a
//! later catalog edit cannot change order history.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order lifecycle status
///
/// pending → preparing → out_for_delivery → delivered, with cancelled
/// reachable from any non-terminal state. Transitions are admin-triggered
/// direct overwrites; there are no guards and no automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Embedded line snapshot (copied at order time, not a catalog reference)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub size: String,
    #[serde(default)]
    pub extras: Vec<String>,
    pub quantity: i32,
    /// Unit price at order time
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub address: String,
    /// Delivery area name, validated against the area table at checkout
    pub area: String,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub payment_method: String,
    pub special_instructions: Option<String>,
    /// ETA copied from the area at checkout
    pub estimated_delivery: Option<String>,
    /// Unix millis
    pub created_at: i64,
    pub updated_at: i64,
}

/// One submitted cart line; the server resolves the pizza and prices it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub pizza_id: String,
    pub size: String,
    #[serde(default)]
    pub extras: Vec<String>,
    pub quantity: i32,
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub address: String,
    pub area: String,
    pub items: Vec<OrderLineInput>,
    pub payment_method: Option<String>,
    pub special_instructions: Option<String>,
}

/// Admin-side partial update. The item snapshot and totals are deliberately
/// absent: an order's financials are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
}
