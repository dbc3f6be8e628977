//! Shopping cart — ephemeral, per-checkout value object
//!
//! The cart lives only for the duration of a checkout request: the storefront
//! accumulates lines client-side and submits them all at once, and the server
//! replays them through [`Cart::add_line`] so duplicate slots collapse before
//! pricing. Nothing here is persisted; the order snapshot is the durable copy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// One cart entry: a pizza in a specific size with a set of extras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub pizza_id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub size: String,
    #[serde(default)]
    pub extras: Vec<String>,
    pub quantity: i32,
    pub unit_price: f64,
}

impl CartLine {
    /// Same slot iff pizza, size and extras all match.
    /// Extras compare as a set — label order does not matter.
    fn same_slot(&self, other: &CartLine) -> bool {
        self.pizza_id == other.pizza_id
            && self.size == other.size
            && same_extras(&self.extras, &other.extras)
    }
}

fn same_extras(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&str> = a.iter().map(String::as_str).collect();
    let mut b: Vec<&str> = b.iter().map(String::as_str).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Accumulates lines pre-checkout. Single owner, mutated synchronously.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line; if a line with the same (pizza, size, extras-set) slot
    /// already exists, its quantity is incremented instead of appending.
    pub fn add_line(&mut self, line: CartLine) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.same_slot(&line)) {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Set the quantity of the FIRST line matching this pizza id.
    ///
    /// Matching deliberately ignores size and extras: two lines for the same
    /// pizza in different sizes are not distinguished here. This mirrors the
    /// storefront's behavior and is kept as-is on purpose.
    pub fn update_quantity(&mut self, pizza_id: &str, quantity: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.pizza_id == pizza_id) {
            line.quantity = quantity;
        }
    }

    /// Remove every line with this pizza id, regardless of size or extras.
    pub fn remove_line(&mut self, pizza_id: &str) {
        self.lines.retain(|l| l.pizza_id != pizza_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals (unit price × quantity), in exact decimal.
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| money::line_total(money::to_decimal(l.unit_price), l.quantity))
            .sum()
    }
}
