//! Stats API Handlers
//!
//! The overview recomputes everything from scratch per request: load all
//! orders, users and pizzas, then aggregate with linear scans. No cache, no
//! pagination — acceptable at the shop sizes this backend targets.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus, UserStatus};
use crate::db::repository::{OrderRepository, PizzaRepository, UserRepository};
use crate::money;
use crate::utils::{AppError, AppResult, time};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RecentOrder {
    pub id: String,
    pub customer: String,
    /// "2x Margherita, 1x Diavola"
    pub items: String,
    /// Display-formatted: "$39.61"
    pub total: String,
    pub status: OrderStatus,
    /// Creation time (Unix millis)
    pub time: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopularPizza {
    pub name: String,
    /// Cumulative quantity ordered
    pub orders: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    /// All-time revenue (sum of every order total)
    pub total_revenue: f64,
    /// Orders created since store-timezone midnight
    pub orders_today: i64,
    pub active_customers: i64,
    pub pizza_types: i64,
    /// 5 most recent orders, newest first
    pub recent_orders: Vec<RecentOrder>,
    /// Top 5 pizzas by quantity; ties keep first-encounter order
    pub popular_pizzas: Vec<PopularPizza>,
}

// ============================================================================
// Handler
// ============================================================================

/// GET /stats/overview - 管理面板总览
pub async fn overview(State(state): State<ServerState>) -> AppResult<Json<StatsOverview>> {
    let order_repo = OrderRepository::new(state.db.clone());
    let user_repo = UserRepository::new(state.db.clone());
    let pizza_repo = PizzaRepository::new(state.db.clone());

    // All-or-nothing aggregate read: any single failure fails the request
    let (orders, users, pizzas) = tokio::try_join!(
        order_repo.find_all(),
        user_repo.find_all(),
        pizza_repo.find_all(),
    )
    .map_err(AppError::from)?;

    let midnight = time::today_start_millis(state.config.timezone);
    let orders_today = orders.iter().filter(|o| o.created_at >= midnight).count() as i64;

    let total_revenue: Decimal = orders.iter().map(|o| money::to_decimal(o.total)).sum();

    let active_customers = users
        .iter()
        .filter(|u| u.status == UserStatus::Active)
        .count() as i64;

    Ok(Json(StatsOverview {
        total_revenue: money::to_f64(total_revenue),
        orders_today,
        active_customers,
        pizza_types: pizzas.len() as i64,
        recent_orders: recent_orders(&orders),
        popular_pizzas: popular_pizzas(&orders),
    }))
}

/// 5 most recent orders by creation time, newest first
fn recent_orders(orders: &[Order]) -> Vec<RecentOrder> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sorted
        .into_iter()
        .take(5)
        .map(|o| RecentOrder {
            id: o.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            customer: o.customer_name.clone(),
            items: o
                .items
                .iter()
                .map(|i| format!("{}x {}", i.quantity, i.name))
                .collect::<Vec<_>>()
                .join(", "),
            total: format!("${:.2}", o.total),
            status: o.status,
            time: o.created_at,
        })
        .collect()
}

/// Top 5 pizzas by cumulative ordered quantity
///
/// The scan walks orders in creation order and the sort is stable, so
/// equal counts keep the insertion order of first encounter.
fn popular_pizzas(orders: &[Order]) -> Vec<PopularPizza> {
    let mut counts: Vec<(String, i64)> = Vec::new();
    for order in orders {
        for item in &order.items {
            match counts.iter_mut().find(|(name, _)| *name == item.name) {
                Some((_, count)) => *count += i64::from(item.quantity),
                None => counts.push((item.name.clone(), i64::from(item.quantity))),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(5)
        .map(|(name, orders)| PopularPizza { name, orders })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::OrderItem;

    fn order(created_at: i64, customer: &str, items: &[(&str, i32)], total: f64) -> Order {
        Order {
            id: None,
            customer_name: customer.to_string(),
            customer_phone: "555-0100".to_string(),
            customer_email: None,
            address: "1 Main St".to_string(),
            area: "Downtown".to_string(),
            items: items
                .iter()
                .map(|(name, quantity)| OrderItem {
                    name: name.to_string(),
                    size: "Medium".to_string(),
                    extras: vec![],
                    quantity: *quantity,
                    price: 10.0,
                    image: String::new(),
                })
                .collect(),
            subtotal: total,
            delivery_fee: 0.0,
            tax: 0.0,
            total,
            status: OrderStatus::Pending,
            payment_method: "cash".to_string(),
            special_instructions: None,
            estimated_delivery: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn popular_pizzas_ranks_by_quantity_with_stable_ties() {
        let orders = vec![
            order(1, "a", &[("Margherita", 2), ("Diavola", 2)], 40.0),
            order(2, "b", &[("Quattro Formaggi", 5)], 50.0),
            order(3, "c", &[("Diavola", 1)], 10.0),
        ];

        let top = popular_pizzas(&orders);
        assert_eq!(top[0].name, "Quattro Formaggi");
        assert_eq!(top[0].orders, 5);
        // Diavola overtakes Margherita (3 vs 2)
        assert_eq!(top[1].name, "Diavola");
        assert_eq!(top[2].name, "Margherita");
    }

    #[test]
    fn popular_pizzas_tie_keeps_first_encounter_order() {
        let orders = vec![
            order(1, "a", &[("Margherita", 2)], 20.0),
            order(2, "b", &[("Diavola", 2)], 20.0),
        ];

        let top = popular_pizzas(&orders);
        assert_eq!(top[0].name, "Margherita");
        assert_eq!(top[1].name, "Diavola");
    }

    #[test]
    fn recent_orders_takes_five_newest_first() {
        let orders: Vec<Order> = (0..7)
            .map(|i| order(i, &format!("customer-{i}"), &[("Margherita", 1)], 12.5))
            .collect();

        let recent = recent_orders(&orders);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].customer, "customer-6");
        assert_eq!(recent[4].customer, "customer-2");
        assert_eq!(recent[0].total, "$12.50");
        assert_eq!(recent[0].items, "1x Margherita");
    }
}
