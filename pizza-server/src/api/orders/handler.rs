//! Order API Handlers
//!
//! Checkout is the one write path with real logic: the submitted cart lines
//! are merged, priced from the live catalog, validated against the delivery
//! area, and persisted as an immutable snapshot.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::cart::{Cart, CartLine};
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderItem, OrderStatus, OrderUpdate};
use crate::db::repository::{AreaRepository, OrderRepository, PizzaRepository, UserRepository};
use crate::money;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, time};

/// GET /orders - 获取所有订单 (管理面板)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;
    Ok(Json(orders))
}

/// GET /orders/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    Ok(Json(order))
}

/// POST /orders - 下单 (checkout)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    validate_required_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.area, "area", MAX_NAME_LEN)?;
    validate_optional_text(&payload.customer_email, "customer_email", MAX_EMAIL_LEN)?;
    validate_optional_text(
        &payload.special_instructions,
        "special_instructions",
        MAX_NOTE_LEN,
    )?;
    if payload.items.is_empty() {
        return Err(AppError::validation("order must contain at least one item"));
    }

    // Serviceability: the area must exist and be active
    let area_repo = AreaRepository::new(state.db.clone());
    let area = area_repo
        .find_by_name(&payload.area)
        .await?
        .ok_or_else(|| AppError::not_found("Area"))?;
    if !area.is_active {
        return Err(AppError::validation(format!(
            "We don't deliver to {} yet",
            area.name
        )));
    }

    // Merge duplicate slots, then price every line from the live catalog.
    // Client-supplied prices are never trusted.
    let pizza_repo = PizzaRepository::new(state.db.clone());
    let mut cart = Cart::new();
    for line in &payload.items {
        money::validate_quantity(line.quantity)?;

        let pizza = pizza_repo
            .find_by_id(&line.pizza_id)
            .await?
            .ok_or_else(|| AppError::not_found("Pizza"))?;
        if !pizza.is_available {
            return Err(AppError::validation(format!(
                "{} is currently not available",
                pizza.name
            )));
        }

        let unit = money::unit_price(pizza.price, &line.size, &line.extras)?;
        cart.add_line(CartLine {
            pizza_id: line.pizza_id.clone(),
            name: pizza.name,
            image: pizza.image,
            size: line.size.clone(),
            extras: line.extras.clone(),
            quantity: line.quantity,
            unit_price: money::to_f64(unit),
        });
    }

    // The area's fee is the source of truth for the delivery charge
    let totals = money::order_totals(cart.subtotal(), area.delivery_fee);
    let now = time::now_millis();

    let order = Order {
        id: None,
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        customer_email: payload.customer_email.clone(),
        address: payload.address,
        area: area.name.clone(),
        items: cart
            .lines()
            .iter()
            .map(|l| OrderItem {
                name: l.name.clone(),
                size: l.size.clone(),
                extras: l.extras.clone(),
                quantity: l.quantity,
                price: l.unit_price,
                image: l.image.clone(),
            })
            .collect(),
        subtotal: totals.subtotal,
        delivery_fee: totals.delivery_fee,
        tax: totals.tax,
        total: totals.total,
        status: OrderStatus::Pending,
        payment_method: payload.payment_method.unwrap_or_else(|| "cash".to_string()),
        special_instructions: payload.special_instructions,
        estimated_delivery: Some(area.delivery_time.clone()),
        created_at: now,
        updated_at: now,
    };

    let order_repo = OrderRepository::new(state.db.clone());
    let order = order_repo.create(order).await?;

    // Bookkeeping: area counter + customer aggregates
    area_repo.record_order(&area.name).await?;
    if let Some(email) = &payload.customer_email
        && !email.is_empty()
    {
        let user_repo = UserRepository::new(state.db.clone());
        user_repo
            .record_order_stats(email, totals.total, now)
            .await?;
    }

    tracing::info!(
        order_id = %order.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        total = order.total,
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /orders/{id} - 更新订单 (管理员改状态等)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    validate_optional_text(
        &payload.special_instructions,
        "special_instructions",
        MAX_NOTE_LEN,
    )?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update(&id, payload).await?;
    Ok(Json(order))
}

/// DELETE /orders/{id} - 删除订单
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrderRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(true))
}
