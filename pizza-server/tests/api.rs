//! End-to-end API tests against an in-memory database
//!
//! Each test boots a fresh state (Mem engine), builds the real router and
//! drives it through tower's `oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tower::ServiceExt;

use pizza_server::core::{Config, ServerState};
use pizza_server::{api, db};

async fn test_app() -> Router {
    let surreal = Surreal::new::<Mem>(()).await.expect("in-memory db");
    surreal
        .use_ns("pizza")
        .use_db("shop")
        .await
        .expect("select ns/db");
    db::define_schema(&surreal).await.expect("schema");

    let state = ServerState::new(Config::with_overrides("./unused", 0), surreal);
    api::build_router().with_state(state)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn margherita() -> Value {
    json!({
        "name": "Margherita",
        "description": "Tomato, mozzarella, basil",
        "price": 10.0,
        "category": "Classic",
        "ingredients": ["tomato", "mozzarella", "basil"]
    })
}

fn downtown() -> Value {
    json!({
        "name": "Downtown",
        "delivery_time": "30-45 min",
        "postal_codes": ["10001", "10002"]
    })
}

async fn seed_pizza(app: &Router) -> String {
    let (status, body) = request(app, "POST", "/pizzas", Some(margherita())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn seed_area(app: &Router) {
    let (status, _) = request(app, "POST", "/areas", Some(downtown())).await;
    assert_eq!(status, StatusCode::CREATED);
}

fn checkout_payload(pizza_id: &str) -> Value {
    json!({
        "customer_name": "Mario Rossi",
        "customer_phone": "555-0100",
        "address": "1 Main St",
        "area": "Downtown",
        "items": [{
            "pizza_id": pizza_id,
            "size": "Large",
            "extras": ["Pepperoni"],
            "quantity": 2
        }]
    })
}

// ── Pizzas ──────────────────────────────────────────────────────────

#[tokio::test]
async fn pizza_crud_roundtrip() {
    let app = test_app().await;

    let id = seed_pizza(&app).await;

    let (status, body) = request(&app, "GET", "/pizzas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Margherita");
    assert_eq!(body[0]["is_available"], true);

    let (status, body) = request(&app, "GET", &format!("/pizzas/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"].as_f64(), Some(10.0));

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/pizzas/{id}"),
        Some(json!({ "price": 11.5, "featured": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"].as_f64(), Some(11.5));
    assert_eq!(body["featured"], true);
    // Untouched fields survive the merge
    assert_eq!(body["description"], "Tomato, mozzarella, basil");

    let (status, _) = request(&app, "DELETE", &format!("/pizzas/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&app, "GET", &format!("/pizzas/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Pizza not found");
}

#[tokio::test]
async fn deleting_missing_records_returns_not_found_without_mutation() {
    let app = test_app().await;
    seed_pizza(&app).await;

    let (status, body) = request(&app, "DELETE", "/pizzas/pizza:missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Pizza not found");

    let (status, body) = request(&app, "DELETE", "/areas/area:missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Area not found");

    let (status, body) = request(&app, "DELETE", "/orders/order:missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");

    // The catalog is untouched
    let (_, body) = request(&app, "GET", "/pizzas", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn pizza_create_rejects_bad_payloads() {
    let app = test_app().await;

    let (status, _) = request(
        &app,
        "POST",
        "/pizzas",
        Some(json!({ "name": "  ", "description": "x", "price": 1.0, "category": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(
        &app,
        "POST",
        "/pizzas",
        Some(json!({ "name": "Bad", "description": "x", "price": -2.0, "category": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("price"));
}

// ── Areas ───────────────────────────────────────────────────────────

#[tokio::test]
async fn area_defaults_and_toggle_preserve_fee_and_coverage() {
    let app = test_app().await;
    seed_area(&app).await;

    let (_, body) = request(&app, "GET", "/areas", None).await;
    let area = &body[0];
    // Fee defaults to the standard 3.99 when omitted
    assert_eq!(area["delivery_fee"].as_f64(), Some(3.99));
    assert_eq!(area["is_active"], true);
    assert_eq!(area["order_count"], 0);
    let id = area["id"].as_str().unwrap().to_string();

    // Toggling the active flag must not alter fee or postal codes
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/areas/{id}"),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);
    assert_eq!(body["delivery_fee"].as_f64(), Some(3.99));
    assert_eq!(body["postal_codes"], json!(["10001", "10002"]));
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_email_registration_fails() {
    let app = test_app().await;

    let user = json!({
        "name": "Mario",
        "email": "mario@example.com",
        "password": "secret"
    });

    let (status, body) = request(&app, "POST", "/users", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    // The password never leaves the server
    assert!(body.get("password").is_none());

    let (status, body) = request(&app, "POST", "/users", Some(user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("mario@example.com"));

    let (_, body) = request(&app, "GET", "/users", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn login_matches_plaintext_credentials() {
    let app = test_app().await;

    let (_, created) = request(
        &app,
        "POST",
        "/users",
        Some(json!({
            "name": "Mario",
            "email": "mario@example.com",
            "password": "secret"
        })),
    )
    .await;
    assert!(created["last_login"].is_null());

    let (status, body) = request(
        &app,
        "POST",
        "/users/login",
        Some(json!({ "email": "mario@example.com", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "mario@example.com");
    assert!(body.get("password").is_none());
    assert!(body["last_login"].is_i64());

    let (status, body) = request(
        &app,
        "POST",
        "/users/login",
        Some(json!({ "email": "mario@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email or password");

    // Unknown email gets the same message
    let (status, body) = request(
        &app,
        "POST",
        "/users/login",
        Some(json!({ "email": "nobody@example.com", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email or password");
}

// ── Checkout ────────────────────────────────────────────────────────

#[tokio::test]
async fn checkout_prices_the_order_server_side() {
    let app = test_app().await;
    let pizza_id = seed_pizza(&app).await;
    seed_area(&app).await;

    let (status, body) = request(&app, "POST", "/orders", Some(checkout_payload(&pizza_id))).await;
    assert_eq!(status, StatusCode::CREATED);

    // $10.00 base, Large ×1.3 + Pepperoni $3.49 → 16.49; ×2 → 32.98
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price"].as_f64(), Some(16.49));
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(body["subtotal"].as_f64(), Some(32.98));
    assert_eq!(body["tax"].as_f64(), Some(2.64));
    assert_eq!(body["delivery_fee"].as_f64(), Some(3.99));
    assert_eq!(body["total"].as_f64(), Some(39.61));
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payment_method"], "cash");
    assert_eq!(body["estimated_delivery"], "30-45 min");

    // The area's running counter moved
    let (_, areas) = request(&app, "GET", "/areas", None).await;
    assert_eq!(areas[0]["order_count"], 1);
}

#[tokio::test]
async fn checkout_merges_duplicate_cart_lines() {
    let app = test_app().await;
    let pizza_id = seed_pizza(&app).await;
    seed_area(&app).await;

    let payload = json!({
        "customer_name": "Mario Rossi",
        "customer_phone": "555-0100",
        "address": "1 Main St",
        "area": "Downtown",
        "items": [
            { "pizza_id": pizza_id, "size": "Medium", "extras": ["Olives", "Bacon"], "quantity": 1 },
            { "pizza_id": pizza_id, "size": "Medium", "extras": ["Bacon", "Olives"], "quantity": 2 }
        ]
    });

    let (status, body) = request(&app, "POST", "/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
}

#[tokio::test]
async fn checkout_rejects_inactive_area_and_unknown_labels() {
    let app = test_app().await;
    let pizza_id = seed_pizza(&app).await;
    seed_area(&app).await;

    // Unknown size
    let mut payload = checkout_payload(&pizza_id);
    payload["items"][0]["size"] = json!("Gigantic");
    let (status, body) = request(&app, "POST", "/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unknown size"));

    // Unknown area
    let mut payload = checkout_payload(&pizza_id);
    payload["area"] = json!("Nowhere");
    let (status, body) = request(&app, "POST", "/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Area not found");

    // Deactivated area
    let (_, areas) = request(&app, "GET", "/areas", None).await;
    let area_id = areas[0]["id"].as_str().unwrap().to_string();
    request(
        &app,
        "PUT",
        &format!("/areas/{area_id}"),
        Some(json!({ "is_active": false })),
    )
    .await;
    let (status, _) = request(&app, "POST", "/orders", Some(checkout_payload(&pizza_id))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn checkout_updates_customer_aggregates() {
    let app = test_app().await;
    let pizza_id = seed_pizza(&app).await;
    seed_area(&app).await;

    request(
        &app,
        "POST",
        "/users",
        Some(json!({
            "name": "Mario",
            "email": "mario@example.com",
            "password": "secret"
        })),
    )
    .await;

    let mut payload = checkout_payload(&pizza_id);
    payload["customer_email"] = json!("mario@example.com");
    let (status, _) = request(&app, "POST", "/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, users) = request(&app, "GET", "/users", None).await;
    assert_eq!(users[0]["total_orders"], 1);
    assert_eq!(users[0]["total_spent"].as_f64(), Some(39.61));
    assert!(users[0]["last_order"].is_i64());
}

// ── Order lifecycle ─────────────────────────────────────────────────

#[tokio::test]
async fn order_status_is_overwritten_and_snapshot_stays_immutable() {
    let app = test_app().await;
    let pizza_id = seed_pizza(&app).await;
    seed_area(&app).await;

    let (_, order) = request(&app, "POST", "/orders", Some(checkout_payload(&pizza_id))).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    // Catalog price change after checkout must not affect the order
    request(
        &app,
        "PUT",
        &format!("/pizzas/{pizza_id}"),
        Some(json!({ "price": 99.0 })),
    )
    .await;

    for status_label in ["preparing", "out_for_delivery", "delivered"] {
        let (status, body) = request(
            &app,
            "PUT",
            &format!("/orders/{order_id}"),
            Some(json!({ "status": status_label })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], *status_label);
        // Snapshot fields never move
        assert_eq!(body["items"][0]["price"].as_f64(), Some(16.49));
        assert_eq!(body["total"].as_f64(), Some(39.61));
    }

    let (status, body) = request(
        &app,
        "PUT",
        "/orders/order:missing",
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
}

// ── Stats ───────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_overview_aggregates_by_scan() {
    let app = test_app().await;
    let pizza_id = seed_pizza(&app).await;
    seed_area(&app).await;

    // Two customers, one inactive
    request(
        &app,
        "POST",
        "/users",
        Some(json!({ "name": "Mario", "email": "mario@example.com", "password": "x" })),
    )
    .await;
    request(
        &app,
        "POST",
        "/users",
        Some(json!({
            "name": "Luigi",
            "email": "luigi@example.com",
            "password": "x",
            "status": "inactive"
        })),
    )
    .await;

    // Two orders placed "today"
    for _ in 0..2 {
        let (status, _) =
            request(&app, "POST", "/orders", Some(checkout_payload(&pizza_id))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = request(&app, "GET", "/stats/overview", None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["ordersToday"], 2);
    assert_eq!(body["totalRevenue"].as_f64(), Some(79.22)); // 2 × 39.61
    assert_eq!(body["activeCustomers"], 1);
    assert_eq!(body["pizzaTypes"], 1);

    let recent = body["recentOrders"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["total"], "$39.61");
    assert_eq!(recent[0]["items"], "2x Margherita");

    let popular = body["popularPizzas"].as_array().unwrap();
    assert_eq!(popular[0]["name"], "Margherita");
    assert_eq!(popular[0]["orders"], 4); // 2 orders × quantity 2
}
