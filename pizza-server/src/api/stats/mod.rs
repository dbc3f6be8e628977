//! Stats API 模块

mod handler;

pub use handler::{PopularPizza, RecentOrder, StatsOverview};

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/stats/overview", get(handler::overview))
}
