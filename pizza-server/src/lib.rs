//! Pizza Shop API Server
//!
//! Storefront + admin backend for a pizza delivery shop:
//!
//! - **Catalog** (`api::pizzas`): menu CRUD, read-only to the storefront
//! - **Delivery areas** (`api::areas`): zones with fee / ETA / coverage
//! - **Checkout & orders** (`api::orders`): server-side pricing, immutable
//!   order snapshots, admin status updates
//! - **Users** (`api::users`): registration, profile edits, login
//! - **Stats** (`api::stats`): request-time aggregates for the admin dashboard
//!
//! # Module structure
//!
//! ```text
//! pizza-server/src/
//! ├── core/          # 配置、状态、服务器启动
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 嵌入式 SurrealDB 存储
//! ├── cart/          # 购物车 (ephemeral value object)
//! ├── money/         # 价格计算 (rust_decimal)
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod api;
pub mod cart;
pub mod core;
pub mod db;
pub mod money;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

pub fn print_banner() {
    println!(
        r#"
    ____  _
   / __ \(_)___  ____  ____ _
  / /_/ / /_  / /_  / / __ `/
 / ____/ / / /_  / /_/ /_/ /
/_/   /_/ /___/ /___/\__,_/
   _____ __
  / ___// /_  ____  ____
  \__ \/ __ \/ __ \/ __ \
 ___/ / / / / /_/ / /_/ /
/____/_/ /_/\____/ .___/
                /_/
    "#
    );
}
