//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog
pub mod pizza;

// Delivery
pub mod area;

// Customers and staff
pub mod user;

// Orders
pub mod order;

// Re-exports
pub use area::{Area, AreaCreate, AreaUpdate};
pub use order::{Order, OrderCreate, OrderItem, OrderLineInput, OrderStatus, OrderUpdate};
pub use pizza::{Pizza, PizzaCreate, PizzaUpdate};
pub use user::{LoginRequest, User, UserCreate, UserResponse, UserRole, UserStatus, UserUpdate};
