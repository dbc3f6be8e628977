//! Order Repository
//!
//! Orders are written once at checkout; afterwards only the lifecycle
//! fields (status etc.) change. The item snapshot and totals are never
//! touched by updates.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Order, OrderUpdate};
use crate::utils::time;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders in creation order (the stats scan relies on this)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, key)).await?;
        Ok(order)
    }

    /// Persist a priced order snapshot
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Merge lifecycle fields into an existing order
    ///
    /// Status transitions are unconditional overwrites; only updated_at is
    /// stamped alongside.
    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<Order> {
        let key = record_key(ORDER_TABLE, id);

        let mut patch = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to serialize update: {e}")))?;
        if let serde_json::Value::Object(map) = &mut patch {
            map.insert("updated_at".to_string(), time::now_millis().into());
        }

        let updated: Option<Order> = self.base.db().update((ORDER_TABLE, key)).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }

    /// Hard delete an order
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(ORDER_TABLE, id);
        let deleted: Option<Order> = self.base.db().delete((ORDER_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Order not found".to_string()));
        }
        Ok(())
    }
}
