//! Area Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Area, AreaCreate, AreaUpdate};
use crate::money::STANDARD_DELIVERY_FEE;

const AREA_TABLE: &str = "area";

#[derive(Clone)]
pub struct AreaRepository {
    base: BaseRepository,
}

impl AreaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all delivery areas
    pub async fn find_all(&self) -> RepoResult<Vec<Area>> {
        let areas: Vec<Area> = self
            .base
            .db()
            .query("SELECT * FROM area ORDER BY name")
            .await?
            .take(0)?;
        Ok(areas)
    }

    /// Checkout looks areas up by name (the storefront sends the area name)
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Area>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM area WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let areas: Vec<Area> = result.take(0)?;
        Ok(areas.into_iter().next())
    }

    /// Create a new area; the fee defaults to the standard 3.99
    pub async fn create(&self, data: AreaCreate) -> RepoResult<Area> {
        let delivery_fee = data.delivery_fee.unwrap_or(STANDARD_DELIVERY_FEE);
        validate_fee(delivery_fee)?;

        let area = Area {
            id: None,
            name: data.name,
            delivery_fee,
            delivery_time: data.delivery_time,
            is_active: data.is_active.unwrap_or(true),
            postal_codes: data.postal_codes.unwrap_or_default(),
            order_count: 0,
        };

        let created: Option<Area> = self.base.db().create(AREA_TABLE).content(area).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create area".to_string()))
    }

    /// Merge the provided fields into an existing area
    ///
    /// Toggling `is_active` alone leaves fee and postal codes untouched.
    pub async fn update(&self, id: &str, data: AreaUpdate) -> RepoResult<Area> {
        if let Some(fee) = data.delivery_fee {
            validate_fee(fee)?;
        }

        let key = record_key(AREA_TABLE, id);
        let updated: Option<Area> = self.base.db().update((AREA_TABLE, key)).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound("Area not found".to_string()))
    }

    /// Hard delete an area
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(AREA_TABLE, id);
        let deleted: Option<Area> = self.base.db().delete((AREA_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Area not found".to_string()));
        }
        Ok(())
    }

    /// Bump the area's running order counter (called at checkout)
    pub async fn record_order(&self, name: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE area SET order_count += 1 WHERE name = $name")
            .bind(("name", name.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}

fn validate_fee(fee: f64) -> RepoResult<()> {
    if !fee.is_finite() || fee < 0.0 {
        return Err(RepoError::Validation(
            "delivery_fee must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
