//! Pizza Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Pizza, PizzaCreate, PizzaUpdate};

const PIZZA_TABLE: &str = "pizza";

#[derive(Clone)]
pub struct PizzaRepository {
    base: BaseRepository,
}

impl PizzaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all pizzas (menu listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Pizza>> {
        let pizzas: Vec<Pizza> = self
            .base
            .db()
            .query("SELECT * FROM pizza ORDER BY name")
            .await?
            .take(0)?;
        Ok(pizzas)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Pizza>> {
        let key = record_key(PIZZA_TABLE, id);
        let pizza: Option<Pizza> = self.base.db().select((PIZZA_TABLE, key)).await?;
        Ok(pizza)
    }

    /// Create a new pizza
    pub async fn create(&self, data: PizzaCreate) -> RepoResult<Pizza> {
        validate_price_fields(data.price, data.rating)?;

        let pizza = Pizza {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            image: data.image.unwrap_or_default(),
            category: data.category,
            is_veg: data.is_veg.unwrap_or(false),
            is_spicy: data.is_spicy.unwrap_or(false),
            is_available: data.is_available.unwrap_or(true),
            featured: data.featured.unwrap_or(false),
            rating: data.rating.unwrap_or(0.0),
            ingredients: data.ingredients.unwrap_or_default(),
        };

        let created: Option<Pizza> = self.base.db().create(PIZZA_TABLE).content(pizza).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create pizza".to_string()))
    }

    /// Merge the provided fields into an existing pizza
    pub async fn update(&self, id: &str, data: PizzaUpdate) -> RepoResult<Pizza> {
        validate_price_fields(data.price.unwrap_or(0.0), data.rating)?;

        let key = record_key(PIZZA_TABLE, id);
        let updated: Option<Pizza> = self.base.db().update((PIZZA_TABLE, key)).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound("Pizza not found".to_string()))
    }

    /// Hard delete a pizza
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(PIZZA_TABLE, id);
        let deleted: Option<Pizza> = self.base.db().delete((PIZZA_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Pizza not found".to_string()));
        }
        Ok(())
    }
}

fn validate_price_fields(price: f64, rating: Option<f64>) -> RepoResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(RepoError::Validation(
            "price must be a non-negative number".to_string(),
        ));
    }
    if let Some(r) = rating
        && !(0.0..=5.0).contains(&r)
    {
        return Err(RepoError::Validation(
            "rating must be between 0 and 5".to_string(),
        ));
    }
    Ok(())
}
