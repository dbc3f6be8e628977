//! User Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id, record_key};
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::utils::time;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY join_date DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a user (registration or admin)
    ///
    /// Email uniqueness is checked here and enforced again by the
    /// `user_email` index underneath.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User with email {} already exists",
                data.email
            )));
        }

        let user = User {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone.unwrap_or_default(),
            password: data.password.unwrap_or_default(),
            role: data.role.unwrap_or_default(),
            status: data.status.unwrap_or_default(),
            permissions: data.permissions.unwrap_or_default(),
            join_date: time::now_millis(),
            last_login: None,
            total_orders: 0,
            total_spent: 0.0,
            last_order: None,
        };

        let created: Option<User> = self.base.db().create(USER_TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Merge the provided fields into an existing user
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        // Changing email must not collide with another account
        if let Some(email) = &data.email
            && let Some(existing) = self.find_by_email(email).await?
        {
            let target = record_id(USER_TABLE, id);
            if existing.id.as_ref().is_some_and(|eid| *eid != target) {
                return Err(RepoError::Duplicate(format!(
                    "User with email {email} already exists"
                )));
            }
        }

        let key = record_key(USER_TABLE, id);
        let updated: Option<User> = self.base.db().update((USER_TABLE, key)).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound("User not found".to_string()))
    }

    /// Hard delete a user
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(USER_TABLE, id);
        let deleted: Option<User> = self.base.db().delete((USER_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    /// Stamp last_login after a successful credential check
    pub async fn touch_login(&self, id: &str, now: i64) -> RepoResult<User> {
        let key = record_key(USER_TABLE, id);
        let updated: Option<User> = self
            .base
            .db()
            .update((USER_TABLE, key))
            .merge(serde_json::json!({ "last_login": now }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound("User not found".to_string()))
    }

    /// Bump customer aggregates after checkout (total_orders / total_spent / last_order)
    pub async fn record_order_stats(&self, email: &str, amount: f64, now: i64) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE user SET total_orders += 1, total_spent += $amount, last_order = $now \
                 WHERE email = $email",
            )
            .bind(("amount", amount))
            .bind(("now", now))
            .bind(("email", email.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
