use std::sync::Arc;

use sea_orm::{ entity::prelude::*, DatabaseConnection, Set };
use serde::{ Deserialize, Deserializer };

use crate::error::{ AppError, Result };

pub mod entity;
pub use entity::*;

mod address_repository;
pub use address_repository::{ AddressRepository, AddressInput };

/// Caller-supplied user fields. The surrogate key is never part of the
/// input; every field is optional so the same shape serves full creates
/// and partial updates. The doubled `Option` keeps "field absent" (outer
/// `None`, stored value kept on update) distinct from an explicit JSON
/// `null` (inner `None`, rejected for required columns).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInput {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
}

pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<entity::user::Model>> {
        let users = entity::user::Entity::find().all(self.db.as_ref()).await?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(user)
    }

    /// Insert a new user. Required fields are checked up front so a bad
    /// write never reaches the database.
    pub async fn create(&self, input: UserInput) -> Result<entity::user::Model> {
        let name = require(input.name.flatten(), "name")?;
        let email = require(input.email.flatten(), "email")?;

        let now = chrono::Utc::now();
        let user = entity::user::ActiveModel {
            name: Set(name),
            email: Set(email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = user.insert(self.db.as_ref()).await?;
        Ok(user)
    }

    /// Overwrite the fields supplied in `input` on the user matching `id`.
    /// Returns `None` when no such user exists; omitted fields keep their
    /// stored values, while an explicit null on a required field fails the
    /// write.
    pub async fn update(&self, id: i32, input: UserInput) -> Result<Option<entity::user::Model>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = user.into();
        if let Some(name) = input.name {
            active.name = Set(require(name, "name")?);
        }
        if let Some(email) = input.email {
            active.email = Set(require(email, "email")?);
        }
        active.updated_at = Set(chrono::Utc::now());

        let user = active.update(self.db.as_ref()).await?;
        Ok(Some(user))
    }

    /// Delete the user matching `id`. Returns `false` when no row matched,
    /// which callers treat as a benign no-op.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = entity::user::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }
}

pub(crate) fn require(field: Option<String>, name: &str) -> Result<String> {
    field.ok_or_else(|| AppError::Validation(format!("{} cannot be null", name)))
}

/// Deserialize a field so that "absent" and "explicitly null" stay
/// distinguishable: absent stays the outer `None` via `#[serde(default)]`,
/// anything present (null included) lands in `Some`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
    where T: Deserialize<'de>, D: Deserializer<'de>
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_field() {
        let err = require(None, "email").unwrap_err();
        assert!(err.to_string().contains("email cannot be null"));
    }

    #[test]
    fn require_passes_through_present_field() {
        let value = require(Some("John".to_string()), "name").unwrap();
        assert_eq!(value, "John");
    }

    #[test]
    fn absent_and_null_fields_deserialize_apart() {
        let input: UserInput = serde_json::from_str(r#"{ "name": null }"#).unwrap();
        assert_eq!(input.name, Some(None));
        assert_eq!(input.email, None);

        let input: UserInput = serde_json::from_str(r#"{ "name": "John" }"#).unwrap();
        assert_eq!(input.name, Some(Some("John".to_string())));
    }
}
