use std::sync::Arc;

use sea_orm::{ entity::prelude::*, DatabaseConnection, Set };
use serde::Deserialize;

use crate::db::entity;
use crate::db::{ double_option, require };
use crate::error::Result;

/// Caller-supplied address fields. `building_name` is genuinely optional
/// in the schema; the rest are required at create time. As with
/// `UserInput`, the doubled `Option` separates "absent" from an explicit
/// null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressInput {
    #[serde(default, deserialize_with = "double_option")]
    pub building_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub street: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub pincode: Option<Option<String>>,
}

pub struct AddressRepository {
    db: Arc<DatabaseConnection>,
}

impl AddressRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<entity::address::Model>> {
        let addresses = entity::address::Entity::find().all(self.db.as_ref()).await?;
        Ok(addresses)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::address::Model>> {
        let address = entity::address::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(address)
    }

    pub async fn create(&self, input: AddressInput) -> Result<entity::address::Model> {
        let street = require(input.street.flatten(), "street")?;
        let city = require(input.city.flatten(), "city")?;
        let state = require(input.state.flatten(), "state")?;
        let pincode = require(input.pincode.flatten(), "pincode")?;

        let now = chrono::Utc::now();
        let address = entity::address::ActiveModel {
            building_name: Set(input.building_name.flatten()),
            street: Set(street),
            city: Set(city),
            state: Set(state),
            pincode: Set(pincode),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let address = address.insert(self.db.as_ref()).await?;
        Ok(address)
    }

    pub async fn update(
        &self,
        id: i32,
        input: AddressInput
    ) -> Result<Option<entity::address::Model>> {
        let Some(address) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::address::ActiveModel = address.into();
        // An explicit null clears the one nullable column.
        if let Some(building_name) = input.building_name {
            active.building_name = Set(building_name);
        }
        if let Some(street) = input.street {
            active.street = Set(require(street, "street")?);
        }
        if let Some(city) = input.city {
            active.city = Set(require(city, "city")?);
        }
        if let Some(state) = input.state {
            active.state = Set(require(state, "state")?);
        }
        if let Some(pincode) = input.pincode {
            active.pincode = Set(require(pincode, "pincode")?);
        }
        active.updated_at = Set(chrono::Utc::now());

        let address = active.update(self.db.as_ref()).await?;
        Ok(Some(address))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = entity::address::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }
}
