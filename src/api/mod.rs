use std::sync::Arc;

pub mod home;
pub mod users;
pub mod addresses;

use axum::http::{ header, StatusCode };
use axum::response::{ IntoResponse, Response };
use sea_orm::DatabaseConnection;

use crate::db::{ AddressRepository, UserRepository };
use crate::error::Result;
use crate::flash::FlashStore;
use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserRepository>,
    pub addresses: Arc<AddressRepository>,
    pub flash: Arc<FlashStore>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Result<Self> {
        // The connection is shared, not cloned: under the mock backend the
        // connection enum is not `Clone`.
        let db = Arc::new(db);
        Ok(Self {
            users: Arc::new(UserRepository::new(db.clone())),
            addresses: Arc::new(AddressRepository::new(db)),
            flash: Arc::new(FlashStore::new()),
            views: Arc::new(Views::new()?),
        })
    }
}

/// A `302 Found` redirect. `axum::response::Redirect` emits 303/307; the
/// page flow uses plain 302.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
