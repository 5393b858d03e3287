pub mod config;
pub mod error;
pub mod db;
pub mod flash;
pub mod views;
pub mod api;

pub use config::Config;
pub use error::{ AppError, Result };

use axum::{ Router, routing::{ get, post } };
use sea_orm::DatabaseConnection;

/// HTML pages at the root: list and form views, flash notices, 302
/// redirects after every write.
fn pages_router() -> Router<api::AppState> {
    Router::new()
        .route("/users", get(api::users::list_users).post(api::users::create_user))
        .route("/users/new", get(api::users::show_create_form))
        .route("/users/{id}/edit", get(api::users::show_edit_form))
        .route("/users/{id}", post(api::users::update_user))
        .route("/users/{id}/delete", get(api::users::delete_user))
        .route("/addresses", get(api::addresses::list_addresses).post(api::addresses::create_address))
        .route("/addresses/new", get(api::addresses::show_create_form))
        .route("/addresses/{id}/edit", get(api::addresses::show_edit_form))
        .route("/addresses/{id}", post(api::addresses::update_address))
        .route("/addresses/{id}/delete", get(api::addresses::delete_address))
}

/// The same resource routes for JSON clients. The form views stay
/// reachable here too, as they were when the page controllers were
/// mounted wholesale under the prefix.
fn api_router() -> Router<api::AppState> {
    Router::new()
        .route("/users", get(api::users::list_users_api).post(api::users::create_user_api))
        .route("/users/new", get(api::users::show_create_form))
        .route("/users/{id}/edit", get(api::users::show_edit_form))
        .route("/users/{id}", post(api::users::update_user_api))
        .route("/users/{id}/delete", get(api::users::delete_user_api))
        .route(
            "/addresses",
            get(api::addresses::list_addresses_api).post(api::addresses::create_address_api)
        )
        .route("/addresses/new", get(api::addresses::show_create_form))
        .route("/addresses/{id}/edit", get(api::addresses::show_edit_form))
        .route("/addresses/{id}", post(api::addresses::update_address_api))
        .route("/addresses/{id}/delete", get(api::addresses::delete_address_api))
}

/// Build the full application router over an established database
/// connection. Schema synchronization is the caller's job and must happen
/// before the router starts serving.
pub fn app(db: DatabaseConnection) -> Result<Router> {
    let state = api::AppState::new(db)?;

    Ok(
        Router::new()
            .route("/", get(api::home::index))
            .route("/health", get(api::home::health_check))
            .merge(pages_router())
            .nest("/api", api_router())
            .with_state(state)
    )
}
