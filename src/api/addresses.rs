use axum::extract::{ Form, Path, State };
use axum::http::{ HeaderMap, StatusCode };
use axum::response::{ Html, IntoResponse, Response };
use axum::Json;
use minijinja::context;

use crate::db::AddressInput;
use crate::error::Result;
use crate::flash::Session;

use super::{ found, AppState };

// Page mount.

pub async fn list_addresses(
    State(state): State<AppState>,
    headers: HeaderMap
) -> Result<Response> {
    let session = Session::extract(&headers);
    let addresses = state.addresses.find_all().await?;
    let notice = state.flash.take(session.id);

    let html = state.views.render("addresses_list", context! { addresses, notice })?;
    let mut response = Html(html).into_response();
    session.apply(&mut response);
    Ok(response)
}

pub async fn show_create_form(
    State(state): State<AppState>,
    headers: HeaderMap
) -> Result<Response> {
    let session = Session::extract(&headers);
    let html = state.views.render("addresses_form", context! { address => context! {} })?;
    let mut response = Html(html).into_response();
    session.apply(&mut response);
    Ok(response)
}

pub async fn create_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(input): Form<AddressInput>
) -> Result<Response> {
    let session = Session::extract(&headers);
    state.addresses.create(input).await?;
    state.flash.set(session.id, "Address created successfully!");

    let mut response = found("/addresses");
    session.apply(&mut response);
    Ok(response)
}

pub async fn show_edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>
) -> Result<Response> {
    let session = Session::extract(&headers);
    let Some(address) = state.addresses.find_by_id(id).await? else {
        let mut response = found("/addresses");
        session.apply(&mut response);
        return Ok(response);
    };

    let html = state.views.render("addresses_form", context! { address })?;
    let mut response = Html(html).into_response();
    session.apply(&mut response);
    Ok(response)
}

pub async fn update_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Form(input): Form<AddressInput>
) -> Result<Response> {
    let session = Session::extract(&headers);
    if state.addresses.update(id, input).await?.is_some() {
        state.flash.set(session.id, "Address updated successfully!");
    }

    let mut response = found("/addresses");
    session.apply(&mut response);
    Ok(response)
}

pub async fn delete_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>
) -> Result<Response> {
    let session = Session::extract(&headers);
    if state.addresses.delete(id).await? {
        state.flash.set(session.id, "Address deleted successfully!");
    }

    let mut response = found("/addresses");
    session.apply(&mut response);
    Ok(response)
}

// API mount.

pub async fn list_addresses_api(State(state): State<AppState>) -> Result<Response> {
    let addresses = state.addresses.find_all().await?;
    Ok(Json(addresses).into_response())
}

pub async fn create_address_api(
    State(state): State<AppState>,
    Json(input): Json<AddressInput>
) -> Result<Response> {
    let address = state.addresses.create(input).await?;
    Ok((StatusCode::CREATED, Json(address)).into_response())
}

pub async fn update_address_api(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<AddressInput>
) -> Result<Response> {
    match state.addresses.update(id, input).await? {
        Some(address) => Ok(Json(address).into_response()),
        None => Ok(found("/addresses")),
    }
}

pub async fn delete_address_api(
    State(state): State<AppState>,
    Path(id): Path<i32>
) -> Result<Response> {
    state.addresses.delete(id).await?;
    Ok(found("/addresses"))
}
