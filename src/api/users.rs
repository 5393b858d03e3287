use axum::extract::{ Form, Path, State };
use axum::http::{ HeaderMap, StatusCode };
use axum::response::{ Html, IntoResponse, Response };
use axum::Json;
use minijinja::context;

use crate::db::UserInput;
use crate::error::Result;
use crate::flash::Session;

use super::{ found, AppState };

// Page mount: HTML views, flash notices, 302 redirects after writes.

pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap
) -> Result<Response> {
    let session = Session::extract(&headers);
    let users = state.users.find_all().await?;
    let notice = state.flash.take(session.id);

    let html = state.views.render("users_list", context! { users, notice })?;
    let mut response = Html(html).into_response();
    session.apply(&mut response);
    Ok(response)
}

pub async fn show_create_form(
    State(state): State<AppState>,
    headers: HeaderMap
) -> Result<Response> {
    let session = Session::extract(&headers);
    let html = state.views.render("users_form", context! { user => context! {} })?;
    let mut response = Html(html).into_response();
    session.apply(&mut response);
    Ok(response)
}

pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(input): Form<UserInput>
) -> Result<Response> {
    let session = Session::extract(&headers);
    state.users.create(input).await?;
    state.flash.set(session.id, "User created successfully!");

    let mut response = found("/users");
    session.apply(&mut response);
    Ok(response)
}

pub async fn show_edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>
) -> Result<Response> {
    let session = Session::extract(&headers);
    let Some(user) = state.users.find_by_id(id).await? else {
        let mut response = found("/users");
        session.apply(&mut response);
        return Ok(response);
    };

    let html = state.views.render("users_form", context! { user })?;
    let mut response = Html(html).into_response();
    session.apply(&mut response);
    Ok(response)
}

pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Form(input): Form<UserInput>
) -> Result<Response> {
    let session = Session::extract(&headers);
    // A missing record is a benign no-op: redirect without a notice.
    if state.users.update(id, input).await?.is_some() {
        state.flash.set(session.id, "User updated successfully!");
    }

    let mut response = found("/users");
    session.apply(&mut response);
    Ok(response)
}

pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>
) -> Result<Response> {
    let session = Session::extract(&headers);
    if state.users.delete(id).await? {
        state.flash.set(session.id, "User deleted successfully!");
    }

    let mut response = found("/users");
    session.apply(&mut response);
    Ok(response)
}

// API mount: same operations, JSON in and out.

pub async fn list_users_api(State(state): State<AppState>) -> Result<Response> {
    let users = state.users.find_all().await?;
    Ok(Json(users).into_response())
}

pub async fn create_user_api(
    State(state): State<AppState>,
    Json(input): Json<UserInput>
) -> Result<Response> {
    let user = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

pub async fn update_user_api(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UserInput>
) -> Result<Response> {
    match state.users.update(id, input).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(found("/users")),
    }
}

pub async fn delete_user_api(
    State(state): State<AppState>,
    Path(id): Path<i32>
) -> Result<Response> {
    state.users.delete(id).await?;
    Ok(found("/users"))
}
