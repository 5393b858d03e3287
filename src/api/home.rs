use axum::response::Response;

use super::found;

pub async fn index() -> Response {
    found("/users")
}

pub async fn health_check() -> &'static str {
    "OK"
}
