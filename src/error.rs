use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("notNull Violation: {0}")] Validation(String),

    #[error("Template error: {0}")] Template(#[from] minijinja::Error),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

// Persistence failures surface as a 500 carrying the raw error text, with
// no structured code wrapper. Missing records never reach this impl: the
// handlers turn them into redirects before an error exists.
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
