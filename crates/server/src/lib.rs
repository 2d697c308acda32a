use api_types::envelope::{FieldError, Failure};
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{app, run_with_listener};

mod categories;
mod envelope;
mod extract;
mod groups;
mod parties;
mod server;
mod transactions;
mod user;
mod wallets;

pub enum ServerError {
    Engine(EngineError),
    /// The request could not be read: malformed JSON, query string or path.
    BadRequest(String),
    Unauthenticated,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidType(_) | EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        // Duplicate usernames; no HTTP route creates users today.
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure_for_engine_error(err: EngineError) -> Failure {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            Failure::new("Internal server error", Vec::new())
        }
        EngineError::Validation(errors) => {
            let errors = errors
                .into_iter()
                .map(|e| FieldError {
                    field: e.field,
                    message: e.message,
                })
                .collect();
            Failure::new("Validation error", errors)
        }
        other => Failure::new(other.to_string(), Vec::new()),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, failure) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), failure_for_engine_error(err)),
            ServerError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Failure::new(message, Vec::new()))
            }
            ServerError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Failure::new("Unauthenticated", Vec::new()),
            ),
        };

        (status, Json(failure)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
