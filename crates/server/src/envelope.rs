//! Success responses. Failures are rendered by [`ServerError`](crate::ServerError).

use api_types::envelope::{Page, Success};
use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Message of reads and listings.
pub(crate) const OPERATION_SUCCESSFUL: &str = "Operation successful";

pub(crate) type Reply<T> = (StatusCode, Json<Success<T>>);

pub(crate) fn ok<T: Serialize>(data: T) -> Reply<T> {
    with_message(StatusCode::OK, OPERATION_SUCCESSFUL, data)
}

pub(crate) fn created<T: Serialize>(message: &str, data: T) -> Reply<T> {
    with_message(StatusCode::CREATED, message, data)
}

pub(crate) fn updated<T: Serialize>(message: &str, data: T) -> Reply<T> {
    with_message(StatusCode::OK, message, data)
}

pub(crate) fn page<T, U: Serialize>(
    page: engine::Page<T>,
    view: impl FnMut(T) -> U,
) -> Reply<Page<U>> {
    let page = page.map(view);
    ok(Page {
        data: page.items,
        current_page: page.page,
        per_page: page.per_page,
        total: page.total,
        last_page: page.last_page,
    })
}

fn with_message<T: Serialize>(status: StatusCode, message: &str, data: T) -> Reply<T> {
    (status, Json(Success::new(message, data)))
}
