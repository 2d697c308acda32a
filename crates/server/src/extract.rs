//! Extractors that report malformed requests with the failure envelope
//! instead of axum's plain-text rejections.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::ServerError;

/// JSON request body.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string.
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// The `{id}` segment of a resource path.
pub struct Id(pub i32);

impl<S> FromRequestParts<S> for Id
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
        Ok(Self(id))
    }
}
