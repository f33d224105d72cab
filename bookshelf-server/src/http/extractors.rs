//! Custom Axum extractors
//!
//! Both reject with `ApiError::Validation`, so malformed input gets the
//! same 400 fail envelope as every other client error.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract an integer id from the path
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ValidationError::InvalidId {
                value: String::new(),
            })?;

        let id = raw
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidId { value: raw })?;

        Ok(Self(id))
    }
}

/// `Json<T>` whose rejection is a fail envelope instead of plain text
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::MalformedBody {
                reason: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}
