//! JSON body extraction with field validation.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// Like `Json<T>`, but runs the `validator` derive rules before the
/// handler sees the value. Malformed bodies come back as 400 with the
/// rejection text; rule violations come back as 400 with per-field
/// details in the error envelope.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_query(rejection.body_text()))?;

        value.validate()?;
        Ok(Self(value))
    }
}
