//! Request body extractor that deserializes and validates a resource DTO.

use axum::extract::{FromRequest, Request};
use axum::Json;
use blog_core::dto::Resource;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that passed its `validator` rules.
///
/// Rejections are reported against `T::ENTITY_NAME`: a body that is not
/// valid JSON for `T` fails with error key `badpayload`, a body that breaks
/// a field constraint fails with `validation`.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Resource + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request_alert(rejection.body_text(), T::ENTITY_NAME, "badpayload")
            })?;

        value.validate().map_err(|errors| {
            AppError::bad_request_alert(errors.to_string(), T::ENTITY_NAME, "validation")
        })?;

        Ok(ValidJson(value))
    }
}
