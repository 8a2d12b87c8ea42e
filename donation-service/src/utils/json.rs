use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// JSON body extractor whose rejections render as `AppError::BadRequest`.
///
/// Malformed JSON, wrong types, unknown fields and a missing
/// `application/json` content type all become 400s with a JSON error body.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e.body_text(), "Rejected request body");
            AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e.body_text()))
        })?;

        Ok(JsonBody(value))
    }
}
