//! Request-body extractor that reports problems as `AppError` (400) instead
//! of Axum's default 415/422 rejections.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// A JSON object request body.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(map))) => Ok(JsonObject(map)),
            Ok(Json(_)) => Err(AppError::Validation(
                "Request body must be a JSON object".to_string(),
            )),
            Err(JsonRejection::MissingJsonContentType(_)) => Err(AppError::UnsupportedMediaType),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

impl JsonObject {
    /// Checks that every name in `required` is present, then deserializes.
    /// Presence is checked first so a missing field is reported by name.
    pub fn into_request<T: DeserializeOwned>(
        self,
        required: &[&'static str],
    ) -> Result<T, AppError> {
        if let Some(missing) = required.iter().find(|f| !self.0.contains_key(**f)) {
            return Err(AppError::MissingField(*missing));
        }
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
    }
}
