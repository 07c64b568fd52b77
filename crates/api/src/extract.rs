//! Request body extraction for room create/update endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use roomdesk_core::error::CoreError;
use roomdesk_core::room::{FieldChecks, ROOM_FIELD_KINDS};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// JSON body whose field types are checked before deserializing into `T`.
///
/// Unparseable bodies and a missing `Content-Type` are 400s. A well-formed
/// object whose fields have the wrong JSON type is rejected as a field
/// validation error, listing every mistyped field.
#[derive(Debug)]
pub struct RoomBody<T>(pub T);

impl<S, T> FromRequest<S> for RoomBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(bad_request)?;

        let Value::Object(fields) = &value else {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let mut checks = FieldChecks::new();
        checks.json_kinds(fields, ROOM_FIELD_KINDS);
        checks.finish()?;

        serde_json::from_value(value)
            .map(RoomBody)
            .map_err(|e| CoreError::Validation(e.to_string()).into())
    }
}

fn bad_request(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected request body");
    AppError::BadRequest(rejection.body_text())
}
