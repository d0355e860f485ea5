use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use assetchain_core::error::CoreError;
use assetchain_state::contract::ContractError;
use assetchain_state::world_state::StoreError;
use assetchain_state::RegistryError;

/// Application-level error type for HTTP handlers.
///
/// Flattens registry and contract errors into domain, store and request
/// failures, and implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `assetchain_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A world-state failure (including commit conflicts).
    #[error("World state error: {0}")]
    Store(#[from] StoreError),

    /// A stored record could not be decoded or a record could not be encoded.
    #[error("Codec error: {0}")]
    Codec(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Core(core) => Self::Core(core),
            RegistryError::Store(store) => Self::Store(store),
            RegistryError::Decode(_) | RegistryError::Encode(_) => Self::Codec(err.to_string()),
        }
    }
}

impl From<ContractError> for AppError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::Registry(registry) => registry.into(),
            ContractError::UnknownFunction(_)
            | ContractError::ArgumentCount { .. }
            | ContractError::InvalidArgument { .. } => Self::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string()),
                CoreError::AlreadyExists(_) => {
                    (StatusCode::CONFLICT, "ALREADY_EXISTS", core.to_string())
                }
                CoreError::InvalidState { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_STATE",
                    core.to_string(),
                ),
            },

            // --- World state errors ---
            AppError::Store(store) => classify_store_error(store),

            AppError::Codec(msg) => {
                tracing::error!(error = %msg, "Asset codec error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a world-state error into an HTTP status, error code, and message.
///
/// - `Conflict` maps to 409 so the client can resubmit.
/// - `InvalidKey` maps to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        StoreError::InvalidKey(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string()),
        StoreError::Unavailable(_) | StoreError::Closed => {
            tracing::error!(error = %err, "World state error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
