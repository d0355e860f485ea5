//! Handlers for by-name contract invocation.
//!
//! `invoke` submits: the call runs in a transaction that is committed only
//! if the call succeeds, so a failing `InitLedger` leaves nothing behind.
//! `query` evaluates a read-only call and never commits.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use assetchain_state::contract::{Invocation, InvocationRequest};
use assetchain_state::repositories::AssetRepo;
use assetchain_state::world_state::MemoryWorldState;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Run `invocation` in a fresh transaction and commit its writes.
pub async fn submit(world_state: &MemoryWorldState, invocation: &Invocation) -> AppResult<Value> {
    let tx = world_state.begin();
    let result = invocation.execute(&tx).await?;
    let sequence = tx.commit().await?;

    tracing::debug!(function = invocation.function(), ?sequence, "Invocation committed");
    Ok(result)
}

/// Run `invocation` in a transaction that is always discarded.
pub async fn evaluate(world_state: &MemoryWorldState, invocation: &Invocation) -> AppResult<Value> {
    let tx = world_state.begin();
    let result = invocation.execute(&tx).await?;
    Ok(result)
}

/// POST /api/v1/invoke
pub async fn invoke(
    State(state): State<AppState>,
    Json(request): Json<InvocationRequest>,
) -> AppResult<impl IntoResponse> {
    let invocation = request.parse()?;
    let data = submit(&state.world_state, &invocation).await?;

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/query
///
/// Rejects calls that would write.
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<InvocationRequest>,
) -> AppResult<impl IntoResponse> {
    let invocation = request.parse()?;
    if !invocation.is_read_only() {
        return Err(AppError::BadRequest(format!(
            "function {} modifies the world state; use /invoke",
            invocation.function()
        )));
    }
    let data = evaluate(&state.world_state, &invocation).await?;

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/ledger/init
///
/// Write the seed catalogue in one transaction. Returns the number of
/// assets written.
pub async fn init_ledger(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tx = state.world_state.begin();
    let written = AssetRepo::init_ledger(&tx).await?;
    tx.commit().await?;

    tracing::info!(written, "Ledger initialized via API");

    Ok(Json(DataResponse { data: written }))
}
