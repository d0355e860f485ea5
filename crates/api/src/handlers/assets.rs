//! Handlers for the asset registry.
//!
//! Each handler runs inside one world-state transaction: it is committed when
//! the operation succeeds and discarded otherwise.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use assetchain_state::models::asset::AssetInput;
use assetchain_state::repositories::AssetRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assets
///
/// List every asset in key order.
pub async fn list_assets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let assets = AssetRepo::list_all(&*state.world_state).await?;

    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/v1/assets
///
/// Create an asset. The id is derived from `Owner` and `Code`.
pub async fn create_asset(
    State(state): State<AppState>,
    Json(input): Json<AssetInput>,
) -> AppResult<impl IntoResponse> {
    let tx = state.world_state.begin();
    let asset = AssetRepo::create(&tx, &input).await?;
    tx.commit().await?;

    tracing::info!(asset_id = %asset.id, "Asset created via API");

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// PUT /api/v1/assets
///
/// Overwrite every field of an existing asset.
pub async fn update_asset(
    State(state): State<AppState>,
    Json(input): Json<AssetInput>,
) -> AppResult<impl IntoResponse> {
    let tx = state.world_state.begin();
    let asset = AssetRepo::update(&tx, &input).await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: asset }))
}

/// GET /api/v1/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::read(&*state.world_state, &id).await?;

    Ok(Json(DataResponse { data: asset }))
}

/// DELETE /api/v1/assets/{id}
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tx = state.world_state.begin();
    AssetRepo::delete(&tx, &id).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/assets/{id}/exists
pub async fn asset_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let exists = AssetRepo::exists(&*state.world_state, &id).await?;

    Ok(Json(DataResponse { data: exists }))
}
