//! Route definitions for the asset registry.
//!
//! All routes are mounted under `/assets`.

use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset registry routes mounted at `/assets`.
///
/// ```text
/// GET    /             -> list_assets
/// POST   /             -> create_asset
/// PUT    /             -> update_asset (id derived from the body)
/// GET    /{id}         -> get_asset
/// DELETE /{id}         -> delete_asset
/// GET    /{id}/exists  -> asset_exists
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(assets::list_assets)
                .post(assets::create_asset)
                .put(assets::update_asset),
        )
        .route("/{id}", get(assets::get_asset).delete(assets::delete_asset))
        .route("/{id}/exists", get(assets::asset_exists))
}
