pub mod assets;
pub mod contract;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /invoke                 submit a contract call (POST)
/// /query                  evaluate a read-only contract call (POST)
/// /ledger/init            write the seed catalogue (POST)
///
/// /assets                 list, create, update
/// /assets/{id}            read, delete
/// /assets/{id}/exists     existence check
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(contract::router())
        .nest("/assets", assets::router())
}
