//! Route definitions for by-name contract invocation.

use axum::routing::post;
use axum::Router;

use crate::handlers::contract;
use crate::state::AppState;

/// Contract routes mounted at the `/api/v1` root.
///
/// ```text
/// POST /invoke       -> invoke
/// POST /query        -> query
/// POST /ledger/init  -> init_ledger
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invoke", post(contract::invoke))
        .route("/query", post(contract::query))
        .route("/ledger/init", post(contract::init_ledger))
}
