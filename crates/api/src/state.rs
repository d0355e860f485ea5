use assetchain_state::SharedWorldState;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Committed world state. Handlers open one transaction per request.
    pub world_state: SharedWorldState,
}
