//! World-state access and the asset registry operations.
//!
//! - [`world_state`] defines the key-value contract the registry consumes and
//!   ships an in-memory, versioned implementation with transactions.
//! - [`repositories::AssetRepo`] implements the registry operations on top of
//!   any [`WorldState`](world_state::WorldState).
//! - [`contract`] dispatches invocations by function name, the way a ledger
//!   host calls into the registry.

use std::sync::Arc;

pub mod contract;
pub mod error;
pub mod models;
pub mod repositories;
pub mod world_state;

pub use error::{RegistryError, RegistryResult};

use world_state::MemoryWorldState;

/// Shared handle to the committed world state.
pub type SharedWorldState = Arc<MemoryWorldState>;

/// Create an empty in-memory world state.
pub fn create_world_state() -> SharedWorldState {
    Arc::new(MemoryWorldState::new())
}
