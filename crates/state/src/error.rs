use assetchain_core::error::CoreError;

use crate::world_state::StoreError;

/// Error returned by the registry operations.
///
/// Domain rule violations come through [`CoreError`]; everything else is a
/// world-state or codec failure surfaced unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("world state error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to decode asset: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode asset: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
