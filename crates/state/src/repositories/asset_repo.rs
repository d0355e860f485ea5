//! Repository for asset records.
//!
//! Every operation derives or receives the asset id, consults the world state
//! once or twice, and issues at most one mutation. Errors are never retried
//! or swallowed.

use assetchain_core::assets::{seed_catalogue, validate_creation};
use assetchain_core::error::CoreError;

use crate::error::{RegistryError, RegistryResult};
use crate::models::asset::{Asset, AssetInput};
use crate::world_state::{ScanGuard, WorldState};

/// Provides the registry operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Write the seed catalogue.
    ///
    /// Writes are sequential and stop at the first failure; earlier writes
    /// are not rolled back here. Returns the number of assets written.
    pub async fn init_ledger<S>(state: &S) -> RegistryResult<usize>
    where
        S: WorldState + ?Sized,
    {
        let catalogue = seed_catalogue();
        for seed in catalogue {
            Self::put(state, &Asset::from(seed)).await?;
        }

        tracing::info!(count = catalogue.len(), "Seed catalogue written");
        Ok(catalogue.len())
    }

    /// Create a new asset.
    ///
    /// Fails with [`CoreError::AlreadyExists`] if the derived id is taken and
    /// with [`CoreError::InvalidState`] if the category rejects the status.
    pub async fn create<S>(state: &S, input: &AssetInput) -> RegistryResult<Asset>
    where
        S: WorldState + ?Sized,
    {
        let id = input.id();
        if Self::exists(state, &id).await? {
            return Err(CoreError::AlreadyExists(id).into());
        }

        let category = validate_creation(&id, &input.asset_type, &input.status)?;

        let asset = Asset::from_input(input);
        Self::put(state, &asset).await?;

        tracing::info!(asset_id = %asset.id, category = category.name(), "Asset created");
        Ok(asset)
    }

    /// Find an asset by id. An empty stored value counts as absent.
    pub async fn find_by_id<S>(state: &S, id: &str) -> RegistryResult<Option<Asset>>
    where
        S: WorldState + ?Sized,
    {
        match state.get_state(id).await? {
            Some(bytes) if !bytes.is_empty() => {
                Asset::decode(&bytes).map(Some).map_err(RegistryError::Decode)
            }
            _ => Ok(None),
        }
    }

    /// Read an asset, failing with [`CoreError::NotFound`] if it is absent.
    pub async fn read<S>(state: &S, id: &str) -> RegistryResult<Asset>
    where
        S: WorldState + ?Sized,
    {
        Self::find_by_id(state, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()).into())
    }

    /// Overwrite every field of an existing asset.
    ///
    /// The category creation rules are not re-applied.
    pub async fn update<S>(state: &S, input: &AssetInput) -> RegistryResult<Asset>
    where
        S: WorldState + ?Sized,
    {
        let id = input.id();
        if !Self::exists(state, &id).await? {
            return Err(CoreError::NotFound(id).into());
        }

        let asset = Asset::from_input(input);
        Self::put(state, &asset).await?;

        tracing::info!(asset_id = %asset.id, status = %asset.status, "Asset updated");
        Ok(asset)
    }

    /// Delete an existing asset.
    pub async fn delete<S>(state: &S, id: &str) -> RegistryResult<()>
    where
        S: WorldState + ?Sized,
    {
        if !Self::exists(state, id).await? {
            return Err(CoreError::NotFound(id.to_string()).into());
        }

        state.del_state(id).await?;

        tracing::info!(asset_id = %id, "Asset deleted");
        Ok(())
    }

    /// Whether the world state holds a non-empty value for `id`.
    ///
    /// A failed read is returned as an error, never as `false`.
    pub async fn exists<S>(state: &S, id: &str) -> RegistryResult<bool>
    where
        S: WorldState + ?Sized,
    {
        let bytes = state.get_state(id).await?;
        Ok(bytes.is_some_and(|b| !b.is_empty()))
    }

    /// List every asset in world-state iteration order.
    ///
    /// A record that fails to decode aborts the listing. The scan cursor is
    /// released on every path.
    pub async fn list_all<S>(state: &S) -> RegistryResult<Vec<Asset>>
    where
        S: WorldState + ?Sized,
    {
        let mut scan = ScanGuard::new(state.get_state_by_range("", "").await?);

        let mut assets = Vec::new();
        while let Some(entry) = scan.next_entry().await? {
            let asset = Asset::decode(&entry.value).map_err(RegistryError::Decode)?;
            assets.push(asset);
        }
        scan.close()?;

        tracing::debug!(count = assets.len(), "Listed assets");
        Ok(assets)
    }

    async fn put<S>(state: &S, asset: &Asset) -> RegistryResult<()>
    where
        S: WorldState + ?Sized,
    {
        let bytes = asset.encode().map_err(RegistryError::Encode)?;
        state.put_state(&asset.id, bytes).await?;
        Ok(())
    }
}
