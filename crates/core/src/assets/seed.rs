//! Seed catalogue written by ledger initialization.

use super::category::TYPE_STORAGE;
use super::registry::derive_id;
use crate::types::AssetId;

const SEED_OWNER: &str = "Склад";
const SEED_STATUS: &str = "Готов к продаже";
const SEED_DEPARTMENT: &str = "Склад";

/// One pre-defined asset of the seed catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAsset {
    pub owner: &'static str,
    pub status: &'static str,
    pub asset_type: &'static str,
    pub department: &'static str,
    pub code: &'static str,
    pub value: i64,
    pub date: &'static str,
}

impl SeedAsset {
    const fn warehouse(code: &'static str, value: i64, date: &'static str) -> Self {
        Self {
            owner: SEED_OWNER,
            status: SEED_STATUS,
            asset_type: TYPE_STORAGE,
            department: SEED_DEPARTMENT,
            code,
            value,
            date,
        }
    }

    /// Derived world-state key.
    pub fn id(&self) -> AssetId {
        derive_id(self.owner, self.code)
    }
}

const SEED_CATALOGUE: &[SeedAsset] = &[
    SeedAsset::warehouse("М2", 60, "02.04.2023 09:01"),
    SeedAsset::warehouse("М3", 130, "02.04.2023 09:04"),
    SeedAsset::warehouse("М2а", 20, "02.04.2023 09:08"),
    SeedAsset::warehouse("М4", 80, "02.04.2023 09:09"),
    SeedAsset::warehouse("М8", 190, "02.04.2023 09:15"),
    SeedAsset::warehouse("А2", 340, "02.04.2023 09:32"),
    SeedAsset::warehouse("А19", 540, "02.04.2023 09:45"),
    SeedAsset::warehouse("Бр1", 10, "02.04.2023 09:52"),
    SeedAsset::warehouse("Л8", 35, "02.04.2023 09:55"),
    SeedAsset::warehouse("Ц7", 40, "02.04.2023 09:58"),
];

/// The fixed catalogue, in write order.
pub fn seed_catalogue() -> &'static [SeedAsset] {
    SEED_CATALOGUE
}
