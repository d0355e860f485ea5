//! Asset registry business logic.
//!
//! This module provides the pure rules that gate asset writes. It does NOT
//! depend on the world state; callers read and write records themselves.

pub mod category;
pub mod registry;
pub mod seed;

pub use category::AssetCategory;
pub use registry::{derive_id, validate_creation};
pub use seed::{seed_catalogue, SeedAsset};
