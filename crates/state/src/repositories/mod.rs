//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept the world-state handle as the first argument.

pub mod asset_repo;

pub use asset_repo::AssetRepo;
