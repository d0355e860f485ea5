//! Domain rules for the asset registry.
//!
//! Identifier derivation, asset categories with their creation-time
//! checks, and the seed catalogue. Nothing here touches the world state;
//! `assetchain-state` performs the reads and writes.

pub mod assets;
pub mod error;
pub mod types;
