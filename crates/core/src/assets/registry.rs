//! Asset registration rules.
//!
//! Pure functions that validate asset creation requests. Store reads and
//! writes are performed by the caller (repository layer).

use super::AssetCategory;
use crate::error::CoreError;
use crate::types::{AssetId, ID_SEPARATOR};

/// Derive the world-state key of an asset from its owner and code.
///
/// The rule is part of the public contract: callers are responsible for
/// choosing owner/code pairs that do not collide unintentionally.
pub fn derive_id(owner: &str, code: &str) -> AssetId {
    format!("{owner}{ID_SEPARATOR}{code}")
}

/// Validate a creation request against the rules of its category and return
/// that category.
///
/// Only called on creation; updates are never re-checked.
pub fn validate_creation(
    id: &str,
    asset_type: &str,
    status: &str,
) -> Result<AssetCategory, CoreError> {
    let category = AssetCategory::from_name(asset_type);
    category.validate_creation(id, status)?;
    Ok(category)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
