//! Asset categories and their creation-time hooks.
//!
//! The `Type` field of an asset is free-form text on the wire. Known values
//! map to dedicated variants so that category-specific rules live in one
//! place instead of string comparisons spread across the repository layer.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Wire name of the storage category used by the seed catalogue.
pub const TYPE_STORAGE: &str = "Хранение";

/// Wire name of the deal category.
pub const TYPE_DEAL: &str = "Сделка";

/// The only status a deal may be created with ("initial agreement").
pub const STATUS_INITIAL_AGREEMENT: &str = "Первичная договоренность";

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

/// Category of an asset, parsed from its `Type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Storage,
    Deal,
    /// Any other value, kept verbatim.
    Other(String),
}

impl AssetCategory {
    /// Parse from the wire `Type` value. Never fails.
    pub fn from_name(name: &str) -> Self {
        match name {
            TYPE_STORAGE => Self::Storage,
            TYPE_DEAL => Self::Deal,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire `Type` value.
    pub fn name(&self) -> &str {
        match self {
            Self::Storage => TYPE_STORAGE,
            Self::Deal => TYPE_DEAL,
            Self::Other(name) => name,
        }
    }

    /// Status an asset of this category must carry when first created, if
    /// the category restricts it.
    pub fn required_initial_status(&self) -> Option<&'static str> {
        match self {
            Self::Deal => Some(STATUS_INITIAL_AGREEMENT),
            Self::Storage | Self::Other(_) => None,
        }
    }

    /// Creation hook: reject `status` if this category pins the initial
    /// status to something else.
    pub fn validate_creation(&self, id: &str, status: &str) -> Result<(), CoreError> {
        match self.required_initial_status() {
            Some(required) if required != status => Err(CoreError::InvalidState {
                id: id.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn from_name_known_values() {
        assert_eq!(AssetCategory::from_name("Хранение"), AssetCategory::Storage);
        assert_eq!(AssetCategory::from_name("Сделка"), AssetCategory::Deal);
    }

    #[test]
    fn from_name_keeps_unknown_values() {
        let category = AssetCategory::from_name("Аренда");
        assert_eq!(category, AssetCategory::Other("Аренда".to_string()));
        assert_eq!(category.name(), "Аренда");
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert_matches!(AssetCategory::from_name("сделка"), AssetCategory::Other(_));
    }

    #[test]
    fn name_round_trips() {
        for name in [TYPE_STORAGE, TYPE_DEAL, "", "misc"] {
            assert_eq!(AssetCategory::from_name(name).name(), name);
        }
    }

    #[test]
    fn only_deal_pins_initial_status() {
        assert_eq!(
            AssetCategory::Deal.required_initial_status(),
            Some(STATUS_INITIAL_AGREEMENT)
        );
        assert_eq!(AssetCategory::Storage.required_initial_status(), None);
        assert_eq!(
            AssetCategory::Other("x".into()).required_initial_status(),
            None
        );
    }

    #[test]
    fn deal_with_initial_agreement_passes() {
        assert!(AssetCategory::Deal
            .validate_creation("Отдел:С1", STATUS_INITIAL_AGREEMENT)
            .is_ok());
    }

    #[test]
    fn deal_with_other_status_is_rejected() {
        let err = AssetCategory::Deal
            .validate_creation("Отдел:С1", "Готов к продаже")
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidState {
                id: "Отдел:С1".to_string()
            }
        );
        assert!(err.to_string().contains("Отдел:С1"));
    }

    #[test]
    fn other_categories_accept_any_status() {
        assert!(AssetCategory::Storage.validate_creation("a:b", "").is_ok());
        assert!(AssetCategory::Other("x".into())
            .validate_creation("a:b", "anything")
            .is_ok());
    }
}
