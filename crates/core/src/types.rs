/// World-state key of an asset: `Owner + ":" + Code`.
pub type AssetId = String;

/// Separator between the owner and code parts of an [`AssetId`].
pub const ID_SEPARATOR: &str = ":";
