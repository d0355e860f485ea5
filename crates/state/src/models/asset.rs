//! Asset record and the caller-supplied fields it is built from.
//!
//! The wire encoding is a JSON object with the field names `ID`, `Owner`,
//! `Status`, `Type`, `Department`, `Code`, `Value` and `Date`. Decoding is
//! lenient: field names match case-insensitively (an exact match wins),
//! missing or `null` fields take their zero value, unknown fields are ignored
//! and a `null` record decodes to an empty asset.

use assetchain_core::assets::{derive_id, SeedAsset};
use assetchain_core::types::AssetId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire field names of [`Asset`], in declaration order.
const WIRE_FIELDS: [&str; 8] = [
    "ID",
    "Owner",
    "Status",
    "Type",
    "Department",
    "Code",
    "Value",
    "Date",
];

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An asset as stored in the world state under its `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Asset {
    #[serde(rename = "ID")]
    pub id: AssetId,
    pub owner: String,
    pub status: String,
    #[serde(rename = "Type")]
    pub asset_type: String,
    pub department: String,
    pub code: String,
    pub value: i64,
    pub date: String,
}

impl Asset {
    /// Build the record for `input`, deriving its id.
    pub fn from_input(input: &AssetInput) -> Self {
        Self {
            id: input.id(),
            owner: input.owner.clone(),
            status: input.status.clone(),
            asset_type: input.asset_type.clone(),
            department: input.department.clone(),
            code: input.code.clone(),
            value: input.value,
            date: input.date.clone(),
        }
    }

    /// Encode to the wire format.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from the wire format.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Option<Map<String, Value>>>(bytes)? {
            Some(fields) => serde_json::from_value(Value::Object(canonical_fields(fields))),
            None => Ok(Self::default()),
        }
    }
}

/// Rename keys that match a wire field case-insensitively to the wire name
/// and drop `null` values and unknown keys.
fn canonical_fields(fields: Map<String, Value>) -> Map<String, Value> {
    let mut canonical = Map::new();
    for (key, value) in fields {
        if value.is_null() {
            continue;
        }
        let Some(name) = WIRE_FIELDS
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&key))
        else {
            continue;
        };
        if key == *name {
            canonical.insert(key, value);
        } else {
            canonical.entry(name.to_string()).or_insert(value);
        }
    }
    canonical
}

impl From<&SeedAsset> for Asset {
    fn from(seed: &SeedAsset) -> Self {
        Self {
            id: seed.id(),
            owner: seed.owner.to_string(),
            status: seed.status.to_string(),
            asset_type: seed.asset_type.to_string(),
            department: seed.department.to_string(),
            code: seed.code.to_string(),
            value: seed.value,
            date: seed.date.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Input DTO
// ---------------------------------------------------------------------------

/// Fields supplied by the caller on create and update.
///
/// Update is a full overwrite, so both operations take every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetInput {
    pub owner: String,
    pub status: String,
    #[serde(rename = "Type")]
    pub asset_type: String,
    pub department: String,
    pub code: String,
    pub value: i64,
    pub date: String,
}

impl AssetInput {
    /// World-state key this input addresses.
    pub fn id(&self) -> AssetId {
        derive_id(&self.owner, &self.code)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
