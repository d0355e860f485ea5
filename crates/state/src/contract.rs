//! By-name dispatch of registry operations.
//!
//! A ledger host invokes the registry with a function name and a list of
//! string arguments. [`Invocation::parse`] turns that pair into a typed call
//! and [`Invocation::execute`] runs it against a world state, returning the
//! JSON result handed back to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RegistryError;
use crate::models::asset::AssetInput;
use crate::repositories::AssetRepo;
use crate::world_state::WorldState;

// ---------------------------------------------------------------------------
// Function names
// ---------------------------------------------------------------------------

pub const FN_INIT_LEDGER: &str = "InitLedger";
pub const FN_CREATE_ASSET: &str = "CreateAsset";
pub const FN_READ_ASSET: &str = "ReadAsset";
pub const FN_UPDATE_ASSET: &str = "UpdateAsset";
pub const FN_DELETE_ASSET: &str = "DeleteAsset";
pub const FN_ASSET_EXISTS: &str = "AssetExists";
pub const FN_GET_ALL_ASSETS: &str = "GetAllAssets";

/// Every function the contract exposes.
pub const FUNCTIONS: &[&str] = &[
    FN_INIT_LEDGER,
    FN_CREATE_ASSET,
    FN_READ_ASSET,
    FN_UPDATE_ASSET,
    FN_DELETE_ASSET,
    FN_ASSET_EXISTS,
    FN_GET_ALL_ASSETS,
];

/// Parameter names of `CreateAsset` / `UpdateAsset`, in argument order.
const ASSET_PARAMS: [&str; 7] = [
    "Owner",
    "Status",
    "Type",
    "Department",
    "Code",
    "Value",
    "Date",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("function {0} not found in contract")]
    UnknownFunction(String),

    #[error("incorrect number of params for {function}: expected {expected}, received {received}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        received: usize,
    },

    #[error("error converting parameter {param} to int: {value:?}")]
    InvalidArgument { param: &'static str, value: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Raw invocation as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl InvocationRequest {
    pub fn new(function: &str, args: &[&str]) -> Self {
        Self {
            function: function.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub fn parse(&self) -> Result<Invocation, ContractError> {
        Invocation::parse(&self.function, &self.args)
    }
}

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// A parsed, typed contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    InitLedger,
    CreateAsset(AssetInput),
    ReadAsset(String),
    UpdateAsset(AssetInput),
    DeleteAsset(String),
    AssetExists(String),
    GetAllAssets,
}

impl Invocation {
    pub fn parse(function: &str, args: &[String]) -> Result<Self, ContractError> {
        match function {
            FN_INIT_LEDGER => {
                expect_args(FN_INIT_LEDGER, args, 0)?;
                Ok(Self::InitLedger)
            }
            FN_CREATE_ASSET => Ok(Self::CreateAsset(parse_asset_input(FN_CREATE_ASSET, args)?)),
            FN_READ_ASSET => Ok(Self::ReadAsset(single_arg(FN_READ_ASSET, args)?)),
            FN_UPDATE_ASSET => Ok(Self::UpdateAsset(parse_asset_input(FN_UPDATE_ASSET, args)?)),
            FN_DELETE_ASSET => Ok(Self::DeleteAsset(single_arg(FN_DELETE_ASSET, args)?)),
            FN_ASSET_EXISTS => Ok(Self::AssetExists(single_arg(FN_ASSET_EXISTS, args)?)),
            FN_GET_ALL_ASSETS => {
                expect_args(FN_GET_ALL_ASSETS, args, 0)?;
                Ok(Self::GetAllAssets)
            }
            other => Err(ContractError::UnknownFunction(other.to_string())),
        }
    }

    /// Contract function name of this call.
    pub fn function(&self) -> &'static str {
        match self {
            Self::InitLedger => FN_INIT_LEDGER,
            Self::CreateAsset(_) => FN_CREATE_ASSET,
            Self::ReadAsset(_) => FN_READ_ASSET,
            Self::UpdateAsset(_) => FN_UPDATE_ASSET,
            Self::DeleteAsset(_) => FN_DELETE_ASSET,
            Self::AssetExists(_) => FN_ASSET_EXISTS,
            Self::GetAllAssets => FN_GET_ALL_ASSETS,
        }
    }

    /// Whether the call never writes to the world state.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::ReadAsset(_) | Self::AssetExists(_) | Self::GetAllAssets
        )
    }

    /// Run the call. Mutating calls return `null`.
    pub async fn execute<S>(&self, state: &S) -> Result<Value, ContractError>
    where
        S: WorldState + ?Sized,
    {
        let result = match self {
            Self::InitLedger => {
                AssetRepo::init_ledger(state).await?;
                Value::Null
            }
            Self::CreateAsset(input) => {
                AssetRepo::create(state, input).await?;
                Value::Null
            }
            Self::ReadAsset(id) => {
                let asset = AssetRepo::read(state, id).await?;
                serde_json::to_value(asset).map_err(RegistryError::Encode)?
            }
            Self::UpdateAsset(input) => {
                AssetRepo::update(state, input).await?;
                Value::Null
            }
            Self::DeleteAsset(id) => {
                AssetRepo::delete(state, id).await?;
                Value::Null
            }
            Self::AssetExists(id) => Value::Bool(AssetRepo::exists(state, id).await?),
            Self::GetAllAssets => {
                let assets = AssetRepo::list_all(state).await?;
                serde_json::to_value(assets).map_err(RegistryError::Encode)?
            }
        };
        Ok(result)
    }
}

fn expect_args(function: &'static str, args: &[String], expected: usize) -> Result<(), ContractError> {
    if args.len() != expected {
        return Err(ContractError::ArgumentCount {
            function,
            expected,
            received: args.len(),
        });
    }
    Ok(())
}

fn single_arg(function: &'static str, args: &[String]) -> Result<String, ContractError> {
    expect_args(function, args, 1)?;
    Ok(args[0].clone())
}

fn parse_asset_input(function: &'static str, args: &[String]) -> Result<AssetInput, ContractError> {
    expect_args(function, args, ASSET_PARAMS.len())?;

    let value = args[5]
        .parse::<i64>()
        .map_err(|_| ContractError::InvalidArgument {
            param: ASSET_PARAMS[5],
            value: args[5].clone(),
        })?;

    Ok(AssetInput {
        owner: args[0].clone(),
        status: args[1].clone(),
        asset_type: args[2].clone(),
        department: args[3].clone(),
        code: args[4].clone(),
        value,
        date: args[6].clone(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use assetchain_core::error::CoreError;

    use super::*;
    use crate::world_state::MemoryWorldState;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn create_args() -> Vec<String> {
        args(&[
            "Склад",
            "Готов к продаже",
            "Хранение",
            "Склад",
            "М2",
            "60",
            "02.04.2023 09:01",
        ])
    }

    #[test]
    fn parse_create_asset() {
        let invocation = Invocation::parse(FN_CREATE_ASSET, &create_args()).unwrap();
        let Invocation::CreateAsset(input) = &invocation else {
            panic!("expected CreateAsset, got {invocation:?}");
        };
        assert_eq!(input.id(), "Склад:М2");
        assert_eq!(input.value, 60);
        assert!(!invocation.is_read_only());
    }

    #[test]
    fn parse_negative_value() {
        let mut raw = create_args();
        raw[5] = "-5".into();
        assert_matches!(
            Invocation::parse(FN_UPDATE_ASSET, &raw),
            Ok(Invocation::UpdateAsset(input)) if input.value == -5
        );
    }

    #[test]
    fn parse_rejects_non_integer_value() {
        let mut raw = create_args();
        raw[5] = "60.5".into();
        assert_matches!(
            Invocation::parse(FN_CREATE_ASSET, &raw),
            Err(ContractError::InvalidArgument { param: "Value", .. })
        );
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert_matches!(
            Invocation::parse(FN_READ_ASSET, &[]),
            Err(ContractError::ArgumentCount { expected: 1, received: 0, .. })
        );
        assert_matches!(
            Invocation::parse(FN_GET_ALL_ASSETS, &args(&["x"])),
            Err(ContractError::ArgumentCount { expected: 0, received: 1, .. })
        );
        assert_matches!(
            Invocation::parse(FN_CREATE_ASSET, &args(&["a", "b"])),
            Err(ContractError::ArgumentCount { expected: 7, .. })
        );
    }

    #[test]
    fn parse_rejects_unknown_function() {
        assert_matches!(
            Invocation::parse("TransferAsset", &[]),
            Err(ContractError::UnknownFunction(name)) if name == "TransferAsset"
        );
    }

    #[test]
    fn every_function_round_trips_its_name() {
        for function in FUNCTIONS {
            let arity = match *function {
                FN_CREATE_ASSET | FN_UPDATE_ASSET => 7,
                FN_READ_ASSET | FN_DELETE_ASSET | FN_ASSET_EXISTS => 1,
                _ => 0,
            };
            let mut raw = vec!["1".to_string(); arity];
            if arity == 7 {
                raw = create_args();
            }
            let invocation = Invocation::parse(function, &raw).unwrap();
            assert_eq!(invocation.function(), *function);
        }
    }

    #[test]
    fn read_only_functions() {
        let id = args(&["Склад:М2"]);
        assert!(Invocation::parse(FN_READ_ASSET, &id).unwrap().is_read_only());
        assert!(Invocation::parse(FN_ASSET_EXISTS, &id).unwrap().is_read_only());
        assert!(Invocation::parse(FN_GET_ALL_ASSETS, &[]).unwrap().is_read_only());
        assert!(!Invocation::parse(FN_DELETE_ASSET, &id).unwrap().is_read_only());
        assert!(!Invocation::InitLedger.is_read_only());
    }

    #[test]
    fn request_deserializes_without_args() {
        let request: InvocationRequest =
            serde_json::from_str(r#"{"function":"GetAllAssets"}"#).unwrap();
        assert_eq!(request, InvocationRequest::new(FN_GET_ALL_ASSETS, &[]));
        assert_eq!(request.parse().unwrap(), Invocation::GetAllAssets);
    }

    #[tokio::test]
    async fn execute_create_then_read() {
        let state = MemoryWorldState::new();

        let created = Invocation::parse(FN_CREATE_ASSET, &create_args())
            .unwrap()
            .execute(&state)
            .await
            .unwrap();
        assert_eq!(created, Value::Null);

        let read = Invocation::ReadAsset("Склад:М2".into())
            .execute(&state)
            .await
            .unwrap();
        assert_eq!(read["ID"], "Склад:М2");
        assert_eq!(read["Value"], 60);

        let exists = Invocation::AssetExists("Склад:М2".into())
            .execute(&state)
            .await
            .unwrap();
        assert_eq!(exists, Value::Bool(true));
    }

    #[tokio::test]
    async fn execute_surfaces_registry_errors() {
        let state = MemoryWorldState::new();
        let err = Invocation::DeleteAsset("nobody:nothing".into())
            .execute(&state)
            .await
            .unwrap_err();
        assert_matches!(
            err,
            ContractError::Registry(RegistryError::Core(CoreError::NotFound(_)))
        );
        assert_eq!(err.to_string(), "the asset nobody:nothing does not exist");
    }

    #[tokio::test]
    async fn execute_get_all_after_init() {
        let state = MemoryWorldState::new();
        Invocation::InitLedger.execute(&state).await.unwrap();

        let all = Invocation::GetAllAssets.execute(&state).await.unwrap();
        assert_eq!(all.as_array().map(Vec::len), Some(10));
    }
}
