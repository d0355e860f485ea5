use crate::types::AssetId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("the asset {0} already exists")]
    AlreadyExists(AssetId),

    #[error("the asset {0} does not exist")]
    NotFound(AssetId),

    #[error("статус актива {id} не соответсвует правилам")]
    InvalidState { id: AssetId },
}
