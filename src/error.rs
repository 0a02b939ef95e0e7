use crate::client::error::ClientError;
use crate::tools::error::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
