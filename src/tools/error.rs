use crate::client::error::ClientError;
use crate::dispatcher::types::ErrorKind;


#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool {0} not supported")]
    ToolNotFound(String),

    #[error("{0}")]
    Remote(#[from] ClientError),

    #[error("Tool parameters do not match: {0}")]
    ParamsNotMatched(String),

    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    /// Protocol error kind this failure is reported as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::ToolNotFound(_)
            | ToolError::Remote(_)
            | ToolError::ParamsNotMatched(_) => ErrorKind::InvalidRequest,
            ToolError::Internal(_) => ErrorKind::InternalError,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Tool already registered: {0}")]
    Duplicate(String),
}
