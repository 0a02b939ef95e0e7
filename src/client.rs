pub mod traits;
pub mod error;
pub mod outline;

use std::fmt;

pub use error::ClientError;
pub use outline::OutlineClient;
pub use traits::RemoteApi;

/// Remote API endpoints used by the tools. Every call is a POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DocumentsCreate,
    DocumentsInfo,
    DocumentsList,
    CommentsCreate,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::DocumentsCreate => "/documents.create",
            Endpoint::DocumentsInfo => "/documents.info",
            Endpoint::DocumentsList => "/documents.list",
            Endpoint::CommentsCreate => "/comments.create",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result type for remote API calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
