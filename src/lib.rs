pub mod client;
pub mod tools;
pub mod dispatcher;
pub mod server;
pub mod logger;
pub mod config;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

// re-export the proc-macro attribute: `use outline_mcp::tool;`
pub use outline_mcp_macros::tool;

// paths the `#[tool]` expansion refers to
#[doc(hidden)]
pub use async_trait;
#[doc(hidden)]
pub use serde;
#[doc(hidden)]
pub use serde_json;

pub use client::{Endpoint, OutlineClient, RemoteApi};
pub use config::Config;
pub use dispatcher::{
    types::{ErrorKind, ToolRequest, ToolResponse},
    Dispatcher,
};
pub use error::{Error, Result};
pub use server::OutlineServerHandler;
pub use tools::{Tool, ToolRegistry};
