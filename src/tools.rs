pub mod traits;
pub mod schema;
pub mod error;
pub mod payload;
pub mod registry;
pub mod documents;
pub mod comments;

pub use error::{RegistryError, ToolError};
pub use registry::ToolRegistry;
pub use schema::{ArgSchema, ToolSchema};
pub use traits::Tool;
