use std::collections::HashMap;
use std::sync::Arc;

use super::{
    comments::CreateCommentTool,
    documents::{CreateDocumentTool, GetDocumentTool, ListDocumentsTool},
    error::RegistryError,
    schema::ToolSchema,
    traits::Tool,
};

/// Name -> tool mapping. Built once at startup, read-only afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool.
    pub fn discover() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for tool in builtin_tools() {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Register a tool under its own name. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<&mut Self, RegistryError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.tools.insert(name, tool);
        Ok(self)
    }

    /// Advertised view of every tool, sorted by name.
    pub fn list(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema::new(tool.name(), tool.description(), &tool.args()))
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(CreateDocumentTool),
        Arc::new(GetDocumentTool),
        Arc::new(ListDocumentsTool),
        Arc::new(CreateCommentTool),
    ]
}
