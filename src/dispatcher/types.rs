use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Protocol error kinds a tool invocation can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    InternalError,
}

impl ErrorKind {
    /// JSON-RPC error code.
    pub fn code(&self) -> i32 {
        match self {
            ErrorKind::InvalidRequest => -32600,
            ErrorKind::InternalError => -32603,
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// Inbound tool invocation.
#[derive(Debug, Clone)]
pub struct ToolRequest {
    pub tool_name: String,
    pub arguments: Option<Map<String, Value>>,
}

impl ToolRequest {
    pub fn new(tool_name: impl Into<String>, arguments: Option<Map<String, Value>>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content_type: "text",
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolError {
    #[serde(rename = "code")]
    pub kind: ErrorKind,
    pub message: String,
}

/// Outbound response; either a content payload or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Content { content: Vec<TextContent> },
    Error { error: ProtocolError },
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        ToolResponse::Content {
            content: vec![TextContent::new(text)],
        }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        ToolResponse::Error {
            error: ProtocolError {
                kind,
                message: message.into(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolResponse::Error { .. })
    }
}
