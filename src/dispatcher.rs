use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;

use crate::client::traits::RemoteApi;
use crate::tools::{
    error::ToolError,
    registry::ToolRegistry,
    schema::ToolSchema,
};

pub mod types;

use types::{ToolRequest, ToolResponse};

/// Routes tool invocations to their handlers and shapes the response.
///
/// Holds only read-only state, so concurrent `dispatch` calls are independent.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    client: Arc<dyn RemoteApi>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, client: Arc<dyn RemoteApi>) -> Self {
        Self { registry, client }
    }

    pub fn list_tools(&self) -> Vec<ToolSchema> {
        self.registry.list()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Resolve and run one tool. Every outcome, including a panicking
    /// handler, becomes a well-formed response.
    pub async fn dispatch(&self, request: ToolRequest) -> ToolResponse {
        let Some(tool) = self.registry.resolve(&request.tool_name) else {
            let err = ToolError::ToolNotFound(request.tool_name);
            tracing::debug!("{}", err);
            return ToolResponse::error(err.kind(), err.to_string());
        };

        let input = Value::Object(request.arguments.unwrap_or_default());
        let outcome = AssertUnwindSafe(tool.run(self.client.as_ref(), input))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!("Tool {} panicked: {}", request.tool_name, message);
                Err(ToolError::Internal(message))
            }
        };

        match result.and_then(|value| {
            serde_json::to_string_pretty(&value).map_err(|e| ToolError::Internal(e.to_string()))
        }) {
            Ok(text) => ToolResponse::text(text),
            Err(err) => ToolResponse::error(err.kind(), err.to_string()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::types::ErrorKind;
    use crate::client::{ClientError, Endpoint};
    use crate::testing::RecordingClient;
    use crate::tools::{ArgSchema, Tool};
    use serde_json::json;

    fn dispatcher_with(client: Arc<RecordingClient>) -> Dispatcher {
        let registry = ToolRegistry::discover().unwrap();
        Dispatcher::new(Arc::new(registry), client)
    }

    fn args(value: Value) -> Option<serde_json::Map<String, Value>> {
        value.as_object().cloned()
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_request_without_remote_call() {
        let client = Arc::new(RecordingClient::responding(json!({ "data": {} })));
        let dispatcher = dispatcher_with(client.clone());

        let response = dispatcher
            .dispatch(ToolRequest::new("delete_collection", args(json!({ "id": "x" }))))
            .await;

        assert_eq!(
            response,
            ToolResponse::error(ErrorKind::InvalidRequest, "Tool delete_collection not supported")
        );
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn success_is_pretty_printed_text_content() {
        let client = Arc::new(RecordingClient::responding(json!({ "data": { "id": "d1" } })));
        let dispatcher = dispatcher_with(client);

        let response = dispatcher
            .dispatch(ToolRequest::new("get_document", args(json!({ "id": "d1" }))))
            .await;

        let expected = serde_json::to_string_pretty(&json!({ "id": "d1" })).unwrap();
        assert_eq!(response, ToolResponse::text(expected));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "content": [{ "type": "text", "text": "{\n  \"id\": \"d1\"\n}" }] })
        );
    }

    #[tokio::test]
    async fn remote_failure_is_invalid_request_with_original_message() {
        let client = Arc::new(RecordingClient::with_reply(|_, _| {
            Err(ClientError::UnexpectedResponse("timeout of 30000ms exceeded".into()))
        }));
        let dispatcher = dispatcher_with(client);

        for (name, arguments) in [
            ("create_document", json!({ "title": "T", "text": "x", "collectionId": "c" })),
            ("create_comment", json!({ "documentId": "d" })),
            ("get_document", json!({ "id": "d" })),
            ("list_documents", json!({})),
        ] {
            let response = dispatcher.dispatch(ToolRequest::new(name, args(arguments))).await;
            match response {
                ToolResponse::Error { error } => {
                    assert_eq!(error.kind, ErrorKind::InvalidRequest, "{name}");
                    assert!(error.message.contains("timeout of 30000ms exceeded"), "{name}");
                }
                other => panic!("{name}: expected error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn missing_arguments_are_treated_as_empty_object() {
        let client = Arc::new(RecordingClient::responding(json!({ "data": [] })));
        let dispatcher = dispatcher_with(client.clone());

        let response = dispatcher.dispatch(ToolRequest::new("list_documents", None)).await;

        assert!(!response.is_error());
        assert_eq!(client.calls(), vec![(Endpoint::DocumentsList, json!({}))]);
    }

    #[tokio::test]
    async fn error_response_serializes_code_and_message() {
        let response = ToolResponse::error(ErrorKind::InternalError, "boom");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "error": { "code": -32603, "message": "boom" } })
        );
    }

    struct PanickingTool;

    #[async_trait::async_trait]
    impl Tool for PanickingTool {
        fn name(&self) -> &str {
            "explode"
        }
        fn description(&self) -> &str {
            "Always panics"
        }
        fn args(&self) -> Vec<ArgSchema> {
            Vec::new()
        }
        async fn run(&self, _client: &dyn RemoteApi, _input: Value) -> Result<Value, ToolError> {
            panic!("handler exploded");
        }
    }

    #[tokio::test]
    async fn panicking_handler_becomes_internal_error() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PanickingTool)).unwrap();
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            Arc::new(RecordingClient::responding(Value::Null)),
        );

        let response = dispatcher.dispatch(ToolRequest::new("explode", None)).await;
        assert_eq!(
            response,
            ToolResponse::error(ErrorKind::InternalError, "handler exploded")
        );
    }

    #[tokio::test]
    async fn concurrent_invocations_are_independent() {
        let client = Arc::new(RecordingClient::with_reply(|_, body| {
            Ok(json!({ "data": { "echo": body["id"].clone() } }))
        }));
        let dispatcher = dispatcher_with(client.clone());

        let requests = (0..8).map(|i| {
            let dispatcher = dispatcher.clone();
            async move {
                let arguments = args(json!({ "id": format!("doc-{i}") }));
                dispatcher
                    .dispatch(ToolRequest::new("get_document", arguments))
                    .await
            }
        });
        let responses = futures::future::join_all(requests).await;

        for (i, response) in responses.into_iter().enumerate() {
            let ToolResponse::Content { content } = response else {
                panic!("request {i} failed");
            };
            let value: Value = serde_json::from_str(&content[0].text).unwrap();
            assert_eq!(value, json!({ "echo": format!("doc-{i}") }));
        }
        assert_eq!(client.call_count(), 8);
    }
}
