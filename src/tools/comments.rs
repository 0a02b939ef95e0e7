use serde_json::Value;

use crate::client::{Endpoint, RemoteApi};
use crate::tool;
use super::error::ToolError;
use super::payload::{take_data, Payload};

#[tool(
    description = "Create a new comment on a document",
    params(
        document_id = "ID of the document to comment on",
        text = "The body of the comment in markdown",
        parent_comment_id = "ID of the parent comment (if replying to a comment)",
        data = "Additional data for the comment",
    )
)]
pub async fn create_comment(
    client: &dyn RemoteApi,
    document_id: String,
    text: Option<String>,
    parent_comment_id: Option<String>,
    data: Option<Value>,
) -> Result<Value, ToolError> {
    let payload = Payload::new()
        .required("documentId", document_id)
        .text("text", text)
        .text("parentCommentId", parent_comment_id)
        .object("data", data);

    let response = client
        .post(Endpoint::CommentsCreate, payload.into_value())
        .await
        .map_err(|e| {
            tracing::error!("Error creating comment: {}", e);
            ToolError::Remote(e)
        })?;
    Ok(take_data(response))
}
