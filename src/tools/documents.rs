use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::client::{Endpoint, RemoteApi};
use crate::tool;
use super::error::ToolError;
use super::payload::{take_data, Payload};

#[tool(
    description = "Create a new document",
    params(
        title = "Title of the document",
        text = "Content of the document in markdown format",
        collection_id = "ID of the collection to add the document to",
        parent_document_id = "ID of the parent document (if creating a nested document)",
        publish(description = "Whether to publish the document immediately", default = true),
        template = "Whether this document is a template",
    )
)]
pub async fn create_document(
    client: &dyn RemoteApi,
    title: String,
    text: String,
    collection_id: String,
    parent_document_id: Option<String>,
    publish: Option<bool>,
    template: Option<bool>,
) -> Result<Value, ToolError> {
    // `text` is required by the schema but still elided when blank.
    let payload = Payload::new()
        .required("title", title)
        .required("collectionId", collection_id)
        .text("text", Some(text))
        .text("parentDocumentId", parent_document_id)
        .value("template", template)
        .value("publish", publish);

    let response = client
        .post(Endpoint::DocumentsCreate, payload.into_value())
        .await
        .map_err(|e| {
            tracing::error!("Error creating document: {}", e);
            ToolError::Remote(e)
        })?;
    Ok(take_data(response))
}

#[tool(
    description = "Get details about a specific document. At least id XOR shareId are required.",
    params(id = "Unique identifier for the document. Either the UUID or the urlId is acceptable")
)]
pub async fn get_document(client: &dyn RemoteApi, id: String) -> Result<Value, ToolError> {
    let payload = Payload::new().required("id", id);

    let response = client
        .post(Endpoint::DocumentsInfo, payload.into_value())
        .await
        .map_err(|e| {
            tracing::error!("Error getting document: {}", e);
            ToolError::Remote(e)
        })?;
    Ok(take_data(response))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Pagination metadata of a single listing page. Missing fields stay `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub offset: Option<Number>,
    #[serde(default)]
    pub limit: Option<Number>,
    #[serde(default)]
    pub next_path: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Serialize)]
pub struct DocumentPage {
    pub documents: Value,
    pub pagination: Pagination,
}

#[tool(
    description = "List documents in the Outline workspace with optional filters",
    params(
        collection_id = "Filter by collection ID (optional)",
        query = "Search query to filter documents (optional)",
        limit(description = "Maximum number of documents to return (optional)", kind = "number"),
        offset(description = "Pagination offset (optional)", kind = "number"),
        sort = "Field to sort by (e.g. \"updatedAt\") (optional)",
        direction(
            description = "Sort direction, either \"ASC\" or \"DESC\" (optional)",
            one_of("ASC", "DESC"),
            kind = "string",
        ),
        template = "Optionally filter to only templates (optional)",
        user_id = "Optionally filter by user ID (optional)",
        parent_document_id = "Optionally filter by parent document ID (optional)",
        backlink_document_id = "Optionally filter by backlink document ID (optional)",
    )
)]
#[allow(clippy::too_many_arguments)]
pub async fn list_documents(
    client: &dyn RemoteApi,
    collection_id: Option<String>,
    query: Option<String>,
    limit: Option<Number>,
    offset: Option<Number>,
    sort: Option<String>,
    direction: Option<SortDirection>,
    template: Option<bool>,
    user_id: Option<String>,
    parent_document_id: Option<String>,
    backlink_document_id: Option<String>,
) -> Result<Value, ToolError> {
    let payload = Payload::new()
        .value("offset", offset)
        .value("limit", limit)
        .text("sort", sort)
        .value("direction", direction.map(|d| d.as_str()))
        .text("collectionId", collection_id)
        .text("userId", user_id)
        .text("backlinkDocumentId", backlink_document_id)
        .text("parentDocumentId", parent_document_id)
        .value("template", template)
        .text("query", query);

    let response = client
        .post(Endpoint::DocumentsList, payload.into_value())
        .await
        .map_err(|e| {
            tracing::error!("Error listing documents: {}", e);
            ToolError::Remote(e)
        })?;

    let envelope: ListEnvelope = serde_json::from_value(response).map_err(|e| {
        tracing::error!("Error listing documents: {}", e);
        ToolError::Remote(crate::client::ClientError::UnexpectedResponse(e.to_string()))
    })?;

    let page = DocumentPage {
        documents: envelope.data,
        pagination: envelope.pagination.unwrap_or_default(),
    };
    serde_json::to_value(page).map_err(|e| ToolError::Internal(e.to_string()))
}
