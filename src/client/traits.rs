use serde_json::Value;

use super::{ClientResult, Endpoint};

/// The single operation tools need from the remote API.
///
/// `OutlineClient` is the production implementation; tests substitute a
/// recording fake so no HTTP traffic is needed.
#[async_trait::async_trait]
pub trait RemoteApi: Send + Sync {
    /// POST `body` to `endpoint` and return the parsed JSON response body.
    async fn post(&self, endpoint: Endpoint, body: Value) -> ClientResult<Value>;
}
