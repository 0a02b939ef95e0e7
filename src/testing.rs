//! Test doubles shared by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::client::{ClientError, ClientResult, Endpoint, RemoteApi};

type Reply = Box<dyn Fn(Endpoint, &Value) -> ClientResult<Value> + Send + Sync>;

/// `RemoteApi` fake that records every call and answers with a scripted reply.
pub(crate) struct RecordingClient {
    calls: Mutex<Vec<(Endpoint, Value)>>,
    count: AtomicUsize,
    reply: Reply,
}

impl RecordingClient {
    pub(crate) fn responding(body: Value) -> Self {
        Self::with_reply(move |_, _| Ok(body.clone()))
    }

    pub(crate) fn failing(status: u16, message: &str) -> Self {
        let message = message.to_string();
        Self::with_reply(move |_, _| {
            Err(ClientError::Status {
                status,
                message: message.clone(),
            })
        })
    }

    pub(crate) fn with_reply<F>(reply: F) -> Self
    where
        F: Fn(Endpoint, &Value) -> ClientResult<Value> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            count: AtomicUsize::new(0),
            reply: Box::new(reply),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> Vec<(Endpoint, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Body of the most recent call.
    pub(crate) fn last_body(&self) -> Value {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, body)| body.clone())
            .expect("no remote call recorded")
    }
}

#[async_trait::async_trait]
impl RemoteApi for RecordingClient {
    async fn post(&self, endpoint: Endpoint, body: Value) -> ClientResult<Value> {
        self.count.fetch_add(1, Ordering::SeqCst);
        let reply = (self.reply)(endpoint, &body);
        self.calls.lock().unwrap().push((endpoint, body));
        reply
    }
}
