//! In-memory [`ApiCaller`] for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::caller::{ApiCaller, Endpoint, FormParams};
use crate::error::TransportResult;

/// Body returned once the scripted replies are exhausted.
pub const DEFAULT_REPLY: &str = r#"{"ok":true,"result":true}"#;

/// Records every call and answers from a scripted queue.
#[derive(Default)]
pub struct RecordingCaller {
    replies: Mutex<VecDeque<TransportResult<String>>>,
    calls: Mutex<Vec<(Endpoint, FormParams)>>,
}

impl RecordingCaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply body.
    pub fn reply(&self, body: impl Into<String>) -> &Self {
        self.replies.lock().push_back(Ok(body.into()));
        self
    }

    /// Queues a reply (success or transport failure).
    pub fn reply_with(&self, reply: TransportResult<String>) -> &Self {
        self.replies.lock().push_back(reply);
        self
    }

    /// Returns every call made so far.
    pub fn calls(&self) -> Vec<(Endpoint, FormParams)> {
        self.calls.lock().clone()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<(Endpoint, FormParams)> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl ApiCaller for RecordingCaller {
    async fn call(&self, endpoint: Endpoint, form: FormParams) -> TransportResult<String> {
        self.calls.lock().push((endpoint, form));
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_REPLY.to_string()))
    }
}
