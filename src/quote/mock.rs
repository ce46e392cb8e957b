//! Canned-response transport for tests and offline runs

use super::transport::QuoteTransport;
use super::QuoteError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A recorded GET request
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Requested URL without query
    pub url: String,
    /// Query parameters in send order
    pub query: Vec<(String, String)>,
}

impl RecordedCall {
    /// Value of a query parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that replays queued responses and records every call
///
/// Queued responses are served first; once the queue is empty the default
/// body is returned, or an `InvalidResponse` error if none is set.
#[derive(Default)]
pub struct MockTransport {
    queued: Mutex<VecDeque<Result<Value, QuoteError>>>,
    default: Option<Value>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Empty transport with no default body
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport answering every request with `body`
    pub fn with_default(body: Value) -> Self {
        Self {
            default: Some(body),
            ..Self::default()
        }
    }

    /// Queue a successful body
    pub fn push(&self, body: Value) {
        self.queue().push_back(Ok(body));
    }

    /// Queue an error
    pub fn push_err(&self, err: QuoteError) {
        self.queue().push_back(Err(err));
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Value, QuoteError>>> {
        self.queued.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl QuoteTransport for MockTransport {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, QuoteError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                url: url.to_string(),
                query: query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });

        if let Some(next) = self.queue().pop_front() {
            return next;
        }

        self.default
            .clone()
            .ok_or_else(|| QuoteError::InvalidResponse("No mock response queued".to_string()))
    }
}
