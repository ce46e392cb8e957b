//! Shared test fixtures

use async_trait::async_trait;
use quote_tracker::quote::{QuoteClientConfig, QuoteError, QuotePriceClient, QuoteTransport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Query parameters of one recorded GET
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub query: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport serving queued responses first, then a default body
#[derive(Default)]
pub struct MockTransport {
    queued: Mutex<VecDeque<Result<Value, QuoteError>>>,
    default: Option<Value>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(body: Value) -> Self {
        Self {
            default: Some(body),
            ..Self::default()
        }
    }

    pub fn push(&self, body: Value) {
        self.queued.lock().unwrap().push_back(Ok(body));
    }

    pub fn push_err(&self, err: QuoteError) {
        self.queued.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteTransport for MockTransport {
    async fn get_json(&self, _url: &str, query: &[(&str, &str)]) -> Result<Value, QuoteError> {
        self.calls.lock().unwrap().push(RecordedCall {
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        if let Some(next) = self.queued.lock().unwrap().pop_front() {
            return next;
        }
        self.default
            .clone()
            .ok_or_else(|| QuoteError::InvalidResponse("No mock response queued".to_string()))
    }
}

pub fn client_with(body: Value) -> (QuotePriceClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::with_default(body));
    let client = QuotePriceClient::with_transport(
        QuoteClientConfig::with_api_key("test-key"),
        transport.clone(),
    )
    .unwrap();
    (client, transport)
}
