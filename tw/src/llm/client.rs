//! GenerativeClient trait definition

use async_trait::async_trait;

use super::LlmError;
use crate::prompt::GenerationRequest;

/// Stateless generation client - each call is independent
///
/// One request produces one raw text response. No conversation state is
/// kept between calls; every itinerary generation starts fresh.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send a single structured-output generation request and return
    /// the raw response text (expected to be JSON, possibly wrapped in
    /// prose by the service).
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock generation client for unit tests
    pub struct MockGenerativeClient {
        responses: Mutex<Vec<Result<String, LlmError>>>,
        call_count: AtomicUsize,
    }

    impl MockGenerativeClient {
        pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            debug!(response_count = responses.len(), "MockGenerativeClient::new: called");
            Self {
                responses: Mutex::new(responses),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerativeClient for MockGenerativeClient {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            debug!(idx, "MockGenerativeClient::generate: called");
            let mut responses = self.responses.lock().expect("mock lock poisoned");
            if responses.is_empty() {
                return Err(LlmError::InvalidResponse("No more mock responses".to_string()));
            }
            responses.remove(0)
        }
    }
}
