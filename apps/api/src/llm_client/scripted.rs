//! Scripted inference backend for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::{InferenceBackend, InferenceOutput, InferenceRequest, LlmError, Usage};

/// Replays queued replies in order and records every request it receives.
/// Once the script is exhausted every call fails as a transient outage.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<InferenceRequest>>,
}

impl ScriptedBackend {
    pub(crate) fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    async fn submit(&self, request: InferenceRequest) -> Result<InferenceOutput, LlmError> {
        self.requests.lock().unwrap().push(request);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(InferenceOutput {
                text,
                model: "scripted".to_string(),
                usage: Usage::default(),
                processing_time: Duration::from_millis(1),
                request_id: Uuid::new_v4(),
            }),
            Some(Err(e)) => Err(e),
            None => Err(LlmError::TransientService {
                attempts: 3,
                message: "connection refused".to_string(),
            }),
        }
    }
}
