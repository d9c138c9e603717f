//! Canned oracle for tests and offline runs

use super::{Oracle, OracleError, OracleRequest};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone)]
enum Canned {
    Answer(Option<String>),
    Failure(OracleError),
}

/// Oracle that always gives the same answer and records what it was asked
pub struct StaticOracle {
    canned: Canned,
    calls: AtomicUsize,
    last_request: Mutex<Option<OracleRequest>>,
}

impl StaticOracle {
    fn with(canned: Canned) -> Self {
        Self {
            canned,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::with(Canned::Answer(Some(text.into())))
    }

    /// Answers successfully but without any text
    pub fn empty() -> Self {
        Self::with(Canned::Answer(None))
    }

    pub fn failing(error: OracleError) -> Self {
        Self::with(Canned::Failure(error))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<OracleRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for StaticOracle {
    async fn generate(&self, request: OracleRequest) -> Result<Option<String>, OracleError> {
        debug!(operation = request.operation.as_str(), "Static oracle answering");
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        match &self.canned {
            Canned::Answer(text) => Ok(text.clone()),
            Canned::Failure(err) => Err(err.clone()),
        }
    }
}
