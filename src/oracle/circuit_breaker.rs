//! Circuit breaker guarding oracle operations
//!
//! The breaker never issues calls of its own; it only short-circuits
//! operations whose recent attempts kept failing.

use super::OracleOperation;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone)]
struct BreakerEntry {
    state: BreakerState,
    failure_count: usize,
    last_failure: Option<Instant>,
    opened_at: Option<Instant>,
}

impl BreakerEntry {
    fn new() -> Self {
        Self {
            state: BreakerState::Closed,
            failure_count: 0,
            last_failure: None,
            opened_at: None,
        }
    }
}

/// Circuit breaker configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: usize,
    pub reset_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            reset_timeout: Duration::from_secs(30),
        }
    }
}

/// Per-operation circuit breaker
pub struct CircuitBreaker {
    entries: Mutex<HashMap<OracleOperation, BreakerEntry>>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Whether calls for `operation` should be rejected right now.
    ///
    /// An open circuit whose cooldown has elapsed moves to half-open and
    /// lets the next call through as a probe.
    pub fn is_open(&self, operation: OracleOperation) -> bool {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(operation).or_insert_with(BreakerEntry::new);

        match entry.state {
            BreakerState::Closed | BreakerState::HalfOpen => false,
            BreakerState::Open => match entry.opened_at {
                Some(opened_at) if opened_at.elapsed() >= self.config.reset_timeout => {
                    entry.state = BreakerState::HalfOpen;
                    false
                }
                _ => true,
            },
        }
    }

    pub fn mark_success(&self, operation: OracleOperation) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(operation, BreakerEntry::new());
    }

    pub fn mark_failure(&self, operation: OracleOperation) {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(operation).or_insert_with(BreakerEntry::new);

        let now = Instant::now();
        entry.failure_count += 1;
        entry.last_failure = Some(now);

        // A failed half-open probe reopens immediately
        if entry.state == BreakerState::HalfOpen
            || entry.failure_count >= self.config.failure_threshold
        {
            entry.state = BreakerState::Open;
            entry.opened_at = Some(now);
        }
    }

    pub fn state(&self, operation: OracleOperation) -> BreakerState {
        let entries = self.entries.lock().unwrap();
        entries
            .get(&operation)
            .map(|e| e.state)
            .unwrap_or(BreakerState::Closed)
    }

    pub fn stats(&self, operation: OracleOperation) -> BreakerStats {
        let entries = self.entries.lock().unwrap();
        match entries.get(&operation) {
            Some(entry) => BreakerStats {
                state: entry.state,
                failure_count: entry.failure_count,
                last_failure: entry.last_failure,
            },
            None => BreakerStats {
                state: BreakerState::Closed,
                failure_count: 0,
                last_failure: None,
            },
        }
    }

    pub fn reset(&self, operation: OracleOperation) {
        self.entries.lock().unwrap().remove(&operation);
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

/// Circuit breaker statistics
#[derive(Debug, Clone)]
pub struct BreakerStats {
    pub state: BreakerState,
    pub failure_count: usize,
    pub last_failure: Option<Instant>,
}
