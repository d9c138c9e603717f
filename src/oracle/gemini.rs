//! Gemini generateContent client with a per-operation circuit breaker

use super::circuit_breaker::{BreakerStats, CircuitBreaker, CircuitBreakerConfig};
use super::config::OracleConfig;
use super::models::{GenerateContentRequest, GenerateContentResponse};
use super::{Oracle, OracleError, OracleOperation, OracleRequest};
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use std::time::Instant;
use tracing::{debug, error, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini oracle client
pub struct GeminiOracle {
    http: Client,
    config: OracleConfig,
    breaker: CircuitBreaker,
}

impl GeminiOracle {
    /// Create a new Gemini client
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;

        let breaker = CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: config.circuit_breaker_failures,
            reset_timeout: config.breaker_reset_timeout(),
        });

        if config.api_key.is_none() {
            warn!("No oracle API key configured; oracle calls will be rejected upstream");
        }

        Ok(Self {
            http,
            config,
            breaker,
        })
    }

    /// Single generateContent round trip, no breaker bookkeeping
    async fn call_generate(&self, request: &OracleRequest) -> Result<Option<String>, OracleError> {
        let url = self.config.generate_url();
        let body = GenerateContentRequest::new(&request.instruction, request.schema.as_ref());

        debug!(
            operation = request.operation.as_str(),
            structured = request.schema.is_some(),
            instruction_len = request.instruction.len(),
            "Calling generateContent"
        );

        let mut req = self.http.post(&url).json(&body);

        if let Some(api_key) = &self.config.api_key {
            req = req.header(API_KEY_HEADER, api_key.expose_secret().as_str());
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                OracleError::Timeout(e.to_string())
            } else {
                OracleError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OracleError::UpstreamError(format!(
                "Status {}: {}",
                status, error_text
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        Ok(envelope.text())
    }

    pub fn breaker_stats(&self, operation: OracleOperation) -> BreakerStats {
        self.breaker.stats(operation)
    }
}

#[async_trait]
impl Oracle for GeminiOracle {
    async fn generate(&self, request: OracleRequest) -> Result<Option<String>, OracleError> {
        let start = Instant::now();
        let operation = request.operation;
        let label = operation.as_str();

        if !self.config.enabled {
            METRICS.record_oracle_request(label, "disabled");
            return Err(OracleError::Disabled);
        }

        if self.breaker.is_open(operation) {
            METRICS.oracle_circuit_open.with_label_values(&[label]).inc();
            error!("Circuit breaker is open for {} operation", label);
            return Err(OracleError::CircuitOpen(label.to_string()));
        }

        let result = self.call_generate(&request).await;

        match &result {
            Ok(_) => {
                self.breaker.mark_success(operation);
                METRICS.record_oracle_request(label, "success");
            }
            Err(e) => {
                self.breaker.mark_failure(operation);
                METRICS.record_oracle_request(label, "error");
                warn!("Oracle {} call failed: {}", label, e);
            }
        }

        METRICS
            .oracle_request_duration
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        result
    }
}
