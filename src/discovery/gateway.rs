//! Oracle gateway: the only place the discovery core performs I/O
//!
//! Every failure is absorbed here. Discovery degrades to an empty record
//! list, briefs degrade to [`NO_BRIEF`].

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::DiscoveryError;
use crate::metrics::METRICS;
use crate::oracle::{Oracle, OracleRequest};

/// Brief text used whenever the oracle has nothing to say
pub const NO_BRIEF: &str = "No brief available.";

/// Single-shot access to the oracle, no retries
#[derive(Clone)]
pub struct OracleGateway {
    oracle: Arc<dyn Oracle>,
}

impl OracleGateway {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Ask for structured records, reporting why nothing came back
    pub async fn try_fetch_records(
        &self,
        instruction: String,
        schema: Value,
    ) -> Result<Vec<Value>, DiscoveryError> {
        let text = self
            .oracle
            .generate(OracleRequest::structured(instruction, schema))
            .await
            .map_err(|e| DiscoveryError::OracleUnavailable(e.to_string()))?;

        // No text at all reads as an empty array
        let Some(text) = text else {
            debug!("Oracle returned no discovery payload");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(other) => Err(DiscoveryError::MalformedResponse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(DiscoveryError::MalformedResponse(e.to_string())),
        }
    }

    /// Ask for structured records; any failure yields an empty list
    pub async fn fetch_records(&self, instruction: String, schema: Value) -> Vec<Value> {
        match self.try_fetch_records(instruction, schema).await {
            Ok(records) => records,
            Err(e) => {
                error!("Error fetching discovery content: {}", e);
                Vec::new()
            }
        }
    }

    /// Ask for free text, reporting transport failures
    pub async fn try_fetch_brief(&self, instruction: String) -> Result<Option<String>, DiscoveryError> {
        let text = self
            .oracle
            .generate(OracleRequest::text(instruction))
            .await
            .map_err(|e| DiscoveryError::OracleUnavailable(e.to_string()))?;

        Ok(text.filter(|t| !t.trim().is_empty()))
    }

    /// Ask for free text; failures and empty answers yield [`NO_BRIEF`]
    pub async fn fetch_brief(&self, instruction: String) -> String {
        match self.try_fetch_brief(instruction).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                METRICS.brief_fallbacks.inc();
                NO_BRIEF.to_string()
            }
            Err(e) => {
                error!("Error getting AI brief: {}", e);
                METRICS.brief_fallbacks.inc();
                NO_BRIEF.to_string()
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{OracleError, OracleOperation, StaticOracle};
    use serde_json::json;

    fn gateway(oracle: StaticOracle) -> (OracleGateway, Arc<StaticOracle>) {
        let oracle = Arc::new(oracle);
        (OracleGateway::new(oracle.clone()), oracle)
    }

    #[tokio::test]
    async fn test_records_parsed_from_array() {
        let (gateway, oracle) = gateway(StaticOracle::text(r#"[{"id":"a"},{"id":"b"}]"#));

        let records = gateway
            .try_fetch_records("find".to_string(), json!({"type": "ARRAY"}))
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        let request = oracle.last_request().unwrap();
        assert_eq!(request.operation, OracleOperation::Discover);
        assert!(request.schema.is_some());
    }

    #[tokio::test]
    async fn test_non_json_is_malformed() {
        let (gateway, _) = gateway(StaticOracle::text("Here are some videos!"));

        let result = gateway
            .try_fetch_records("find".to_string(), json!({}))
            .await;
        assert!(matches!(result, Err(DiscoveryError::MalformedResponse(_))));

        assert!(gateway.fetch_records("find".to_string(), json!({})).await.is_empty());
    }

    #[tokio::test]
    async fn test_wrapped_object_is_malformed() {
        let (gateway, _) = gateway(StaticOracle::text(r#"{"items": [{"id": "a"}]}"#));

        let result = gateway
            .try_fetch_records("find".to_string(), json!({}))
            .await;
        assert_eq!(
            result,
            Err(DiscoveryError::MalformedResponse(
                "expected a JSON array, got an object".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_missing_payload_is_empty() {
        let (gateway, _) = gateway(StaticOracle::empty());
        let records = gateway.try_fetch_records("find".to_string(), json!({})).await;
        assert_eq!(records, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_transport_failure_absorbed() {
        let (gateway, oracle) =
            gateway(StaticOracle::failing(OracleError::RequestFailed("refused".to_string())));

        let result = gateway.try_fetch_records("find".to_string(), json!({})).await;
        assert!(matches!(result, Err(DiscoveryError::OracleUnavailable(_))));

        assert!(gateway.fetch_records("find".to_string(), json!({})).await.is_empty());
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_brief_verbatim() {
        let (gateway, oracle) = gateway(StaticOracle::text("- point one\n- point two"));

        let brief = gateway.fetch_brief("summarize".to_string()).await;
        assert_eq!(brief, "- point one\n- point two");
        assert!(oracle.last_request().unwrap().schema.is_none());
    }

    #[tokio::test]
    async fn test_brief_sentinels() {
        let (empty, _) = gateway(StaticOracle::empty());
        assert_eq!(empty.fetch_brief("s".to_string()).await, NO_BRIEF);

        let (blank, _) = gateway(StaticOracle::text("  \n"));
        assert_eq!(blank.fetch_brief("s".to_string()).await, NO_BRIEF);

        let (failing, _) =
            gateway(StaticOracle::failing(OracleError::Timeout("slow".to_string())));
        assert_eq!(failing.fetch_brief("s".to_string()).await, "No brief available.");
    }
}
