//! Discovery service: formatter, gateway and ranker wired together
//!
//! This is the surface the presentation layer talks to. Nothing here
//! returns an error; failures show up as fewer (or no) items, or as the
//! sentinel brief.

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::config::DiscoveryConfig;
use super::formatter;
use super::gateway::{OracleGateway, NO_BRIEF};
use super::models::{CategoryId, ContentFormat, ContentItem, DiscoveryQuery};
use super::ranker::Ranker;
use super::slot::{ResultSlot, Ticket};
use crate::metrics::METRICS;
use crate::oracle::Oracle;

/// Result of a search routed through a session's [`ResultSlot`]
#[derive(Debug, Clone)]
pub struct SlotOutcome {
    pub ticket: Ticket,
    /// Whether these items became the displayed results
    pub applied: bool,
    pub items: Vec<ContentItem>,
}

#[derive(Clone)]
pub struct DiscoveryService {
    gateway: OracleGateway,
    ranker: Ranker,
}

impl DiscoveryService {
    pub fn new(oracle: Arc<dyn Oracle>, config: &DiscoveryConfig) -> Self {
        Self {
            gateway: OracleGateway::new(oracle),
            ranker: Ranker::new(config),
        }
    }

    /// Ranked items for a validated query; empty on any failure
    pub async fn search(&self, query: &DiscoveryQuery) -> Vec<ContentItem> {
        let start = Instant::now();
        info!(
            category = %query.category(),
            format = %query.format(),
            "Discovery search started"
        );

        let instruction = formatter::discovery_instruction(query);
        let records = self
            .gateway
            .fetch_records(instruction, formatter::item_schema())
            .await;
        let received = records.len();

        let ranking = self.ranker.rank(records, query, Utc::now());
        METRICS.record_discovery(ranking.items.len(), ranking.dropped);
        METRICS
            .discovery_duration
            .observe(start.elapsed().as_secs_f64());

        info!(
            received,
            returned = ranking.items.len(),
            dropped = ranking.dropped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Discovery search finished"
        );

        ranking.items
    }

    /// Untyped entry point; a blank query yields no items and no oracle call
    pub async fn search_discovery(
        &self,
        category: CategoryId,
        query: &str,
        format: ContentFormat,
    ) -> Vec<ContentItem> {
        match DiscoveryQuery::new(category, query, format) {
            Ok(query) => self.search(&query).await,
            Err(e) => {
                warn!("Rejected discovery request: {}", e);
                Vec::new()
            }
        }
    }

    /// Search on behalf of a session, applying results only if still current
    pub async fn search_into(&self, slot: &ResultSlot, query: &DiscoveryQuery) -> SlotOutcome {
        let ticket = slot.begin();
        let items = self.search(query).await;
        let applied = slot.complete(ticket, items.clone());

        if !applied {
            info!(
                sequence = ticket.sequence(),
                "Discovery results superseded by a newer search"
            );
        }

        SlotOutcome {
            ticket,
            applied,
            items,
        }
    }

    /// Short summary of `topic`; the sentinel text on any failure
    pub async fn request_brief(&self, topic: &str, context: Option<&str>) -> String {
        if topic.trim().is_empty() {
            warn!("Rejected brief request with empty topic");
            return NO_BRIEF.to_string();
        }

        info!(topic_len = topic.len(), "Brief requested");
        let instruction = formatter::brief_instruction(topic, context);
        self.gateway.fetch_brief(instruction).await
    }
}
