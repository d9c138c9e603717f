//! Last-request-wins holder for the results a session is showing
//!
//! Every search takes a ticket. Only the completion carrying the most
//! recently issued ticket may replace the displayed results; older
//! completions are discarded when they settle.

use std::sync::Mutex;
use tracing::debug;

use super::models::ContentItem;
use crate::metrics::METRICS;

/// Sequence number handed out when a search starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct SlotState {
    issued: u64,
    applied: u64,
    loading: bool,
    items: Vec<ContentItem>,
}

/// Point-in-time copy of a slot
#[derive(Debug, Clone, Default)]
pub struct SlotSnapshot {
    pub sequence: u64,
    pub loading: bool,
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Default)]
pub struct ResultSlot {
    state: Mutex<SlotState>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search; supersedes any search still in flight
    pub fn begin(&self) -> Ticket {
        let mut state = self.state.lock().unwrap();
        state.issued += 1;
        state.loading = true;
        Ticket(state.issued)
    }

    /// Offer a finished search's results.
    ///
    /// Returns `false`, leaving the slot untouched, when a newer search has
    /// been started since `ticket` was issued.
    pub fn complete(&self, ticket: Ticket, items: Vec<ContentItem>) -> bool {
        let mut state = self.state.lock().unwrap();
        if ticket.0 != state.issued {
            debug!(
                "Discarding stale results for ticket {} (latest {})",
                ticket.0, state.issued
            );
            METRICS.discovery_stale_results.inc();
            return false;
        }

        state.items = items;
        state.applied = ticket.0;
        state.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    pub fn snapshot(&self) -> SlotSnapshot {
        let state = self.state.lock().unwrap();
        SlotSnapshot {
            sequence: state.applied,
            loading: state.loading,
            items: state.items.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::models::{CategoryId, ContentFormat};
    use chrono::Utc;

    fn item(id: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: id.to_string(),
            author: "a".to_string(),
            views: 1,
            likes: 0,
            comments: 0,
            ratio: 0.0,
            thumbnail: String::new(),
            description: String::new(),
            format: ContentFormat::Videos,
            category: CategoryId::Business,
            verified: true,
            published_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_search() {
        let slot = ResultSlot::new();
        assert!(!slot.is_loading());

        let ticket = slot.begin();
        assert!(slot.is_loading());

        assert!(slot.complete(ticket, vec![item("a")]));
        let snapshot = slot.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.sequence, 1);
        assert_eq!(snapshot.items[0].id, "a");
    }

    #[test]
    fn test_stale_completion_discarded() {
        let slot = ResultSlot::new();
        let videos = slot.begin();
        let podcasts = slot.begin();

        // Newer search settles first
        assert!(slot.complete(podcasts, vec![item("podcast")]));
        // Older search settles late and must not win
        assert!(!slot.complete(videos, vec![item("video")]));

        let snapshot = slot.snapshot();
        assert_eq!(snapshot.items[0].id, "podcast");
        assert_eq!(snapshot.sequence, podcasts.sequence());
    }

    #[test]
    fn test_loading_until_latest_settles() {
        let slot = ResultSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(!slot.complete(first, vec![item("old")]));
        assert!(slot.is_loading());
        assert!(slot.snapshot().items.is_empty());

        assert!(slot.complete(second, Vec::new()));
        assert!(!slot.is_loading());
    }
}
