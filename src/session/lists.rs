//! Viewing history and saved items for one session

use serde::Serialize;

use crate::discovery::ContentItem;

/// History and bookmarks, both newest first
#[derive(Debug, Clone, Serialize)]
pub struct SessionLists {
    history: Vec<ContentItem>,
    saved: Vec<ContentItem>,
    #[serde(skip)]
    history_limit: usize,
}

impl SessionLists {
    pub fn new(history_limit: usize) -> Self {
        Self {
            history: Vec::new(),
            saved: Vec::new(),
            history_limit,
        }
    }

    /// Record that `item` was opened: move it to the front, trim the tail
    pub fn record_view(&mut self, item: ContentItem) {
        self.history.retain(|h| h.id != item.id);
        self.history.insert(0, item);
        self.history.truncate(self.history_limit);
    }

    /// Add or remove a bookmark; returns whether `item` is now saved
    pub fn toggle_saved(&mut self, item: ContentItem) -> bool {
        if self.is_saved(&item.id) {
            self.saved.retain(|s| s.id != item.id);
            false
        } else {
            self.saved.insert(0, item);
            true
        }
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.iter().any(|s| s.id == id)
    }

    pub fn history(&self) -> &[ContentItem] {
        &self.history
    }

    pub fn saved(&self) -> &[ContentItem] {
        &self.saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{CategoryId, ContentFormat};
    use chrono::Utc;

    fn item(id: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: format!("Item {}", id),
            author: "author".to_string(),
            views: 10,
            likes: 1,
            comments: 1,
            ratio: 0.2,
            thumbnail: String::new(),
            description: String::new(),
            format: ContentFormat::Articles,
            category: CategoryId::Culture,
            verified: true,
            published_at: Utc::now(),
        }
    }

    fn history_ids(lists: &SessionLists) -> Vec<&str> {
        lists.history().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_history_newest_first_deduplicated() {
        let mut lists = SessionLists::new(50);
        lists.record_view(item("a"));
        lists.record_view(item("b"));
        lists.record_view(item("a"));

        assert_eq!(history_ids(&lists), ["a", "b"]);
    }

    #[test]
    fn test_history_capped() {
        let mut lists = SessionLists::new(50);
        for i in 0..60 {
            lists.record_view(item(&i.to_string()));
        }

        assert_eq!(lists.history().len(), 50);
        assert_eq!(lists.history()[0].id, "59");
        assert_eq!(lists.history()[49].id, "10");
    }

    #[test]
    fn test_toggle_saved() {
        let mut lists = SessionLists::new(50);
        assert!(lists.toggle_saved(item("a")));
        assert!(lists.toggle_saved(item("b")));
        assert!(lists.is_saved("a"));
        assert_eq!(lists.saved()[0].id, "b");

        assert!(!lists.toggle_saved(item("a")));
        assert!(!lists.is_saved("a"));
        assert_eq!(lists.saved().len(), 1);
    }
}
