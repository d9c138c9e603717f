//! Result normalizer and ranker
//!
//! Raw oracle records are checked field by field before a [`ContentItem`]
//! is built. Records that fail are dropped one at a time; the batch never
//! fails as a whole.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::config::DiscoveryConfig;
use super::models::{ContentItem, DiscoveryQuery};
use crate::error::DiscoveryError;

/// Shape a raw record must have before it is trusted
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OracleRecord {
    id: String,
    title: String,
    author: String,
    views: f64,
    likes: f64,
    comments: f64,
    description: String,
    // Required by the schema, always replaced by the placeholder
    #[serde(rename = "thumbnail")]
    _thumbnail: String,
    // Optional; any shape other than a parseable date string is ignored
    #[serde(default)]
    published_at: Option<Value>,
}

/// Normalized output of one discovery response
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub items: Vec<ContentItem>,
    pub dropped: usize,
}

/// (likes + comments) / max(views, 1), over the counts as the oracle reported them
pub fn engagement_ratio(views: f64, likes: f64, comments: f64) -> f64 {
    (likes + comments) / views.max(1.0)
}

/// Validates, enriches and orders oracle records
#[derive(Debug, Clone)]
pub struct Ranker {
    max_results: usize,
    thumbnail_template: String,
}

impl Ranker {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            max_results: config.max_results,
            thumbnail_template: config.thumbnail_template.clone(),
        }
    }

    /// Placeholder image for an item id
    pub fn thumbnail_for(&self, id: &str) -> String {
        self.thumbnail_template.replace("{id}", id)
    }

    /// Turn raw records into ranked items for `query`.
    ///
    /// `retrieved_at` stands in for any missing publication time.
    pub fn rank(
        &self,
        records: Vec<Value>,
        query: &DiscoveryQuery,
        retrieved_at: DateTime<Utc>,
    ) -> Ranking {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(records.len());
        let mut dropped = 0;

        for (index, record) in records.into_iter().enumerate() {
            match self.normalize(record, query, retrieved_at) {
                Ok(item) if seen.insert(item.id.clone()) => items.push(item),
                Ok(item) => {
                    dropped += 1;
                    warn!("Dropping record {}: duplicate id {}", index, item.id);
                }
                Err(e) => {
                    dropped += 1;
                    warn!("Dropping record {}: {}", index, e);
                }
            }
        }

        // sort_by is stable: equal ratios keep oracle order
        items.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
        items.truncate(self.max_results);

        debug!("Ranked {} items, dropped {}", items.len(), dropped);
        Ranking { items, dropped }
    }

    fn normalize(
        &self,
        record: Value,
        query: &DiscoveryQuery,
        retrieved_at: DateTime<Utc>,
    ) -> Result<ContentItem, DiscoveryError> {
        let record: OracleRecord = serde_json::from_value(record)
            .map_err(|e| DiscoveryError::PartialRecord(e.to_string()))?;

        let id = record.id.trim();
        if id.is_empty() {
            return Err(DiscoveryError::PartialRecord("empty id".to_string()));
        }

        let views = count(record.views, "views")?;
        let likes = count(record.likes, "likes")?;
        let comments = count(record.comments, "comments")?;

        let published_at = record
            .published_at
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_published_at)
            .unwrap_or(retrieved_at);

        Ok(ContentItem {
            id: id.to_string(),
            title: record.title,
            author: record.author,
            views,
            likes,
            comments,
            ratio: engagement_ratio(record.views, record.likes, record.comments),
            thumbnail: self.thumbnail_for(id),
            description: record.description,
            format: query.format(),
            category: query.category(),
            verified: true,
            published_at,
        })
    }
}

/// Validated count, rounded for display. The ratio uses the unrounded value.
fn count(value: f64, field: &str) -> Result<u64, DiscoveryError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DiscoveryError::PartialRecord(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(value.round() as u64)
}

/// RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::models::{CategoryId, ContentFormat};
    use serde_json::json;

    fn record(id: &str, views: u64, likes: u64, comments: u64) -> Value {
        json!({
            "id": id,
            "title": format!("Title {}", id),
            "author": "Author",
            "views": views,
            "likes": likes,
            "comments": comments,
            "description": "Description",
            "thumbnail": "https://example.com/oracle.png"
        })
    }

    fn query() -> DiscoveryQuery {
        DiscoveryQuery::new(CategoryId::Science, "quantum", ContentFormat::Documentaries).unwrap()
    }

    fn ranker() -> Ranker {
        Ranker::new(&DiscoveryConfig::default())
    }

    fn ids(ranking: &Ranking) -> Vec<&str> {
        ranking.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_ratio_floors_denominator() {
        assert_eq!(engagement_ratio(10.0, 5.0, 5.0), 1.0);
        assert_eq!(engagement_ratio(1000.0, 1.0, 1.0), 0.002);
        assert_eq!(engagement_ratio(0.0, 3.0, 2.0), 5.0);
        assert_eq!(engagement_ratio(0.0, 0.0, 0.0), 0.0);
        assert_eq!(engagement_ratio(0.5, 1.0, 0.0), 1.0);
    }

    #[test]
    fn test_orders_by_ratio() {
        let ranking = ranker().rank(
            vec![record("b", 1000, 1, 1), record("a", 10, 5, 5)],
            &query(),
            Utc::now(),
        );

        assert_eq!(ids(&ranking), ["a", "b"]);
        assert_eq!(ranking.items[0].ratio, 1.0);
        assert_eq!(ranking.items[1].ratio, 0.002);
    }

    #[test]
    fn test_zero_views() {
        let ranking = ranker().rank(vec![record("c", 0, 3, 2)], &query(), Utc::now());
        assert_eq!(ranking.items[0].ratio, 5.0);
    }

    #[test]
    fn test_ties_keep_oracle_order() {
        let ranking = ranker().rank(
            vec![
                record("first", 100, 5, 5),
                record("top", 10, 10, 0),
                record("second", 200, 10, 10),
                record("third", 50, 3, 2),
            ],
            &query(),
            Utc::now(),
        );

        assert_eq!(ids(&ranking), ["top", "first", "second", "third"]);
    }

    #[test]
    fn test_drops_partial_records() {
        let mut records: Vec<Value> = (0..8).map(|i| record(&format!("ok{}", i), 100, i, 1)).collect();

        let mut missing_author = record("bad1", 10, 1, 1);
        missing_author.as_object_mut().unwrap().remove("author");
        records.insert(3, missing_author);

        let mut string_views = record("bad2", 10, 1, 1);
        string_views["views"] = json!("lots");
        records.push(string_views);

        let ranking = ranker().rank(records, &query(), Utc::now());

        assert_eq!(ranking.items.len(), 8);
        assert_eq!(ranking.dropped, 2);
        assert!(ranking.items.iter().all(|i| i.id.starts_with("ok")));
    }

    #[test]
    fn test_drops_invalid_values() {
        let mut negative = record("neg", 10, 1, 1);
        negative["likes"] = json!(-4);
        let mut blank_id = record("x", 10, 1, 1);
        blank_id["id"] = json!("  ");
        let mut null_title = record("nt", 10, 1, 1);
        null_title["title"] = Value::Null;

        let ranking = ranker().rank(
            vec![negative, blank_id, null_title, json!("not an object"), record("fine", 1, 1, 1)],
            &query(),
            Utc::now(),
        );

        assert_eq!(ids(&ranking), ["fine"]);
        assert_eq!(ranking.dropped, 4);
    }

    #[test]
    fn test_fractional_counts_round() {
        let mut fractional = record("f", 0, 0, 0);
        fractional["views"] = json!(1999.6);
        fractional["likes"] = json!(10.2);
        fractional["comments"] = json!(0);

        let ranking = ranker().rank(vec![fractional], &query(), Utc::now());
        assert_eq!(ranking.items[0].views, 2000);
        assert_eq!(ranking.items[0].likes, 10);
        assert_eq!(ranking.items[0].ratio, 10.2 / 1999.6);
    }

    #[test]
    fn test_fractional_counts_rank_by_reported_values() {
        let mut higher = record("higher", 0, 0, 0);
        higher["views"] = json!(2);
        higher["likes"] = json!(1.4);
        let mut lower = record("lower", 0, 0, 0);
        lower["views"] = json!(2);
        lower["likes"] = json!(1.2);

        // Both round to one like; the reported values still decide the order
        let ranking = ranker().rank(vec![lower, higher], &query(), Utc::now());
        assert_eq!(ids(&ranking), ["higher", "lower"]);
        assert_eq!(ranking.items[0].likes, 1);
        assert_eq!(ranking.items[0].ratio, 0.7);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let ranking = ranker().rank(
            vec![record("dup", 100, 1, 0), record("dup", 1, 50, 0)],
            &query(),
            Utc::now(),
        );

        assert_eq!(ranking.items.len(), 1);
        assert_eq!(ranking.items[0].likes, 1);
        assert_eq!(ranking.dropped, 1);
    }

    #[test]
    fn test_context_fields_stamped() {
        let now = Utc::now();
        let ranking = ranker().rank(vec![record("item-7", 10, 1, 1)], &query(), now);
        let item = &ranking.items[0];

        assert_eq!(item.thumbnail, "https://picsum.photos/seed/item-7/400/225");
        assert_eq!(item.format, ContentFormat::Documentaries);
        assert_eq!(item.category, CategoryId::Science);
        assert!(item.verified);
        assert_eq!(item.published_at, now);
    }

    #[test]
    fn test_published_at_parsing() {
        let now = Utc::now();
        let mut full = record("full", 1, 0, 0);
        full["publishedAt"] = json!("2024-05-01T12:30:00+02:00");
        let mut date_only = record("date", 1, 0, 0);
        date_only["publishedAt"] = json!("2023-11-20");
        let mut garbage = record("garbage", 1, 0, 0);
        garbage["publishedAt"] = json!("last tuesday");

        let ranking = ranker().rank(vec![full, date_only, garbage], &query(), now);

        assert_eq!(ranking.items[0].published_at.to_rfc3339(), "2024-05-01T10:30:00+00:00");
        assert_eq!(ranking.items[1].published_at.to_rfc3339(), "2023-11-20T00:00:00+00:00");
        assert_eq!(ranking.items[2].published_at, now);
    }

    #[test]
    fn test_non_string_published_at_keeps_record() {
        let now = Utc::now();
        let mut numeric = record("numeric", 10, 1, 0);
        numeric["publishedAt"] = json!(1700000000);
        let mut object = record("object", 10, 1, 0);
        object["publishedAt"] = json!({"date": "2024-01-01"});
        let mut null = record("null", 10, 1, 0);
        null["publishedAt"] = Value::Null;

        let ranking = ranker().rank(vec![numeric, object, null], &query(), now);

        assert_eq!(ranking.dropped, 0);
        assert_eq!(ids(&ranking), ["numeric", "object", "null"]);
        assert!(ranking.items.iter().all(|i| i.published_at == now));
    }

    #[test]
    fn test_truncates_to_max_results() {
        let config = DiscoveryConfig {
            max_results: 3,
            ..Default::default()
        };
        let records = (0..6).map(|i| record(&format!("r{}", i), 100, i, 0)).collect();

        let ranking = Ranker::new(&config).rank(records, &query(), Utc::now());
        assert_eq!(ids(&ranking), ["r5", "r4", "r3"]);
    }

    #[test]
    fn test_empty_input() {
        let ranking = ranker().rank(Vec::new(), &query(), Utc::now());
        assert!(ranking.items.is_empty());
        assert_eq!(ranking.dropped, 0);
    }
}
