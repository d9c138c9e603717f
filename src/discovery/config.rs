//! Discovery pipeline settings

use serde::{Deserialize, Serialize};

/// Discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Items kept after ranking
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Entries kept in a session's viewing history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Placeholder image URL; `{id}` is replaced by the item id
    #[serde(default = "default_thumbnail_template")]
    pub thumbnail_template: String,
}

fn default_max_results() -> usize {
    10
}

fn default_history_limit() -> usize {
    50
}

fn default_thumbnail_template() -> String {
    "https://picsum.photos/seed/{id}/400/225".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            history_limit: default_history_limit(),
            thumbnail_template: default_thumbnail_template(),
        }
    }
}
