//! Data models for discovery

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DiscoveryError;

/// Topic category identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Education,
    Business,
    Politics,
    Culture,
    Health,
    Science,
}

impl CategoryId {
    pub const ALL: [CategoryId; 6] = [
        Self::Education,
        Self::Business,
        Self::Politics,
        Self::Culture,
        Self::Health,
        Self::Science,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Business => "business",
            Self::Politics => "politics",
            Self::Culture => "culture",
            Self::Health => "health",
            Self::Science => "science",
        }
    }

    /// Static reference record for this category
    pub fn category(&self) -> &'static Category {
        // CATEGORIES is declared in the same order as ALL
        &CATEGORIES[*self as usize]
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Content format requested from the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentFormat {
    #[default]
    Videos,
    Podcasts,
    Documentaries,
    News,
    Articles,
}

impl ContentFormat {
    /// Display order
    pub const ALL: [ContentFormat; 5] = [
        Self::Videos,
        Self::Podcasts,
        Self::Documentaries,
        Self::News,
        Self::Articles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Videos => "Videos",
            Self::Podcasts => "Podcasts",
            Self::Documentaries => "Documentaries",
            Self::News => "News",
            Self::Articles => "Articles",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown format: {}", s))
    }
}

/// Static category reference data
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub static CATEGORIES: [Category; 6] = [
    Category {
        id: CategoryId::Education,
        label: "Education & Skills",
        description: "Learn new disciplines and master modern skills.",
        icon: "🎓",
        color: "from-blue-600 to-indigo-700",
    },
    Category {
        id: CategoryId::Business,
        label: "Business & Finance",
        description: "Market analysis, entrepreneurship, and wealth management.",
        icon: "💼",
        color: "from-emerald-600 to-teal-700",
    },
    Category {
        id: CategoryId::Politics,
        label: "Political Content",
        description: "Geopolitics, policy analysis, and global governance.",
        icon: "⚖️",
        color: "from-rose-600 to-pink-700",
    },
    Category {
        id: CategoryId::Culture,
        label: "Cultural & Religious",
        description: "Philosophical insights and deep cultural perspectives.",
        icon: "🏺",
        color: "from-amber-600 to-orange-700",
    },
    Category {
        id: CategoryId::Health,
        label: "Health & Medical",
        description: "Scientific research, bio-hacking, and mental wellness.",
        icon: "🩺",
        color: "from-cyan-600 to-sky-700",
    },
    Category {
        id: CategoryId::Science,
        label: "Science & Technology",
        description: "Emerging tech, space exploration, and AI.",
        icon: "🔬",
        color: "from-purple-600 to-fuchsia-700",
    },
];

/// A validated discovery request.
///
/// Construction rejects blank queries, so the pipeline never sees one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryQuery {
    category: CategoryId,
    query: String,
    format: ContentFormat,
}

impl DiscoveryQuery {
    pub fn new(
        category: CategoryId,
        query: &str,
        format: ContentFormat,
    ) -> Result<Self, DiscoveryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DiscoveryError::EmptyQuery);
        }

        Ok(Self {
            category,
            query: query.to_string(),
            format,
        })
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn format(&self) -> ContentFormat {
        self.format
    }

    /// Same search in another format
    pub fn with_format(&self, format: ContentFormat) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }
}

/// A ranked, validated content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub ratio: f64,
    pub thumbnail: String,
    pub description: String,
    pub format: ContentFormat,
    pub category: CategoryId,
    pub verified: bool,
    pub published_at: DateTime<Utc>,
}
