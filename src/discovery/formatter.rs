//! Instruction builders for the discovery and brief oracle calls

use serde_json::{json, Value};

use super::models::DiscoveryQuery;

/// Number of items every discovery instruction asks for
pub const TOP_N: usize = 10;

/// Fields every discovery record must carry
pub const REQUIRED_FIELDS: [&str; 8] = [
    "id",
    "title",
    "author",
    "views",
    "likes",
    "comments",
    "description",
    "thumbnail",
];

const DEFAULT_BRIEF_CONTEXT: &str = "General search";

/// Build the discovery instruction for a validated query
pub fn discovery_instruction(query: &DiscoveryQuery) -> String {
    format!(
        "Act as a high-authority content filter for FocusStream.\n\
         The user is searching for \"{query}\" in the category \"{category}\" focusing on \"{format}\".\n\
         Strictly provide the TOP {top_n} high-value, non-distractive resources.\n\
         Avoid clickbait, comedy, or low-quality entertainment.\n\
         Focus on academic, professional, and verified sources.\n\
         For each item, generate realistic engagement metrics (views, likes, comments).\n\
         Generate valid mock IDs and relevant descriptions.\n\
         Provide a placeholder image URL for the thumbnail.\n\
         Respond with a single JSON array of exactly {top_n} objects matching the response schema.",
        query = query.query(),
        category = query.category(),
        format = query.format(),
        top_n = TOP_N,
    )
}

/// Structured-output schema for one discovery response
pub fn item_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "author": { "type": "STRING" },
                "views": { "type": "NUMBER" },
                "likes": { "type": "NUMBER" },
                "comments": { "type": "NUMBER" },
                "description": { "type": "STRING" },
                "thumbnail": { "type": "STRING" },
                "publishedAt": { "type": "STRING" }
            },
            "required": REQUIRED_FIELDS,
        }
    })
}

/// Build the brief instruction; blank context falls back to a general one
pub fn brief_instruction(topic: &str, context: Option<&str>) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_BRIEF_CONTEXT);

    format!(
        "Provide a concise, factual, and high-level summary of the following: \"{}\".\n\
         Context: {}.\n\
         Format: Use bullet points for key facts. Stay neutral and academic. Max 200 words.",
        topic.trim(),
        context
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::models::{CategoryId, ContentFormat};

    #[test]
    fn test_discovery_instruction_carries_request() {
        let query =
            DiscoveryQuery::new(CategoryId::Health, "sleep science", ContentFormat::Podcasts)
                .unwrap();
        let instruction = discovery_instruction(&query);

        assert!(instruction.contains("\"sleep science\""));
        assert!(instruction.contains("\"health\""));
        assert!(instruction.contains("\"Podcasts\""));
        assert!(instruction.contains("TOP 10"));
        assert!(instruction.contains("Avoid clickbait"));
        assert!(instruction.contains("JSON array"));
    }

    #[test]
    fn test_schema_requires_all_fields_but_published_at() {
        let schema = item_schema();
        let required: Vec<&str> = schema["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert_eq!(required, REQUIRED_FIELDS);
        assert!(!required.contains(&"publishedAt"));
        assert!(schema["items"]["properties"]["publishedAt"].is_object());
        assert_eq!(schema["type"], "ARRAY");
    }

    #[test]
    fn test_brief_instruction_context() {
        let with_context = brief_instruction("CRISPR", Some("gene editing lecture"));
        assert!(with_context.contains("\"CRISPR\""));
        assert!(with_context.contains("Context: gene editing lecture."));

        let blank = brief_instruction("CRISPR", Some("   "));
        assert!(blank.contains("Context: General search."));

        let absent = brief_instruction("CRISPR", None);
        assert!(absent.contains("Max 200 words"));
        assert!(absent.contains("Context: General search."));
    }
}
