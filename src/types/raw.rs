// src/types/raw.rs
//! Raw search-result shapes as the backend returns them, before normalization.
//!
//! These shapes are untrusted: entries may nest their attributes under
//! `fields` or carry them at the top level, ids arrive as strings or numbers,
//! and `job_skills` is either a list or a single comma-separated string. All
//! of that tolerance lives here, in one place.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// One raw search hit from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    #[serde(deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub fields: Option<RawFields>,
    pub metadata: Option<RawMetadata>,
    /// Some payloads skip the `fields` wrapper and put the job attributes at
    /// the top level of the entry. Flattening captures that variant.
    #[serde(flatten)]
    pub inline: RawFields,
}

impl RawEntry {
    /// Resolve the attribute block: nested `fields` wins, otherwise the entry
    /// itself is the attribute block.
    pub fn fields(&self) -> &RawFields {
        self.fields.as_ref().unwrap_or(&self.inline)
    }

    pub fn score(&self) -> Option<f64> {
        self.metadata.as_ref().and_then(|m| m.score)
    }
}

/// Job attributes of a raw entry. Every field is optional; alias fields keep
/// their own slot so the fallback order stays explicit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFields {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub job_location: Option<String>,
    pub search_city: Option<String>,
    pub salary: Option<String>,
    pub job_summary: Option<String>,
    pub job_description: Option<String>,
    #[serde(deserialize_with = "skill_list")]
    pub job_skills: Vec<String>,
    pub job_type: Option<String>,
    pub job_level: Option<String>,
    pub job_category: Option<String>,
    pub job_link: Option<String>,
    #[serde(alias = "jobUrl")]
    pub job_url: Option<String>,
}

impl RawFields {
    pub fn location(&self) -> Option<&str> {
        self.job_location.as_deref().or(self.search_city.as_deref())
    }

    pub fn summary(&self) -> Option<&str> {
        self.job_summary.as_deref().or(self.job_description.as_deref())
    }

    pub fn link(&self) -> Option<&str> {
        self.job_link.as_deref().or(self.job_url.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMetadata {
    pub score: Option<f64>,
}

/// A full search response: the entry list under `entries` or `results`.
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub entries: Vec<RawEntry>,
}

impl SearchResponse {
    /// Tolerant extraction from a parsed JSON body. A missing or non-array
    /// entry list degrades to an empty response; unreadable entries keep a
    /// placeholder so no entry is silently dropped.
    pub fn from_value(value: &Value) -> Self {
        let list = value.get("entries").or_else(|| value.get("results"));
        let Some(Value::Array(items)) = list else {
            warn!("search response has no entry array, treating as empty");
            return Self::default();
        };

        let entries = items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).unwrap_or_else(|e| {
                    warn!("unreadable search entry, keeping placeholder: {}", e);
                    RawEntry::default()
                })
            })
            .collect();

        Self { entries }
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept `job_skills` as a string list, a comma-separated string (tokens
/// trimmed, empties dropped), or anything else (empty list).
fn skill_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Skills {
        Many(Vec<String>),
        One(String),
        Other(Value),
    }

    Ok(match Option::<Skills>::deserialize(deserializer)? {
        Some(Skills::Many(list)) => list,
        Some(Skills::One(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skills_from_array() {
        let entry: RawEntry =
            serde_json::from_value(json!({"fields": {"job_skills": ["Go", "Rust"]}})).unwrap();
        assert_eq!(entry.fields().job_skills, vec!["Go", "Rust"]);
    }

    #[test]
    fn test_skills_from_comma_string() {
        let entry: RawEntry =
            serde_json::from_value(json!({"fields": {"job_skills": "Go, Rust , ,SQL"}})).unwrap();
        assert_eq!(entry.fields().job_skills, vec!["Go", "Rust", "SQL"]);
    }

    #[test]
    fn test_skills_absent_or_malformed() {
        let entry: RawEntry = serde_json::from_value(json!({"fields": {}})).unwrap();
        assert!(entry.fields().job_skills.is_empty());

        let entry: RawEntry =
            serde_json::from_value(json!({"fields": {"job_skills": 42}})).unwrap();
        assert!(entry.fields().job_skills.is_empty());
    }

    #[test]
    fn test_inline_fields_without_wrapper() {
        let entry: RawEntry =
            serde_json::from_value(json!({"job_title": "Engineer", "company": "Acme"})).unwrap();
        assert_eq!(entry.fields().job_title.as_deref(), Some("Engineer"));
        assert_eq!(entry.fields().company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_numeric_id_becomes_string() {
        let entry: RawEntry = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(entry.id.as_deref(), Some("7"));
    }

    #[test]
    fn test_location_and_link_fallback_chains() {
        let fields: RawFields =
            serde_json::from_value(json!({"search_city": "Berlin", "jobUrl": "https://x"}))
                .unwrap();
        assert_eq!(fields.location(), Some("Berlin"));
        assert_eq!(fields.link(), Some("https://x"));

        let fields: RawFields =
            serde_json::from_value(json!({"job_location": "Paris", "search_city": "Lyon"}))
                .unwrap();
        assert_eq!(fields.location(), Some("Paris"));
    }

    #[test]
    fn test_response_accepts_results_alias() {
        let response = SearchResponse::from_value(&json!({"results": [{"id": "1"}]}));
        assert_eq!(response.entries.len(), 1);
    }

    #[test]
    fn test_response_degrades_on_bad_shapes() {
        assert!(SearchResponse::from_value(&json!({})).entries.is_empty());
        assert!(SearchResponse::from_value(&json!({"entries": "not-an-array"}))
            .entries
            .is_empty());
    }

    #[test]
    fn test_non_object_entry_keeps_placeholder() {
        let response = SearchResponse::from_value(&json!({"entries": [{"id": "1"}, "junk"]}));
        assert_eq!(response.entries.len(), 2);
        assert!(response.entries[1].id.is_none());
    }
}
