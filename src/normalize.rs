// src/normalize.rs
//! Converts raw search payloads into the canonical job list plus an aggregate
//! summary. Pure and infallible: malformed input degrades to empty output.

use std::collections::HashMap;

use serde_json::Value;
use tracing::info;

use crate::types::job::{JobRecord, NormalizedResults, OverallSummary};
use crate::types::raw::{RawEntry, SearchResponse};

const NO_TITLE: &str = "No Title";
const NO_COMPANY: &str = "Unknown Company";
const NO_LOCATION: &str = "Remote";
const NO_SALARY: &str = "Not Specified";
const NO_DESCRIPTION: &str = "No description available";
const NO_JOB_TYPE: &str = "Full-time";
const NO_JOB_LEVEL: &str = "Not Specified";
const NO_CATEGORY: &str = "General";

const DESCRIPTION_LIMIT: usize = 300;
const MATCHING_SKILL_CAP: usize = 10;
const TOP_SKILL_COUNT: usize = 8;

/// Policy for dividing a job's skill list into matching and missing halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillSplit {
    /// The first ten skills count as matching; missing stays empty.
    #[default]
    Truncate,
    /// A score-proportional prefix (floor of len x score) is matching, the
    /// remainder missing.
    Proportional,
}

pub struct Normalizer {
    split: SkillSplit,
}

impl Normalizer {
    pub fn new(split: SkillSplit) -> Self {
        Self { split }
    }

    /// Map every entry to a `JobRecord`, preserving input order, then derive
    /// the overall summary. Entry count is always preserved.
    pub fn normalize(&self, response: &SearchResponse) -> NormalizedResults {
        let jobs: Vec<JobRecord> = response
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.normalize_entry(index, entry))
            .collect();

        let overall_summary = summarize(&jobs);
        info!(job_count = jobs.len(), "normalized search response");

        NormalizedResults {
            jobs,
            overall_summary,
        }
    }

    /// Convenience for callers holding an unparsed JSON body.
    pub fn normalize_value(&self, value: &Value) -> NormalizedResults {
        self.normalize(&SearchResponse::from_value(value))
    }

    fn normalize_entry(&self, index: usize, entry: &RawEntry) -> JobRecord {
        let fields = entry.fields();
        let score = entry.score();
        let (matching_skills, missing_skills) =
            self.split_skills(fields.job_skills.clone(), score.unwrap_or(0.0));

        JobRecord {
            // Missing ids get a per-pass counter value so list identity stays
            // stable and collision-free within one normalization.
            id: entry.id.clone().unwrap_or_else(|| format!("job-{}", index)),
            title: or_literal(fields.job_title.as_deref(), NO_TITLE),
            company: or_literal(fields.company.as_deref(), NO_COMPANY),
            location: or_literal(fields.location(), NO_LOCATION),
            salary: or_literal(fields.salary.as_deref(), NO_SALARY),
            description: describe(fields.summary()),
            match_percentage: percentage(score),
            job_type: or_literal(fields.job_type.as_deref(), NO_JOB_TYPE),
            job_level: or_literal(fields.job_level.as_deref(), NO_JOB_LEVEL),
            job_category: or_literal(fields.job_category.as_deref(), NO_CATEGORY),
            matching_skills,
            missing_skills,
            job_link: fields.link().map(str::to_string),
        }
    }

    fn split_skills(&self, mut skills: Vec<String>, score: f64) -> (Vec<String>, Vec<String>) {
        match self.split {
            SkillSplit::Truncate => {
                skills.truncate(MATCHING_SKILL_CAP);
                (skills, Vec::new())
            }
            SkillSplit::Proportional => {
                let cut = ((skills.len() as f64) * score.clamp(0.0, 1.0)).floor() as usize;
                let missing = skills.split_off(cut.min(skills.len()));
                (skills, missing)
            }
        }
    }
}

/// Negative scores floor to 0. Scores above 1.0 produce percentages above 100,
/// matching what the backend currently sends through unchecked.
fn percentage(score: Option<f64>) -> u32 {
    match score {
        Some(value) => (value * 100.0).round().max(0.0) as u32,
        None => 0,
    }
}

fn or_literal(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Truncate to 300 chars with a trailing ellipsis only when the source text
/// is longer than that.
fn describe(summary: Option<&str>) -> String {
    match summary {
        Some(text) if !text.trim().is_empty() => {
            if text.chars().count() > DESCRIPTION_LIMIT {
                let mut cut: String = text.chars().take(DESCRIPTION_LIMIT).collect();
                cut.push_str("...");
                cut
            } else {
                text.to_string()
            }
        }
        _ => NO_DESCRIPTION.to_string(),
    }
}

fn summarize(jobs: &[JobRecord]) -> Option<OverallSummary> {
    if jobs.is_empty() {
        return None;
    }

    let total: u64 = jobs.iter().map(|job| u64::from(job.match_percentage)).sum();
    let average = (total as f64 / jobs.len() as f64).round() as u32;

    // Frequency table over matching skills, first-seen order for ties.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<&str> = Vec::new();
    for skill in jobs.iter().flat_map(|job| &job.matching_skills) {
        if skill.trim().is_empty() {
            continue;
        }
        if !counts.contains_key(skill.as_str()) {
            ranked.push(skill.as_str());
        }
        *counts.entry(skill.as_str()).or_insert(0) += 1;
    }
    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked.truncate(TOP_SKILL_COUNT);

    let message = format!(
        "Found {} job matches with an average match score of {}%. \
         These positions align well with your skills and experience.",
        jobs.len(),
        average
    );

    Some(OverallSummary {
        message,
        top_skills_in_demand: ranked.into_iter().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalizer() -> Normalizer {
        Normalizer::new(SkillSplit::Truncate)
    }

    #[test]
    fn test_entry_count_is_preserved() {
        let payload = json!({"entries": [
            {"id": "1", "fields": {"job_title": "A"}},
            {"fields": {"job_title": "B"}},
            {"broken": true},
        ]});
        let results = normalizer().normalize_value(&payload);
        assert_eq!(results.jobs.len(), 3);
    }

    #[test]
    fn test_missing_and_non_array_entries_degrade() {
        for payload in [json!({}), json!({"entries": "not-an-array"})] {
            let results = normalizer().normalize_value(&payload);
            assert!(results.jobs.is_empty());
            assert!(results.overall_summary.is_none());
        }
    }

    #[test]
    fn test_empty_entry_list_has_no_summary() {
        let results = normalizer().normalize_value(&json!({"entries": []}));
        assert!(results.jobs.is_empty());
        assert!(results.overall_summary.is_none());
    }

    #[test]
    fn test_example_scenario() {
        let payload = json!({"entries": [{
            "id": "1",
            "fields": {"job_title": "Engineer", "job_skills": "Go,Rust,SQL"},
            "metadata": {"score": 0.8}
        }]});
        let results = normalizer().normalize_value(&payload);
        let job = &results.jobs[0];
        assert_eq!(job.match_percentage, 80);
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.matching_skills, vec!["Go", "Rust", "SQL"]);
        assert!(job.missing_skills.is_empty());
    }

    #[test]
    fn test_proportional_split() {
        let payload = json!({"entries": [{
            "fields": {"job_skills": ["A", "B", "C", "D"]},
            "metadata": {"score": 0.5}
        }]});
        let results = Normalizer::new(SkillSplit::Proportional).normalize_value(&payload);
        let job = &results.jobs[0];
        assert_eq!(job.matching_skills, vec!["A", "B"]);
        assert_eq!(job.missing_skills, vec!["C", "D"]);
    }

    #[test]
    fn test_truncate_caps_at_ten_skills() {
        let skills: Vec<String> = (0..15).map(|i| format!("skill{}", i)).collect();
        let payload = json!({"entries": [{"fields": {"job_skills": skills}}]});
        let results = normalizer().normalize_value(&payload);
        assert_eq!(results.jobs[0].matching_skills.len(), 10);
    }

    #[test]
    fn test_fallback_literals() {
        let results = normalizer().normalize_value(&json!({"entries": [{}]}));
        let job = &results.jobs[0];
        assert_eq!(job.id, "job-0");
        assert_eq!(job.title, "No Title");
        assert_eq!(job.company, "Unknown Company");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.salary, "Not Specified");
        assert_eq!(job.description, "No description available");
        assert_eq!(job.job_type, "Full-time");
        assert_eq!(job.job_level, "Not Specified");
        assert_eq!(job.job_category, "General");
        assert_eq!(job.match_percentage, 0);
        assert!(job.job_link.is_none());
    }

    #[test]
    fn test_generated_ids_are_unique_per_pass() {
        let payload = json!({"entries": [{}, {}, {"id": "x"}, {}]});
        let results = normalizer().normalize_value(&payload);
        let ids: Vec<&str> = results.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["job-0", "job-1", "x", "job-3"]);
    }

    #[test]
    fn test_description_truncation_boundary() {
        let exact = "x".repeat(300);
        let longer = "y".repeat(301);
        let payload = json!({"entries": [
            {"fields": {"job_summary": exact}},
            {"fields": {"job_summary": longer}},
        ]});
        let results = normalizer().normalize_value(&payload);
        assert_eq!(results.jobs[0].description.chars().count(), 300);
        assert!(!results.jobs[0].description.ends_with("..."));
        assert_eq!(results.jobs[1].description.chars().count(), 303);
        assert!(results.jobs[1].description.ends_with("..."));
    }

    #[test]
    fn test_negative_score_floors_to_zero() {
        let payload = json!({"entries": [{"metadata": {"score": -0.3}}]});
        let results = normalizer().normalize_value(&payload);
        assert_eq!(results.jobs[0].match_percentage, 0);
    }

    #[test]
    fn test_score_above_one_is_not_capped() {
        let payload = json!({"entries": [{"metadata": {"score": 1.2}}]});
        let results = normalizer().normalize_value(&payload);
        assert_eq!(results.jobs[0].match_percentage, 120);
    }

    #[test]
    fn test_summary_average_and_message() {
        let payload = json!({"entries": [
            {"metadata": {"score": 0.8}},
            {"metadata": {"score": 0.6}},
        ]});
        let results = normalizer().normalize_value(&payload);
        let summary = results.overall_summary.unwrap();
        assert!(summary.message.contains("Found 2 job matches"));
        assert!(summary.message.contains("70%"));
    }

    #[test]
    fn test_top_skills_rank_by_frequency() {
        let payload = json!({"entries": [
            {"fields": {"job_skills": ["SQL", "Go"]}},
            {"fields": {"job_skills": ["SQL", "Python"]}},
        ]});
        let results = normalizer().normalize_value(&payload);
        let summary = results.overall_summary.unwrap();
        assert_eq!(summary.top_skills_in_demand[0], "SQL");
        // Ties keep first-seen order.
        assert_eq!(summary.top_skills_in_demand[1], "Go");
        assert_eq!(summary.top_skills_in_demand[2], "Python");
    }

    #[test]
    fn test_top_skills_capped_at_eight() {
        let skills: Vec<String> = (0..12).map(|i| format!("s{}", i)).collect();
        let payload = json!({"entries": [{"fields": {"job_skills": skills}}]});
        // Truncate keeps ten matching skills, the summary caps at eight.
        let results = normalizer().normalize_value(&payload);
        let summary = results.overall_summary.unwrap();
        assert_eq!(summary.top_skills_in_demand.len(), 8);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let payload = json!({"entries": [
            {"id": "1", "fields": {"job_title": "A", "job_skills": "Go,Rust"},
             "metadata": {"score": 0.9}},
            {"fields": {"job_title": "B"}},
        ]});
        let first = normalizer().normalize_value(&payload);
        let second = normalizer().normalize_value(&payload);
        assert_eq!(first, second);
    }
}
