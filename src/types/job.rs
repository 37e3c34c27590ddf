// src/types/job.rs
use serde::Serialize;

/// Canonical job record produced by normalization. Fallback literals replace
/// missing source fields, so every attribute is directly displayable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    /// Rounded score x 100. Floored at 0; deliberately not capped above 100
    /// when the backend reports a score over 1.0.
    pub match_percentage: u32,
    pub job_type: String,
    pub job_level: String,
    pub job_category: String,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub job_link: Option<String>,
}

/// Aggregate over one normalization pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    pub message: String,
    /// Most frequent matching skills, at most eight, count-descending with
    /// first-seen tie-break.
    pub top_skills_in_demand: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedResults {
    pub jobs: Vec<JobRecord>,
    /// None when the pass produced no jobs.
    pub overall_summary: Option<OverallSummary>,
}
