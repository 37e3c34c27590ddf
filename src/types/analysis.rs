// src/types/analysis.rs
//! Response shapes for the CV vs job-posting analysis endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScore {
    pub value: u32,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "percentage".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub match_score: MatchScore,
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub strong_skills: Vec<String>,
    #[serde(default)]
    pub strong_skills_comment: String,
    #[serde(default)]
    pub skills_to_develop: Vec<String>,
    #[serde(default)]
    pub skills_to_develop_comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    pub analysis_results: AnalysisResults,
    #[serde(default)]
    pub suggested_learning_resources: Vec<LearningResource>,
}

/// Envelope returned by the analysis endpoint. `success: false` is a declared
/// application-level failure, not a transport error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    pub data: Option<AnalysisData>,
    pub error_message: Option<String>,
    pub is_cv: Option<bool>,
}

fn default_true() -> bool {
    true
}

/// Why an analysis submission was rejected by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisFailure {
    /// The uploaded document was not recognized as a CV.
    InvalidCv(String),
    /// The CV was valid but the analysis itself failed.
    Failed(String),
}

impl AnalysisResponse {
    pub fn failure(&self) -> Option<AnalysisFailure> {
        if self.success {
            return None;
        }
        let message = self
            .error_message
            .clone()
            .unwrap_or_else(|| "Failed to analyze CV".to_string());
        if self.is_cv == Some(false) {
            Some(AnalysisFailure::InvalidCv(message))
        } else {
            Some(AnalysisFailure::Failed(message))
        }
    }
}
