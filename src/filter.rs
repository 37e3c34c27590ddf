// src/filter.rs
//! Facet filtering and ranking over normalized job lists.
//!
//! Active facets combine as a conjunction. Location matches by substring
//! containment for better recall; the other three facets match exactly.

use std::collections::BTreeSet;

use crate::types::job::JobRecord;

/// User-selected filter values, one set per facet. A facet constrains the
/// result only while its set is non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub locations: BTreeSet<String>,
    pub job_types: BTreeSet<String>,
    pub job_levels: BTreeSet<String>,
    pub job_categories: BTreeSet<String>,
}

impl FilterState {
    /// Total number of selected values across all facets.
    pub fn active_count(&self) -> usize {
        self.locations.len()
            + self.job_types.len()
            + self.job_levels.len()
            + self.job_categories.len()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, job: &JobRecord) -> bool {
        if !self.locations.is_empty()
            && !self
                .locations
                .iter()
                .any(|selected| job.location.contains(selected.as_str()))
        {
            return false;
        }
        if !self.job_types.is_empty() && !self.job_types.contains(&job.job_type) {
            return false;
        }
        if !self.job_levels.is_empty() && !self.job_levels.contains(&job.job_level) {
            return false;
        }
        if !self.job_categories.is_empty() && !self.job_categories.contains(&job.job_category) {
            return false;
        }
        true
    }
}

/// Apply the active facets and rank by match score, best first. The sort is
/// stable, so ties keep their input order.
pub fn apply(jobs: &[JobRecord], filters: &FilterState) -> Vec<JobRecord> {
    let mut kept: Vec<JobRecord> = jobs
        .iter()
        .filter(|job| filters.matches(job))
        .cloned()
        .collect();
    kept.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    kept
}

/// Selectable values per facet: distinct, non-empty, sorted lexicographically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetOptions {
    pub locations: Vec<String>,
    pub job_types: Vec<String>,
    pub job_levels: Vec<String>,
    pub job_categories: Vec<String>,
}

pub fn facet_options(jobs: &[JobRecord]) -> FacetOptions {
    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let set: BTreeSet<&str> = values.filter(|value| !value.trim().is_empty()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    FacetOptions {
        locations: distinct(jobs.iter().map(|job| job.location.as_str())),
        job_types: distinct(jobs.iter().map(|job| job.job_type.as_str())),
        job_levels: distinct(jobs.iter().map(|job| job.job_level.as_str())),
        job_categories: distinct(jobs.iter().map(|job| job.job_category.as_str())),
    }
}

/// Statistics over the currently visible (filtered) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub jobs_found: usize,
    pub average_match: u32,
}

pub fn stats(filtered: &[JobRecord]) -> FilterStats {
    let average_match = if filtered.is_empty() {
        0
    } else {
        let total: u64 = filtered
            .iter()
            .map(|job| u64::from(job.match_percentage))
            .sum();
        (total as f64 / filtered.len() as f64).round() as u32
    };
    FilterStats {
        jobs_found: filtered.len(),
        average_match,
    }
}
