// src/cli.rs
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::client::ApiClient;
use crate::environment::ClientSettings;
use crate::filter::{self, FilterState};
use crate::normalize::{Normalizer, SkillSplit};
use crate::session::SearchSession;
use crate::types::analysis::{AnalysisFailure, AnalysisResponse};
use crate::types::job::NormalizedResults;

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Job search and CV matching assistant")]
pub struct JobScoutCli {
    #[command(subcommand)]
    pub command: JobScoutCommand,
}

#[derive(Subcommand)]
pub enum JobScoutCommand {
    /// Search jobs with a natural-language query
    Search {
        query: String,
        #[command(flatten)]
        facets: FacetArgs,
        /// Show at most this many results
        #[arg(long, default_value_t = 25)]
        top: usize,
    },
    /// Find jobs matching an uploaded CV
    MatchCv {
        cv_file: PathBuf,
        #[command(flatten)]
        facets: FacetArgs,
        #[arg(long, default_value_t = 25)]
        top: usize,
    },
    /// Compare a CV against a LinkedIn job posting
    Analyze {
        cv_file: PathBuf,
        /// LinkedIn job posting URL
        #[arg(long)]
        job_url: String,
    },
}

/// Filter facets shared by the search commands. All flags are repeatable.
#[derive(Args)]
pub struct FacetArgs {
    /// Keep only jobs whose location contains this value
    #[arg(long = "location")]
    pub locations: Vec<String>,
    /// Keep only jobs with exactly this job type
    #[arg(long = "job-type")]
    pub job_types: Vec<String>,
    /// Keep only jobs with exactly this job level
    #[arg(long = "job-level")]
    pub job_levels: Vec<String>,
    /// Keep only jobs with exactly this job category
    #[arg(long = "category")]
    pub job_categories: Vec<String>,
}

impl FacetArgs {
    fn into_filter_state(self) -> FilterState {
        FilterState {
            locations: self.locations.into_iter().collect(),
            job_types: self.job_types.into_iter().collect(),
            job_levels: self.job_levels.into_iter().collect(),
            job_categories: self.job_categories.into_iter().collect(),
        }
    }
}

pub async fn run(cli: JobScoutCli) -> Result<()> {
    let settings = ClientSettings::load()?;
    let client = ApiClient::new(&settings)?;
    let normalizer = Normalizer::new(SkillSplit::default());
    let session = SearchSession::new();

    match cli.command {
        JobScoutCommand::Search { query, facets, top } => {
            let generation = session.begin();
            let response = client.search_jobs(&query).await?;
            if let Some(results) = session.accept(generation, normalizer.normalize(&response)) {
                render_results(&results, &facets.into_filter_state(), top);
            }
        }
        JobScoutCommand::MatchCv {
            cv_file,
            facets,
            top,
        } => {
            let generation = session.begin();
            let response = client.search_jobs_by_cv(&cv_file).await?;
            if let Some(results) = session.accept(generation, normalizer.normalize(&response)) {
                render_results(&results, &facets.into_filter_state(), top);
            }
        }
        JobScoutCommand::Analyze { cv_file, job_url } => {
            let report = client.analyze_cv(&cv_file, &job_url).await?;
            render_analysis(&report)?;
        }
    }

    Ok(())
}

fn render_results(results: &NormalizedResults, filters: &FilterState, top: usize) {
    let visible = filter::apply(&results.jobs, filters);
    let stats = filter::stats(&visible);

    if filters.active_count() > 0 {
        println!(
            "Found {} jobs ({} after {} active filter values), average match {}%",
            results.jobs.len(),
            stats.jobs_found,
            filters.active_count(),
            stats.average_match
        );
    } else {
        println!(
            "Found {} jobs, average match {}%",
            stats.jobs_found, stats.average_match
        );
    }

    if visible.is_empty() {
        println!(
            "No jobs match the selected filters. Clear filters to see all {} results.",
            results.jobs.len()
        );
        return;
    }

    for job in visible.iter().take(top) {
        println!();
        println!("[{:>3}%] {} at {}", job.match_percentage, job.title, job.company);
        println!(
            "       {} | {} | {} | {}",
            job.location, job.job_type, job.job_level, job.salary
        );
        if !job.matching_skills.is_empty() {
            println!("       Skills: {}", job.matching_skills.join(", "));
        }
        if let Some(link) = &job.job_link {
            println!("       {}", link);
        }
    }

    if let Some(summary) = &results.overall_summary {
        println!();
        println!("{}", summary.message);
        if !summary.top_skills_in_demand.is_empty() {
            println!(
                "Top skills in demand: {}",
                summary.top_skills_in_demand.join(", ")
            );
        }
    }

    if filters.active_count() == 0 {
        let options = filter::facet_options(&results.jobs);
        println!();
        println!("Refine with --location, --job-type, --job-level, --category:");
        if !options.locations.is_empty() {
            println!("  Locations:  {}", options.locations.join(", "));
        }
        if !options.job_types.is_empty() {
            println!("  Job types:  {}", options.job_types.join(", "));
        }
        if !options.job_levels.is_empty() {
            println!("  Job levels: {}", options.job_levels.join(", "));
        }
        if !options.job_categories.is_empty() {
            println!("  Categories: {}", options.job_categories.join(", "));
        }
    }
}

fn render_analysis(report: &AnalysisResponse) -> Result<()> {
    if let Some(failure) = report.failure() {
        match failure {
            AnalysisFailure::InvalidCv(message) => anyhow::bail!("Invalid CV: {}", message),
            AnalysisFailure::Failed(message) => anyhow::bail!("Analysis failed: {}", message),
        }
    }

    let Some(data) = &report.data else {
        anyhow::bail!("Analysis response contained no data");
    };

    let results = &data.analysis_results;
    println!("Match score: {}%", results.match_score.value);
    if !results.target_role.is_empty() {
        println!("Target role: {}", results.target_role);
    }
    if !results.strong_skills.is_empty() {
        println!();
        println!("Strong skills: {}", results.strong_skills.join(", "));
        if !results.strong_skills_comment.is_empty() {
            println!("  {}", results.strong_skills_comment);
        }
    }
    if !results.skills_to_develop.is_empty() {
        println!();
        println!("Skills to develop: {}", results.skills_to_develop.join(", "));
        if !results.skills_to_develop_comment.is_empty() {
            println!("  {}", results.skills_to_develop_comment);
        }
    }
    if !data.suggested_learning_resources.is_empty() {
        println!();
        println!("Suggested learning resources:");
        for resource in &data.suggested_learning_resources {
            if resource.category.is_empty() {
                println!("  - {}", resource.title);
            } else {
                println!("  - {} ({})", resource.title, resource.category);
            }
            if !resource.link.is_empty() {
                println!("    {}", resource.link);
            }
        }
    }

    Ok(())
}
