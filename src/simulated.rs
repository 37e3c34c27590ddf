// src/simulated.rs
//! Canned search payload used when the simulated-data toggle is on, so the
//! client can be exercised without a running backend.

use serde_json::{json, Value};

use crate::types::raw::SearchResponse;

pub fn search_response() -> SearchResponse {
    SearchResponse::from_value(&payload())
}

fn payload() -> Value {
    json!({
        "entries": [
            {
                "id": "sim-backend-eng",
                "fields": {
                    "job_title": "Backend Engineer",
                    "company": "Nordwind Labs",
                    "job_location": "Berlin, Germany",
                    "salary": "70k-85k EUR",
                    "job_summary": "Build and operate the matching services behind our recruitment platform. You will own APIs end to end, from design through deployment.",
                    "job_skills": "Rust, PostgreSQL, Docker, Kubernetes, gRPC",
                    "job_type": "Full-time",
                    "job_level": "Senior",
                    "job_category": "Engineering",
                    "job_link": "https://jobs.example.com/nordwind/backend-engineer"
                },
                "metadata": { "score": 0.91 }
            },
            {
                "id": "sim-data-eng",
                "fields": {
                    "job_title": "Data Engineer",
                    "company": "Brightstack",
                    "job_location": "Amsterdam, Netherlands",
                    "salary": "60k-75k EUR",
                    "job_summary": "Design pipelines that feed our analytics products. Heavy use of SQL and orchestration tooling.",
                    "job_skills": ["SQL", "Python", "Airflow", "dbt"],
                    "job_type": "Full-time",
                    "job_level": "Mid",
                    "job_category": "Data",
                    "job_link": "https://jobs.example.com/brightstack/data-engineer"
                },
                "metadata": { "score": 0.78 }
            },
            {
                "id": "sim-platform-eng",
                "fields": {
                    "job_title": "Platform Engineer",
                    "company": "Nordwind Labs",
                    "search_city": "Berlin",
                    "job_summary": "Keep our build and deployment infrastructure fast and boring.",
                    "job_skills": "Kubernetes, Terraform, Go, SQL",
                    "job_type": "Contract",
                    "job_level": "Senior",
                    "job_category": "Engineering",
                    "jobUrl": "https://jobs.example.com/nordwind/platform-engineer"
                },
                "metadata": { "score": 0.64 }
            },
            {
                "id": "sim-ml-intern",
                "fields": {
                    "job_title": "Machine Learning Intern",
                    "company": "Veldt AI",
                    "job_location": "Remote",
                    "job_summary": "Support the research team on ranking experiments.",
                    "job_skills": ["Python", "PyTorch", "SQL"],
                    "job_type": "Internship",
                    "job_level": "Entry",
                    "job_category": "Data"
                },
                "metadata": { "score": 0.42 }
            }
        ]
    })
}
