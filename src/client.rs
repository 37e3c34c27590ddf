// src/client.rs
//! HTTP client for the job-search and CV-analysis backend.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

use crate::environment::ClientSettings;
use crate::simulated;
use crate::types::analysis::AnalysisResponse;
use crate::types::raw::SearchResponse;

const SEARCH_ENDPOINT: &str = "/api/superlinked/search";
const CV_SEARCH_ENDPOINT: &str = "/api/superlinked/search/job";
const ANALYZE_ENDPOINT: &str = "/api/cv-analysis/analyze_linkedin";

const FALLBACK_ERROR: &str = "An error occurred while searching for jobs. Please try again.";

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    use_simulated: bool,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            use_simulated: settings.use_simulated,
        })
    }

    /// Natural-language job search.
    pub async fn search_jobs(&self, natural_query: &str) -> Result<SearchResponse> {
        if self.use_simulated {
            info!("Simulated data enabled, skipping search request");
            return Ok(simulated::search_response());
        }

        let url = format!("{}{}", self.base_url, SEARCH_ENDPOINT);
        let payload = serde_json::json!({ "natural_query": natural_query });

        info!("Calling job search service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach job search service at {}", url))?;

        let body = read_body(response).await?;
        Ok(SearchResponse::from_value(&body))
    }

    /// CV-based job search. A declared failure in the envelope
    /// (`success: false`) becomes an error carrying the backend's message.
    pub async fn search_jobs_by_cv(&self, cv_path: &Path) -> Result<SearchResponse> {
        if self.use_simulated {
            info!("Simulated data enabled, skipping CV search request");
            return Ok(simulated::search_response());
        }

        let url = format!("{}{}", self.base_url, CV_SEARCH_ENDPOINT);
        let form = cv_form(cv_path).await?;

        info!("Calling CV job search service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to reach CV job search service at {}", url))?;

        let body = read_body(response).await?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = body
                .get("error_message")
                .and_then(Value::as_str)
                .unwrap_or("Failed to analyze CV");
            if body.get("is_cv").and_then(Value::as_bool) == Some(false) {
                anyhow::bail!("Invalid CV: {}", message);
            }
            anyhow::bail!("{}", message);
        }

        Ok(SearchResponse::from_value(&body))
    }

    /// CV vs LinkedIn job-posting analysis.
    pub async fn analyze_cv(&self, cv_path: &Path, linkedin_url: &str) -> Result<AnalysisResponse> {
        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);
        let form = cv_form(cv_path)
            .await?
            .text("linkedin_url", linkedin_url.to_string());

        info!("Calling CV analysis service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to reach CV analysis service at {}", url))?;

        let body = read_body(response).await?;
        serde_json::from_value(body).context("Failed to parse CV analysis response")
    }
}

async fn cv_form(cv_path: &Path) -> Result<Form> {
    let file_name = cv_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("cv.pdf")
        .to_string();

    let file_content = tokio::fs::read(cv_path)
        .await
        .with_context(|| format!("Failed to read file: {}", cv_path.display()))?;

    Ok(Form::new().part(
        "cv_file",
        Part::bytes(file_content)
            .file_name(file_name)
            .mime_str("application/pdf")
            .context("Failed to create multipart")?,
    ))
}

/// Turn a non-2xx response into a single user-facing message; parse 2xx
/// bodies as JSON, degrading malformed bodies to null so the normalizer can
/// treat them as empty.
async fn read_body(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await.context("Failed to read response body")?;

    if !status.is_success() {
        warn!("Service returned error status {}: {}", status, text);
        anyhow::bail!("{}", error_message_from(status.as_u16(), &text));
    }

    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Response body is not valid JSON, treating as empty: {}", e);
            Ok(Value::Null)
        }
    }
}

/// Pick the most specific message available from an error payload:
/// `error_message`, then `detail`, then the body with its status, then a
/// fixed fallback sentence.
pub fn error_message_from(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("error_message").and_then(Value::as_str) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            if !detail.is_empty() {
                return detail.to_string();
            }
        }
    }

    if body.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        format!("HTTP {} error: {}", status, body.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_error_message_field() {
        let body = r#"{"error_message": "CV could not be parsed", "detail": "generic"}"#;
        assert_eq!(error_message_from(500, body), "CV could not be parsed");
    }

    #[test]
    fn test_error_message_falls_back_to_detail() {
        let body = r#"{"detail": "Search failed with status code 502"}"#;
        assert_eq!(
            error_message_from(500, body),
            "Search failed with status code 502"
        );
    }

    #[test]
    fn test_error_message_uses_raw_body_with_status() {
        assert_eq!(
            error_message_from(503, "upstream unavailable"),
            "HTTP 503 error: upstream unavailable"
        );
    }

    #[test]
    fn test_error_message_fallback_sentence_on_empty_body() {
        assert_eq!(error_message_from(500, "  "), FALLBACK_ERROR);
    }
}
