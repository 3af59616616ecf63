use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use std::env;

/// Client for the hosted PDF-extraction service that turns an uploaded YO
/// lab report into structured metric fields.
#[derive(Clone)]
pub struct ExtractionClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Success,
    Error,
}

#[derive(Debug, Deserialize)]
pub struct ExtractionResponse {
    pub status: ExtractionStatus,
    #[serde(default)]
    pub output: Option<ExtractedMetrics>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtractedMetrics {
    pub concentration: Option<f64>,
    pub motility: Option<f64>,
    pub progressive_motility: Option<f64>,
    pub motile_sperm_concentration: Option<f64>,
    pub progressive_motile_sperm_concentration: Option<f64>,
    pub morphology: Option<f64>,
    pub volume: Option<f64>,
}

impl ExtractionClient {
    pub fn from_env() -> Result<Self> {
        let endpoint =
            env::var("EXTRACTION_API_URL").context("EXTRACTION_API_URL must be set")?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub async fn extract_lab_report(&self, file_url: &str) -> Result<ExtractionResponse> {
        let body = json!({
            "file_url": file_url,
            "json_schema": {
                "type": "object",
                "properties": {
                    "concentration": { "type": "number" },
                    "motility": { "type": "number" },
                    "progressive_motility": { "type": "number" },
                    "motile_sperm_concentration": { "type": "number" },
                    "progressive_motile_sperm_concentration": { "type": "number" },
                    "morphology": { "type": "number" },
                    "volume": { "type": "number" },
                },
            },
        });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("extraction service unreachable")?
            .error_for_status()
            .context("extraction service rejected the request")?;

        response
            .json::<ExtractionResponse>()
            .await
            .context("malformed extraction response")
    }
}
