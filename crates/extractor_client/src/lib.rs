//! Client for the external statement-extraction service.
//!
//! The service owns all bank-specific parsing. This crate only relays: it
//! uploads a file plus an extractor name and gets back normalized
//! transactions (ISO date string, signed amount in minor units). It never
//! retries — an extraction failure is surfaced to the caller as-is, and the
//! caller must not have touched any state before calling.

use reqwest::{StatusCode, Url, multipart};
use serde::Deserialize;
use thiserror::Error;

/// Errors from the extraction service, split along the failure taxonomy:
/// the service rejected the input (bad file, unknown extractor), the
/// service itself failed, or it could not be reached at all.
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("invalid extractor base url: {0}")]
    InvalidBaseUrl(String),
    #[error("extraction rejected: {0}")]
    Rejected(String),
    #[error("extraction failed: {0}")]
    Failed(String),
    #[error("extractor service unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),
}

/// One extraction script the service offers.
#[derive(Clone, Debug, Deserialize)]
pub struct ExtractorInfo {
    pub name: String,
    pub description: String,
    pub supported_formats: Vec<String>,
}

/// One transaction as extracted from a bank file.
///
/// `date` stays a string on the wire; the caller decides how to treat rows
/// the service could not date properly.
#[derive(Clone, Debug, Deserialize)]
pub struct ExtractedTransaction {
    #[serde(default)]
    pub date: Option<String>,
    pub title: String,
    /// Minor units (øre); negative = expense.
    pub amount: i64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "isShared")]
    pub is_shared: Option<bool>,
    /// Original row data, kept for reference.
    #[serde(default)]
    pub raw_data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtractorListResponse {
    extractors: Vec<ExtractorInfo>,
}

/// Success body of `POST /extract`; the service's `success`/`message`
/// fields carry no extra information and are ignored.
#[derive(Debug, Deserialize)]
struct ExtractionResponse {
    transactions: Vec<ExtractedTransaction>,
}

/// Error body the service returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: String,
}

fn error_for_status(status: StatusCode, detail: String) -> ExtractorError {
    if status == StatusCode::BAD_REQUEST {
        ExtractorError::Rejected(detail)
    } else {
        ExtractorError::Failed(detail)
    }
}

#[derive(Debug, Clone)]
pub struct ExtractorClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ExtractorClient {
    pub fn new(base_url: &str) -> Result<Self, ExtractorError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ExtractorError::InvalidBaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Lists the extraction scripts the service offers.
    pub async fn list_extractors(&self) -> Result<Vec<ExtractorInfo>, ExtractorError> {
        let endpoint = self
            .base_url
            .join("extractors")
            .map_err(|err| ExtractorError::InvalidBaseUrl(err.to_string()))?;

        let res = self.http.get(endpoint).send().await?;

        if res.status().is_success() {
            let body = res.json::<ExtractorListResponse>().await?;
            return Ok(body.extractors);
        }

        Err(Self::response_error(res).await)
    }

    /// Runs one extractor over an uploaded file and returns the extracted
    /// rows in file order.
    pub async fn extract(
        &self,
        extractor: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Vec<ExtractedTransaction>, ExtractorError> {
        let endpoint = self
            .base_url
            .join("extract")
            .map_err(|err| ExtractorError::InvalidBaseUrl(err.to_string()))?;

        let file = multipart::Part::bytes(content).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .part("file", file)
            .text("extractor", extractor.to_string());

        let res = self.http.post(endpoint).multipart(form).send().await?;

        if res.status().is_success() {
            let body = res.json::<ExtractionResponse>().await?;
            return Ok(body.transactions);
        }

        Err(Self::response_error(res).await)
    }

    async fn response_error(res: reqwest::Response) -> ExtractorError {
        let status = res.status();
        let detail = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.detail)
            .unwrap_or_else(|_| "unknown error".to_string());
        error_for_status(status, detail)
    }
}
