//! Client for the spreadsheet web app that acts as the system of record.
//!
//! The store exposes a single URL: POST appends a submission row, GET
//! returns every stored row.

use crate::models::SheetRecord;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("Sheet store API error: {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Clone)]
pub struct SheetStoreClient {
    client: Client,
    api_url: String,
}

impl SheetStoreClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Forward one submission payload verbatim and return the store's JSON
    /// reply. The payload shape is owned by the clients, not validated here.
    pub async fn append(&self, submission: &Value) -> Result<Value, StoreError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(submission)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    /// Load every stored submission row.
    pub async fn fetch_records(&self) -> Result<Vec<SheetRecord>, StoreError> {
        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }
}
