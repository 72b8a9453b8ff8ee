//! Remote persistence for the configuration document.
//!
//! One GET endpoint to restore from, one POST endpoint to save to. The
//! store reports outcomes; turning them into user feedback is the
//! session's job.

pub mod decode;

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::Endpoints;
use decode::{Normalized, ResponseBody};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a load produced no document.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure.
    Transport(reqwest::Error),
    /// Non-success status from the load endpoint.
    Status(u16),
    /// The body could not be decoded into a document.
    Malformed(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "load request failed: {}", err),
            Self::Status(code) => write!(f, "load endpoint answered with status {}", code),
            Self::Malformed(err) => write!(f, "load response was not valid JSON: {}", err),
        }
    }
}

/// Why a save did not go through.
#[derive(Debug)]
pub enum StoreError {
    /// Network-level failure.
    Transport(reqwest::Error),
    /// Non-success status from the save endpoint.
    Status(u16),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "save request failed: {}", err),
            Self::Status(code) => write!(f, "save endpoint answered with status {}", code),
        }
    }
}

/// Result of a load round trip.
#[derive(Debug)]
pub enum FetchOutcome {
    /// No load endpoint is configured; loading is a no-op.
    NotConfigured,
    /// A usable document came back.
    Document(Value),
    /// The endpoint answered but had no content to offer.
    Empty,
    /// The round trip failed; the caller substitutes the fallback document.
    Failed(FetchError),
}

/// HTTP client for the endpoint pair.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    endpoints: Endpoints,
}

impl RemoteStore {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, endpoints })
    }

    /// GET the remote document.
    ///
    /// Never returns an error to propagate: every failure mode is a
    /// legitimate outcome of the load path.
    pub async fn fetch(&self) -> FetchOutcome {
        let Some(url) = self.endpoints.load_url.clone() else {
            return FetchOutcome::NotConfigured;
        };
        match self.try_fetch(url).await {
            Ok(normalized) => match normalized {
                Normalized::Document(doc) => FetchOutcome::Document(doc),
                Normalized::Empty => FetchOutcome::Empty,
            },
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    async fn try_fetch(&self, url: Url) -> Result<Normalized, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await.map_err(FetchError::Transport)?;

        let body: ResponseBody = decode::classify(content_type.as_deref(), text);
        decode::normalize(body).map_err(FetchError::Malformed)
    }

    /// POST the document to the save endpoint.
    pub async fn store(&self, document: &Value) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.endpoints.save_url.clone())
            .json(document)
            .send()
            .await
            .map_err(StoreError::Transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::Status(status.as_u16()))
        }
    }
}
