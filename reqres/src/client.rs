use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    domain::{ReqresEnvelope, ReqresUser},
    ReqresURL,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const API_KEY_HEADER: &str = "x-api-key";

/// Read-only client for a reqres-style user directory.
///
/// The client never retries; every request is bounded by the timeout given at
/// construction.
#[derive(Debug, Clone)]
pub struct ReqresClient {
    http: reqwest::Client,
    base_url: ReqresURL,
    api_key: Option<String>,
}

impl ReqresClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ReqresError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReqresError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: ReqresURL::parse(base_url)?,
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &ReqresURL) -> Result<T, ReqresError> {
        let resp = self
            .get(url.as_ref())
            .send()
            .await
            .map_err(|e| ReqresError::ResponseError(e.to_string()))?;

        check_status(url.as_ref(), resp.status())?;

        resp.json::<T>().await.map_err(|e| {
            ReqresError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// Fetch a single user profile by id.
    #[tracing::instrument(name = "reqres.fetch_user", skip(self))]
    pub async fn fetch_user(&self, user_id: &str) -> Result<ReqresUser, ReqresError> {
        let url = self.base_url.user(user_id);

        match self.fetch_json::<ReqresEnvelope<ReqresUser>>(&url).await {
            Ok(envelope) => Ok(envelope.data),
            Err(ReqresError::UnexpectedStatus { status: 404, .. }) => {
                Err(ReqresError::UserNotFound(user_id.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch raw bytes from an arbitrary URL, typically an avatar image.
    #[tracing::instrument(name = "reqres.fetch_bytes", skip(self))]
    pub async fn fetch_bytes(&self, url: &str) -> Result<Bytes, ReqresError> {
        let resp = self
            .get(url)
            .send()
            .await
            .map_err(|e| ReqresError::ResponseError(e.to_string()))?;

        check_status(url, resp.status())?;

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ReqresError::ResponseError(e.to_string()))?;

        tracing::debug!(size = bytes.len(), "downloaded bytes");
        Ok(bytes)
    }
}

fn check_status(url: &str, status: StatusCode) -> Result<(), ReqresError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ReqresError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[derive(Error, Debug)]
pub enum ReqresError {
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
    #[error("InvalidUrl: {0}")]
    InvalidUrl(String),
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}
