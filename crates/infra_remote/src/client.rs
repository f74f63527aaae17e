//! Shared REST client
//!
//! All backend adapters go through one `RestClient`: a pooled
//! `reqwest::Client` carrying the service-key bearer header, plus the
//! HTTP-status-to-`PortError` mapping so every adapter fails the same way.
//!
//! # Error Handling
//!
//! Non-2xx statuses are mapped to `PortError` variants:
//! - 404 -> `PortError::NotFound`
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Other -> `PortError::Internal`

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use core_kernel::{AdapterHealth, HealthCheckResult, PortError};

use crate::config::RemoteConfig;

/// HTTP client for the remote backend
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl RestClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, PortError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|e| PortError::internal(format!("invalid service key: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortError::connection(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a full URL from a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET returning deserialized JSON
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &str,
    ) -> Result<T, PortError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e, operation))?;
        let response = self.check_status(response, operation)?;
        response
            .json()
            .await
            .map_err(|e| PortError::internal(format!("{operation}: malformed response: {e}")))
    }

    /// POST with a JSON body, returning deserialized JSON
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        operation: &str,
    ) -> Result<T, PortError> {
        let response = self
            .http
            .post(self.url(path))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e, operation))?;
        let response = self.check_status(response, operation)?;
        response
            .json()
            .await
            .map_err(|e| PortError::internal(format!("{operation}: malformed response: {e}")))
    }

    /// POST with a JSON body, discarding the response body
    pub async fn post_json_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        operation: &str,
    ) -> Result<(), PortError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e, operation))?;
        self.check_status(response, operation)?;
        Ok(())
    }

    /// POST raw bytes with an explicit content type
    pub async fn post_bytes(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
        operation: &str,
    ) -> Result<(), PortError> {
        let response = self
            .http
            .post(self.url(path))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| self.transport_error(e, operation))?;
        self.check_status(response, operation)?;
        Ok(())
    }

    /// DELETE, discarding the response body
    pub async fn delete(&self, path: &str, operation: &str) -> Result<(), PortError> {
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e, operation))?;
        self.check_status(response, operation)?;
        Ok(())
    }

    /// Health probe against the backend root
    pub async fn probe_health(&self, adapter_id: &str) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = self.http.get(self.url("")).send().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let (status, message) = match outcome {
            Ok(response) if response.status().is_server_error() => (
                AdapterHealth::Unhealthy,
                Some(format!("backend returned {}", response.status())),
            ),
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(error) => (AdapterHealth::Unhealthy, Some(error.to_string())),
        };

        HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status,
            latency_ms,
            message,
            checked_at: chrono::Utc::now(),
        }
    }

    fn check_status(&self, response: Response, operation: &str) -> Result<Response, PortError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        debug!(%status, operation, "backend request failed");
        Err(map_status(status, operation))
    }

    fn transport_error(&self, error: reqwest::Error, operation: &str) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.timeout_secs * 1000,
            }
        } else {
            PortError::Connection {
                message: format!("{operation}: {error}"),
                source: Some(Box::new(error)),
            }
        }
    }
}

/// Maps a non-2xx HTTP status to the shared port error taxonomy
pub fn map_status(status: StatusCode, operation: &str) -> PortError {
    match status {
        StatusCode::NOT_FOUND => PortError::not_found(operation, "remote"),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{operation}: {status}"),
        },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: 60,
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: operation.to_string(),
        },
        s => PortError::internal(format!("{operation}: unexpected status {s}")),
    }
}
