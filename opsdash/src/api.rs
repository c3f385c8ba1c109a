//! Typed HTTP client for the backend metrics/log/task API.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::types::{
    CpuMetrics, CreateTask, DiskIoMetrics, DiskMetrics, Health, LogEntry, MemMetrics, NetMetrics,
    Task,
};

/// Everything a backend call can fail with. `Validation` never reaches the
/// network; it is raised locally before a request is built.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status} {status_text}: {body}")]
    Request {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("validation: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// Explicitly constructed client value; callers receive a clone instead of
/// reading ambient globals, which keeps fakes injectable in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(base: Url, api_key: Option<String>) -> Self {
        // No request timeout; polling retries on the next tick. Connect time
        // is capped so a dead host settles as an error instead of leaving a
        // subscription loading forever.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base,
            api_key,
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Network(format!("bad url {path}: {e}")))
    }

    // Attach the credential header, send, and map the response. 204 resolves
    // to None rather than attempting to decode an empty body.
    async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let req = match &self.api_key {
            Some(key) => req.header("X-API-Key", key),
            None => req,
        };
        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "backend request failed");
            return Err(ApiError::Request {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(res.json::<T>().await?))
    }

    // GET returning a required body. The backend always sends one on 2xx for
    // these endpoints; an unexpected 204 is reported as a transport problem.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let req = self.http.get(url).query(query);
        self.execute(req)
            .await?
            .ok_or_else(|| ApiError::Network(format!("empty response from {path}")))
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get("/api/health", &[]).await
    }

    pub async fn cpu(&self, range: &str) -> Result<CpuMetrics, ApiError> {
        self.get("/api/metrics/cpu", &[("range", range)]).await
    }

    pub async fn mem(&self, range: &str) -> Result<MemMetrics, ApiError> {
        self.get("/api/metrics/mem", &[("range", range)]).await
    }

    pub async fn disk(&self, range: &str) -> Result<DiskMetrics, ApiError> {
        self.get("/api/metrics/disk", &[("range", range)]).await
    }

    pub async fn diskio(&self, range: &str) -> Result<DiskIoMetrics, ApiError> {
        self.get("/api/metrics/diskio", &[("range", range)]).await
    }

    pub async fn net(&self, range: &str) -> Result<NetMetrics, ApiError> {
        self.get("/api/metrics/net", &[("range", range)]).await
    }

    pub async fn logs(&self, q: &str) -> Result<Vec<LogEntry>, ApiError> {
        let url = self.url("/api/logs")?;
        let req = if q.is_empty() {
            self.http.get(url)
        } else {
            self.http.get(url).query(&[("q", q)])
        };
        // A bodyless reply reads as an empty list.
        Ok(self.execute(req).await?.unwrap_or_default())
    }

    pub async fn tasks(&self) -> Result<Vec<Task>, ApiError> {
        let url = self.url("/api/tasks")?;
        Ok(self.execute(self.http.get(url)).await?.unwrap_or_default())
    }

    pub async fn create_task(&self, name: &str, every_minutes: u32) -> Result<Task, ApiError> {
        let url = self.url("/api/tasks")?;
        let body = CreateTask {
            name: name.to_string(),
            every_minutes,
        };
        // reqwest sets Content-Type: application/json for us here.
        self.execute(self.http.post(url).json(&body))
            .await?
            .ok_or_else(|| ApiError::Network("empty response from task create".into()))
    }

    pub async fn run_task(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/tasks/{id}/run"))?;
        // Reply is {"status": ...}; the caller reloads the list regardless.
        self.execute::<serde_json::Value>(self.http.post(url))
            .await?;
        Ok(())
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/tasks/{id}"))?;
        self.execute::<serde_json::Value>(self.http.delete(url))
            .await?;
        Ok(())
    }
}
