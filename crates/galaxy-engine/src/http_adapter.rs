//! Star query service adapters
//!
//! The viewer only sees the `StarQueryService` seam; `HttpStarService` talks
//! to a remote service over HTTP.

use crate::config::ViewerConfig;
use crate::error::{FetchError, FetchResult};

use galaxy_core::{QueryParams, StarQueryResponse};

use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// One request/response exchange against a star query service
pub trait StarQueryService: Send + Sync {
    fn query_stars(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = FetchResult<StarQueryResponse>> + Send;
}

/// HTTP client for `POST {endpoint}/stars`
#[derive(Clone, Debug)]
pub struct HttpStarService {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

impl HttpStarService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ViewerConfig) -> FetchResult<Self> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `GET {endpoint}/health`
    pub async fn health(&self) -> FetchResult<()> {
        let response = self.client.get(self.url("health")).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        let health: HealthResponse = serde_json::from_slice(&bytes)?;
        if health.status == "ok" {
            Ok(())
        } else {
            Err(FetchError::Unavailable(health.status))
        }
    }
}

impl StarQueryService for HttpStarService {
    fn query_stars(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = FetchResult<StarQueryResponse>> + Send {
        let request = self.client.post(self.url("stars")).json(&params);

        async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(FetchError::Status { status: status.as_u16(), body });
            }

            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let service =
            HttpStarService::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url(), "http://localhost:8000");
        assert_eq!(service.url("stars"), "http://localhost:8000/stars");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) on loopback refuses connections on test machines
        let service = HttpStarService::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = service.query_stars(QueryParams::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    }
}
