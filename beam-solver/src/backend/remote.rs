//! Backend that delegates to a beam service over HTTP

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::AnalysisError;
use crate::model::BeamModel;
use crate::results::AnalysisResult;

use super::wire::AnalysisResponse;
use super::AnalysisBackend;

/// Request timeout unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a remote beam analysis service
///
/// Uses a blocking client, so it must not be called from inside an async
/// runtime.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    base_url: String,
    client: Client,
}

impl RemoteBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AnalysisError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AnalysisError> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::BackendUnavailable {
                backend: base_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { base_url, client })
    }

    /// Get the base URL for the client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/api/v1/analyze", self.base_url.trim_end_matches('/'))
    }

    fn transport_error(&self, error: reqwest::Error) -> AnalysisError {
        if error.is_connect() || error.is_timeout() {
            AnalysisError::BackendUnavailable {
                backend: self.base_url.clone(),
                reason: error.to_string(),
            }
        } else {
            AnalysisError::UnknownBackendFailure {
                diagnostic: format!("{:?}", error),
            }
        }
    }
}

impl AnalysisBackend for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    fn analyze(&self, model: &BeamModel) -> Result<AnalysisResult, AnalysisError> {
        let url = self.endpoint();
        log::debug!("Posting beam model to {}", url);

        let response = self
            .client
            .post(&url)
            .json(model)
            .send()
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().map_err(|e| self.transport_error(e))?;

        let decoded: AnalysisResponse =
            serde_json::from_str(&body).map_err(|e| AnalysisError::UnknownBackendFailure {
                diagnostic: format!("HTTP {}: undecodable body ({}): {}", status, e, body),
            })?;

        match decoded {
            AnalysisResponse {
                success: true,
                results: Some(results),
                ..
            } => Ok(results),
            AnalysisResponse {
                error: Some(error), ..
            } => Err(error.into_analysis_error()),
            _ => Err(AnalysisError::UnknownBackendFailure {
                diagnostic: format!("HTTP {}: response carries neither results nor error: {}", status, body),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let backend = RemoteBackend::new("http://localhost:8086/").unwrap();
        assert_eq!(backend.endpoint(), "http://localhost:8086/api/v1/analyze");
        assert_eq!(backend.base_url(), "http://localhost:8086/");
    }
}
