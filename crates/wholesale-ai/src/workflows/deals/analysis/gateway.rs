use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{AnalysisRequest, RemoteAnalysisError};
use crate::config::AnalysisConfig;

/// Transport to the remote analysis function. Returns the raw response body; decoding
/// is the resolver's job because the expected shape depends on the requested kind.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn invoke(&self, request: &AnalysisRequest) -> Result<String, RemoteAnalysisError>;
}

/// HTTP client for the hosted analysis function.
#[derive(Debug, Clone)]
pub struct HttpAnalysisGateway {
    client: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl HttpAnalysisGateway {
    pub fn new(config: &AnalysisConfig) -> Result<Self, RemoteAnalysisError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| RemoteAnalysisError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

#[async_trait]
impl AnalysisGateway for HttpAnalysisGateway {
    async fn invoke(&self, request: &AnalysisRequest) -> Result<String, RemoteAnalysisError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(RemoteAnalysisError::NotConfigured)?;

        debug!(kind = %request.analysis_type, %endpoint, "requesting remote analysis");

        let mut builder = self.client.post(endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| RemoteAnalysisError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RemoteAnalysisError::Transport(err.to_string()))?;

        debug!(kind = %request.analysis_type, %status, "remote analysis responded");

        if !status.is_success() {
            return Err(RemoteAnalysisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
