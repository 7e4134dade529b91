//! HTTP client for the script-splitter service.

use crate::error::SynthError;
use crate::metadata::SplitMetadata;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

#[derive(Serialize)]
struct SplitRequest<'a> {
    #[serde(rename = "sourceFile")]
    source_file: &'a str,
}

/// Client for the splitter service's single endpoint.
///
/// One POST per [`SplitClient::split`] call, no retries; the caller
/// decides whether a failed attempt is worth repeating.
#[derive(Debug, Clone)]
pub struct SplitClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl SplitClient {
    /// Create a client for the given endpoint URL.
    ///
    /// The URL must be well-formed HTTP or HTTPS, including the path of
    /// the split endpoint (e.g. `http://127.0.0.1:5000/scriptSplitter`).
    pub fn new(service_url: &str) -> Result<Self, SynthError> {
        let endpoint = Url::parse(service_url).map_err(|e| SynthError::InvalidServiceUrl {
            url: service_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SynthError::InvalidServiceUrl {
                url: service_url.to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    /// Endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one source file identifier to the splitter and return its
    /// metadata. The identifier is opaque to this client; the service is
    /// responsible for resolving it.
    pub async fn split(&self, source_file_id: &str) -> Result<SplitMetadata, SynthError> {
        info!(endpoint = %self.endpoint, source_file = source_file_id, "calling script splitter");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&SplitRequest {
                source_file: source_file_id,
            })
            .send()
            .await
            .map_err(|e| SynthError::ServiceUnavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthError::ServiceRejected {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SynthError::ServiceUnavailable {
                reason: e.to_string(),
            })?;
        let metadata: SplitMetadata =
            serde_json::from_str(&body).map_err(|e| SynthError::MalformedResponse {
                detail: e.to_string(),
            })?;

        debug!(
            pre_start = metadata.pre_start,
            quantum_start = metadata.quantum_start,
            post_start = metadata.post_start,
            conditions = metadata.loop_conditions.len(),
            "splitter metadata received"
        );
        Ok(metadata)
    }
}
