use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::generator::{GenerateCredential, GeneratedCredential, GenerationError};

/// Generation primitive adapter: asks the sidecar process that embeds the
/// platform SDK to mint a fresh credential.
///
/// The sidecar answers `{"visitorData": ..., "poToken": ...}`; absent fields
/// are treated as present-but-empty, matching the SDK's own behavior.
#[derive(Debug, Clone)]
pub struct UpstreamGenerator {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamResponse {
    #[serde(default)]
    visitor_data: String,
    #[serde(default)]
    po_token: String,
}

impl UpstreamGenerator {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

impl GenerateCredential for UpstreamGenerator {
    async fn generate(&self) -> Result<GeneratedCredential, GenerationError> {
        debug!("requesting credential from upstream generator at {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .send()
            .await
            .map_err(|err| GenerationError::Upstream(err.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::Upstream(format!(
                "upstream generator answered {}",
                response.status()
            )));
        }

        let body: UpstreamResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Upstream(err.to_string()))?;

        Ok(GeneratedCredential {
            visitor_data: body.visitor_data,
            po_token: body.po_token,
        })
    }
}
