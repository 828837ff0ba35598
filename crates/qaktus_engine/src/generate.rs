use qaktus_core::LinkTarget;
use qaktus_logging::{qaktus_debug, qaktus_warn};
use serde::{Deserialize, Serialize};

use crate::types::{build_client, map_reqwest_error, parse_endpoint};
use crate::{ClientSettings, EngineError, FailureKind, RequestError};

#[async_trait::async_trait]
pub trait LinkGenerator: Send + Sync {
    /// Registers the destinations and returns the short code.
    async fn generate(&self, targets: &[LinkTarget]) -> Result<String, RequestError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    urls: &'a [LinkTarget],
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    short_code: Option<String>,
    short_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestLinkGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl ReqwestLinkGenerator {
    pub fn new(settings: &ClientSettings) -> Result<Self, EngineError> {
        Ok(Self {
            client: build_client(settings)?,
            endpoint: settings.generate_endpoint.clone(),
        })
    }
}

#[async_trait::async_trait]
impl LinkGenerator for ReqwestLinkGenerator {
    async fn generate(&self, targets: &[LinkTarget]) -> Result<String, RequestError> {
        let endpoint = parse_endpoint(&self.endpoint)?;
        qaktus_debug!("POST {} with {} target(s)", endpoint, targets.len());

        let response = self
            .client
            .post(endpoint)
            .json(&GenerateRequest { urls: targets })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            qaktus_warn!("Link generation answered {}", status);
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let reply: GenerateReply = serde_json::from_slice(&body)
            .map_err(|err| RequestError::new(FailureKind::MalformedBody, err.to_string()))?;
        short_code_from(reply)
    }
}

fn short_code_from(reply: GenerateReply) -> Result<String, RequestError> {
    if let Some(code) = reply.short_code.filter(|code| !code.trim().is_empty()) {
        return Ok(code.trim().to_string());
    }
    reply
        .short_url
        .as_deref()
        .and_then(last_path_segment)
        .ok_or_else(|| RequestError::new(FailureKind::MalformedBody, "response has no short code"))
}

fn last_path_segment(short_url: &str) -> Option<String> {
    let url = url::Url::parse(short_url).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}
