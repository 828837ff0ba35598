use qaktus_core::SignupReceipt;
use qaktus_logging::{qaktus_debug, qaktus_warn};
use serde::Serialize;

use crate::types::{build_client, map_reqwest_error, parse_endpoint};
use crate::{ClientSettings, EngineError, FailureKind, RequestError};

#[async_trait::async_trait]
pub trait WaitlistClient: Send + Sync {
    async fn join(&self, email: &str) -> Result<SignupReceipt, RequestError>;
}

/// Maps the collaborator's status code to an outcome. A conflict means the
/// address is already listed, which counts as a successful signup.
pub fn classify_signup_status(status: u16) -> Result<SignupReceipt, FailureKind> {
    match status {
        201 => Ok(SignupReceipt::Created),
        409 => Ok(SignupReceipt::AlreadyListed),
        other => Err(FailureKind::HttpStatus(other)),
    }
}

#[derive(Debug, Serialize)]
struct JoinRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestWaitlistClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ReqwestWaitlistClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, EngineError> {
        Ok(Self {
            client: build_client(settings)?,
            endpoint: settings.waitlist_endpoint.clone(),
        })
    }
}

#[async_trait::async_trait]
impl WaitlistClient for ReqwestWaitlistClient {
    async fn join(&self, email: &str) -> Result<SignupReceipt, RequestError> {
        let endpoint = parse_endpoint(&self.endpoint)?;
        qaktus_debug!("POST {} for waitlist signup", endpoint);

        let response = self
            .client
            .post(endpoint)
            .json(&JoinRequest {
                email: email.trim(),
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        classify_signup_status(status.as_u16()).map_err(|kind| {
            qaktus_warn!("Waitlist signup answered {}", status);
            RequestError::new(kind, status.to_string())
        })
    }
}
