//! HTTP transport seam
//!
//! The client only needs one operation from the network: GET a signed URL
//! and hand back status and body. Keeping that behind a trait lets tests
//! script responses and lets embedders bring their own `reqwest::Client`.

use crate::config::ClientConfig;
use crate::error::CaptureError;
use async_trait::async_trait;
use tracing::debug;

/// Raw response as seen by the client, body fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single GET. Connection failures and timeouts come back as
    /// [`CaptureError::Transport`]; any status code is returned as-is.
    async fn get(&self, url: &str) -> Result<HttpResponse, CaptureError>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, CaptureError> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder.build().map_err(|e| {
            CaptureError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self { client })
    }

    /// Wrap an existing client, keeping whatever timeout and proxy settings it carries.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, CaptureError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}
