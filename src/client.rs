//! Signed URL construction and request dispatch
//!
//! A `CaptureClient` is immutable once built. Every call copies the caller's
//! options, injects the target URL, serializes, signs and formats a fresh URL,
//! so a single client can be shared across tasks without locking.

use crate::config::{ClientConfig, Credentials};
use crate::error::CaptureError;
use crate::metrics::{outcome_label, record_dispatch};
use crate::options::Options;
use crate::query::{canonical_query, URL_KEY};
use crate::token::derive_token;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{ContentResponse, MetadataResponse, RequestKind};
use crate::utils::{format_bytes, format_duration};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Client for the capture service
///
/// # Examples
///
/// ```rust
/// use capture_tool::{CaptureClient, Options};
///
/// let client = CaptureClient::new("my_key", "my_secret").unwrap();
/// let url = client
///     .build_image_url("https://example.com", &Options::new().with("vw", 1280))
///     .unwrap();
/// assert!(url.starts_with("https://cdn.capture.page/my_key/"));
/// assert!(url.ends_with("/image?url=https%3A%2F%2Fexample.com&vw=1280"));
/// ```
#[derive(Clone)]
pub struct CaptureClient {
    credentials: Credentials,
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl CaptureClient {
    /// Client against the standard host with default settings.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, CaptureError> {
        Self::with_config(Credentials::new(key, secret), ClientConfig::default())
    }

    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, CaptureError> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self {
            credentials,
            config,
            transport,
        })
    }

    /// Route requests through the edge host.
    pub fn edge(mut self) -> Self {
        self.config.use_edge = true;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn key(&self) -> &str {
        &self.credentials.key
    }

    /// Build the signed URL for `kind`.
    ///
    /// Fails with [`CaptureError::MissingCredential`] when the key or secret
    /// is empty and with [`CaptureError::MissingTargetUrl`] when `target_url`
    /// is empty. The caller's options are left untouched.
    pub fn build_url(
        &self,
        kind: RequestKind,
        target_url: &str,
        options: &Options,
    ) -> Result<String, CaptureError> {
        if self.credentials.key.is_empty() {
            return Err(CaptureError::MissingCredential("api key"));
        }
        if self.credentials.secret.is_empty() {
            return Err(CaptureError::MissingCredential("api secret"));
        }
        if target_url.is_empty() {
            return Err(CaptureError::MissingTargetUrl);
        }

        let mut request_options = options.clone();
        request_options.set(URL_KEY, target_url);

        let query = canonical_query(&request_options);
        let token = derive_token(&self.credentials.secret, &query);

        let mut url = format!(
            "{}/{}/{}/{}",
            self.config.base_url(),
            self.credentials.key,
            token,
            kind
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        debug!(%kind, target = target_url, edge = self.config.use_edge, "built signed url");
        Ok(url)
    }

    pub fn build_image_url(&self, target_url: &str, options: &Options) -> Result<String, CaptureError> {
        self.build_url(RequestKind::Image, target_url, options)
    }

    pub fn build_pdf_url(&self, target_url: &str, options: &Options) -> Result<String, CaptureError> {
        self.build_url(RequestKind::Pdf, target_url, options)
    }

    pub fn build_content_url(&self, target_url: &str, options: &Options) -> Result<String, CaptureError> {
        self.build_url(RequestKind::Content, target_url, options)
    }

    pub fn build_metadata_url(&self, target_url: &str, options: &Options) -> Result<String, CaptureError> {
        self.build_url(RequestKind::Metadata, target_url, options)
    }

    pub fn build_animated_url(&self, target_url: &str, options: &Options) -> Result<String, CaptureError> {
        self.build_url(RequestKind::Animated, target_url, options)
    }

    /// Sign and send one request, returning the raw body of a 2xx response.
    ///
    /// Exactly one attempt is made; non-2xx statuses become
    /// [`CaptureError::HttpStatus`].
    pub async fn fetch_bytes(
        &self,
        kind: RequestKind,
        target_url: &str,
        options: &Options,
    ) -> Result<Vec<u8>, CaptureError> {
        let url = self.build_url(kind, target_url, options)?;

        let started = Instant::now();
        let result = match self.transport.get(&url).await {
            Ok(response) if response.is_success() => Ok(response.body),
            Ok(response) => {
                debug!(%kind, status = response.status, "capture service returned an error status");
                Err(CaptureError::HttpStatus(response.status))
            }
            Err(e) => {
                debug!(%kind, error = %e, "request to capture service failed");
                Err(e)
            }
        };
        let elapsed = started.elapsed();
        record_dispatch(kind, elapsed, outcome_label(&result));

        if let Ok(body) = &result {
            info!(
                "{} request completed in {} ({})",
                kind,
                format_duration(elapsed),
                format_bytes(body.len())
            );
        }

        result
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        kind: RequestKind,
        target_url: &str,
        options: &Options,
    ) -> Result<T, CaptureError> {
        let body = self.fetch_bytes(kind, target_url, options).await?;
        serde_json::from_slice(&body).map_err(|e| {
            debug!(%kind, error = %e, "failed to decode response body");
            CaptureError::from(e)
        })
    }

    pub async fn fetch_image(&self, target_url: &str, options: &Options) -> Result<Vec<u8>, CaptureError> {
        self.fetch_bytes(RequestKind::Image, target_url, options).await
    }

    pub async fn fetch_pdf(&self, target_url: &str, options: &Options) -> Result<Vec<u8>, CaptureError> {
        self.fetch_bytes(RequestKind::Pdf, target_url, options).await
    }

    pub async fn fetch_animated(&self, target_url: &str, options: &Options) -> Result<Vec<u8>, CaptureError> {
        self.fetch_bytes(RequestKind::Animated, target_url, options).await
    }

    pub async fn fetch_content(
        &self,
        target_url: &str,
        options: &Options,
    ) -> Result<ContentResponse, CaptureError> {
        self.fetch_json(RequestKind::Content, target_url, options).await
    }

    pub async fn fetch_metadata(
        &self,
        target_url: &str,
        options: &Options,
    ) -> Result<MetadataResponse, CaptureError> {
        self.fetch_json(RequestKind::Metadata, target_url, options).await
    }
}

impl fmt::Debug for CaptureClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureClient")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
