//! reqwest-backed [`Transport`]: signs each call and POSTs it to the gateway.

use crate::config::ClientConfig;
use crate::error::{HttpError, SdkError};
use crate::transport::retry::{self, RetryConfig};
use crate::transport::{GatewayRequest, RequestSigner, Transport, TransportRequest};

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// HTTP transport for the Tiger OpenAPI gateway.
#[derive(Clone)]
pub struct HttpTransport {
    server_url: String,
    tiger_id: String,
    device_id: Option<String>,
    client: Client,
    signer: Arc<dyn RequestSigner>,
    retry: RetryConfig,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("server_url", &self.server_url)
            .field("tiger_id", &self.tiger_id)
            .field("device_id", &self.device_id)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, signer: Arc<dyn RequestSigner>) -> Result<Self, SdkError> {
        let tiger_id = config.tiger_id()?.to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(HttpError::from)?;

        Ok(Self {
            server_url: config.server_url.trim_end_matches('/').to_string(),
            tiger_id,
            device_id: config.device_id.clone(),
            client,
            signer,
            retry: RetryConfig::default(),
        })
    }

    /// Replace the default retry config. Order mutations stay single-shot
    /// unless `retry.retry_mutations` is set.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    async fn do_request(&self, body: &GatewayRequest) -> Result<Vec<u8>, HttpError> {
        let resp = self
            .client
            .post(&self.server_url)
            .header("Content-Type", "application/json;charset=UTF-8")
            .json(body)
            .send()
            .await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.bytes().await?.to_vec());
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest<'_>) -> Result<Vec<u8>, SdkError> {
        let timestamp = chrono::Local::now().naive_local();
        let body = GatewayRequest::new(
            &self.tiger_id,
            &request,
            timestamp,
            self.device_id.as_deref(),
        )
        .signed(self.signer.as_ref())?;

        tracing::debug!(
            method = %request.method,
            version = request.version,
            url = %self.server_url,
            "POST gateway"
        );

        let bytes = retry::run(&self.retry, request.method, || self.do_request(&body)).await?;
        Ok(bytes)
    }
}
