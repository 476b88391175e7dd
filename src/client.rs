//! High-level client: `TigerClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the generic dispatch path and the
//! accessor methods.

use crate::config::ClientConfig;
use crate::domain::contract::client::Contracts;
use crate::domain::quote::client::Quotes;
use crate::domain::trade::client::Trade;
use crate::envelope::{AnyRequest, ApiModel, RequestEnvelope, ResponseEnvelope};
use crate::error::SdkError;
use crate::transport::{Transport, TransportRequest};

use std::sync::Arc;

#[cfg(feature = "http")]
use crate::transport::{http::HttpTransport, retry::RetryConfig, RequestSigner};

// Re-export sub-client types for convenience.
pub use crate::domain::contract::client::Contracts as ContractsClient;
pub use crate::domain::quote::client::Quotes as QuotesClient;
pub use crate::domain::trade::client::Trade as TradeClient;

/// The primary entry point for the SDK.
///
/// Owns the configuration and the transport. Sub-clients for each domain are
/// available as `client.trade()`, `client.quote()` and `client.contracts()`.
#[derive(Clone)]
pub struct TigerClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for TigerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TigerClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TigerClient {
    pub fn builder() -> TigerClientBuilder {
        TigerClientBuilder::default()
    }

    /// Client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn trade(&self) -> Trade<'_> {
        Trade { client: self }
    }

    pub fn quote(&self) -> Quotes<'_> {
        Quotes { client: self }
    }

    pub fn contracts(&self) -> Contracts<'_> {
        Contracts { client: self }
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    /// Send `request` and decode the answer into its bound response type.
    ///
    /// Transport errors come back unchanged. A gateway error code is not an
    /// error here; inspect [`ResponseEnvelope::is_success`] or use
    /// [`execute_data`](Self::execute_data).
    pub async fn execute<M: ApiModel>(
        &self,
        request: &RequestEnvelope<M>,
    ) -> Result<ResponseEnvelope<M::Response>, SdkError> {
        let biz_content = request.biz_content()?;
        let bytes = self
            .send(TransportRequest {
                method: request.method(),
                version: request.version(),
                biz_content: &biz_content,
            })
            .await?;
        request.decode_response(&bytes)
    }

    /// Like [`execute`](Self::execute), but unwraps `data` and turns a
    /// non-zero gateway code into [`SdkError::Api`].
    pub async fn execute_data<M: ApiModel>(
        &self,
        request: &RequestEnvelope<M>,
    ) -> Result<M::Response, SdkError> {
        self.execute(request).await?.into_data()
    }

    /// Dispatch a request whose payload kind is only known at runtime.
    ///
    /// The response type is not statically known either, so `data` is left
    /// as raw JSON.
    pub async fn execute_any(
        &self,
        request: &AnyRequest,
    ) -> Result<ResponseEnvelope<serde_json::Value>, SdkError> {
        let biz_content = request.biz_content()?;
        let bytes = self
            .send(TransportRequest {
                method: request.method(),
                version: &request.version,
                biz_content: &biz_content,
            })
            .await?;
        ResponseEnvelope::from_slice(&bytes)
    }

    async fn send(&self, request: TransportRequest<'_>) -> Result<Vec<u8>, SdkError> {
        tracing::debug!(
            method = %request.method,
            version = request.version,
            "dispatching request"
        );
        let bytes = self.transport.send(request).await?;
        if let Ok(head) = serde_json::from_slice::<ResponseHead>(&bytes) {
            if head.code != crate::envelope::response::SUCCESS_CODE {
                tracing::warn!(
                    method = %request.method,
                    code = head.code,
                    message = head.message.as_deref().unwrap_or_default(),
                    "gateway returned an error code"
                );
            }
        }
        Ok(bytes)
    }
}

/// Just the status part of a response, for logging.
#[derive(serde::Deserialize)]
struct ResponseHead {
    code: i32,
    #[serde(default)]
    message: Option<String>,
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct TigerClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    #[cfg(feature = "http")]
    signer: Option<Arc<dyn RequestSigner>>,
    #[cfg(feature = "http")]
    retry: Option<RetryConfig>,
}

impl TigerClientBuilder {
    /// Use `config`. Defaults to the installed global, else
    /// [`ClientConfig::default`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom transport instead of the HTTP one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Signer for the HTTP transport.
    #[cfg(feature = "http")]
    pub fn signer(mut self, signer: impl RequestSigner + 'static) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Retry config for the HTTP transport. Defaults to [`RetryConfig::default`].
    #[cfg(feature = "http")]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn build(mut self) -> Result<TigerClient, SdkError> {
        let config = self
            .config
            .take()
            .or_else(|| crate::config::global().cloned())
            .unwrap_or_default();

        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => self.default_transport(&config)?,
        };

        Ok(TigerClient::with_transport(config, transport))
    }

    #[cfg(feature = "http")]
    fn default_transport(self, config: &ClientConfig) -> Result<Arc<dyn Transport>, SdkError> {
        let signer = self.signer.ok_or_else(|| {
            SdkError::MissingConfiguration("a signer is required for the HTTP transport".to_string())
        })?;
        let mut http = HttpTransport::new(config, signer)?;
        if let Some(retry) = self.retry {
            http = http.with_retry(retry);
        }
        Ok(Arc::new(http))
    }

    #[cfg(not(feature = "http"))]
    fn default_transport(self, _config: &ClientConfig) -> Result<Arc<dyn Transport>, SdkError> {
        Err(SdkError::MissingConfiguration(
            "no transport configured".to_string(),
        ))
    }
}
