//! Transport layer: the seam between typed envelopes and the network.
//!
//! The SDK core only ever talks to a [`Transport`]: it hands over the method
//! identifier, the API version and the serialized payload, and gets raw
//! response bytes back. [`http::HttpTransport`] is the reqwest-backed
//! implementation; tests plug in their own.

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod retry;

use crate::error::SdkError;
use crate::network::{DEFAULT_CHARSET, DEFAULT_SIGN_TYPE, TIMESTAMP_FORMAT};
use crate::shared::ServiceMethod;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One outgoing call, borrowed from the envelope being dispatched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportRequest<'a> {
    pub method: ServiceMethod,
    pub version: &'a str,
    pub biz_content: &'a str,
}

/// Sends a serialized request and returns the raw response body.
///
/// Errors are returned as-is to the caller; the SDK does not reinterpret
/// them. Network failures belong in [`SdkError::Http`], signer failures in
/// [`SdkError::Signing`]. Implementations may be shared across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest<'_>) -> Result<Vec<u8>, SdkError>;
}

/// Produces the `sign` field from the canonical sign content.
///
/// The gateway verifies an RSA signature made with the developer's private
/// key; the key handling and the signature scheme live behind this trait.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, content: &str) -> Result<String, SdkError>;
}

impl<F> RequestSigner for F
where
    F: Fn(&str) -> Result<String, SdkError> + Send + Sync,
{
    fn sign(&self, content: &str) -> Result<String, SdkError> {
        self(content)
    }
}

// ─── GatewayRequest ──────────────────────────────────────────────────────────

/// JSON body POSTed to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayRequest {
    pub tiger_id: String,
    pub charset: String,
    pub sign_type: String,
    pub version: String,
    pub timestamp: String,
    pub method: String,
    pub biz_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
}

impl GatewayRequest {
    pub fn new(
        tiger_id: &str,
        request: &TransportRequest<'_>,
        timestamp: NaiveDateTime,
        device_id: Option<&str>,
    ) -> Self {
        Self {
            tiger_id: tiger_id.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            sign_type: DEFAULT_SIGN_TYPE.to_string(),
            version: request.version.to_string(),
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            method: request.method.as_str().to_string(),
            biz_content: request.biz_content.to_string(),
            device_id: device_id.map(str::to_string),
            sign: None,
        }
    }

    /// Canonical string the signature covers: every non-empty parameter
    /// except `sign`, sorted by key, as `key=value` joined with `&`.
    pub fn sign_content(&self) -> String {
        let mut params = BTreeMap::new();
        params.insert("tiger_id", self.tiger_id.as_str());
        params.insert("charset", self.charset.as_str());
        params.insert("sign_type", self.sign_type.as_str());
        params.insert("version", self.version.as_str());
        params.insert("timestamp", self.timestamp.as_str());
        params.insert("method", self.method.as_str());
        params.insert("biz_content", self.biz_content.as_str());
        if let Some(device_id) = &self.device_id {
            params.insert("device_id", device_id.as_str());
        }

        params
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn signed(mut self, signer: &dyn RequestSigner) -> Result<Self, SdkError> {
        self.sign = Some(signer.sign(&self.sign_content())?);
        Ok(self)
    }
}
