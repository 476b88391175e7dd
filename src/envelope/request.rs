//! Typed request envelope.

use crate::error::SdkError;
use crate::network::DEFAULT_VERSION;
use crate::shared::ServiceMethod;

use super::response::ResponseEnvelope;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A domain payload the gateway accepts.
///
/// The impl is the whole method → payload → response mapping for one request
/// kind: adding a new kind is one `impl ApiModel`, dispatch is untouched.
pub trait ApiModel: Serialize {
    /// Remote operation this payload is sent to.
    const METHOD: ServiceMethod;

    /// Shape of the `data` field the gateway answers with.
    type Response: DeserializeOwned;
}

/// A versioned call to one gateway method carrying a typed payload.
///
/// Immutable once built; the `with_*` helpers return a new envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope<M> {
    version: String,
    model: M,
}

impl<M: ApiModel> RequestEnvelope<M> {
    /// Wrap `model` with the default API version.
    pub fn new(model: M) -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            model,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn method(&self) -> ServiceMethod {
        M::METHOD
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// The payload as the JSON string carried in `biz_content`.
    pub fn biz_content(&self) -> Result<String, SdkError> {
        Ok(serde_json::to_string(&self.model)?)
    }

    /// Decode raw gateway bytes into the response type bound to this request.
    pub fn decode_response(&self, bytes: &[u8]) -> Result<ResponseEnvelope<M::Response>, SdkError> {
        ResponseEnvelope::from_slice(bytes)
    }

    pub(crate) fn try_map_model(
        self,
        f: impl FnOnce(M) -> Result<M, SdkError>,
    ) -> Result<Self, SdkError> {
        Ok(Self {
            version: self.version,
            model: f(self.model)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Ping {
        market: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pong {
        status: String,
    }

    impl ApiModel for Ping {
        const METHOD: ServiceMethod = ServiceMethod::MarketState;
        type Response = Vec<Pong>;
    }

    #[test]
    fn test_envelope_binds_method_and_version() {
        let req = RequestEnvelope::new(Ping {
            market: "US".into(),
        });
        assert_eq!(req.method(), ServiceMethod::MarketState);
        assert_eq!(req.version(), DEFAULT_VERSION);

        let req = req.with_version("2.0");
        assert_eq!(req.version(), "2.0");
        assert_eq!(req.biz_content().unwrap(), r#"{"market":"US"}"#);
    }

    #[test]
    fn test_decode_uses_bound_response_type() {
        let req = RequestEnvelope::new(Ping {
            market: "US".into(),
        });
        let body = br#"{"code":0,"message":"success","data":[{"status":"TRADING"}]}"#;
        let resp = req.decode_response(body).unwrap();
        assert!(resp.is_success());
        assert_eq!(
            resp.data,
            Some(vec![Pong {
                status: "TRADING".into()
            }])
        );
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let req = RequestEnvelope::new(Ping {
            market: "US".into(),
        });
        let body = br#"{"code":0,"message":"success","data":{"status":"TRADING"}}"#;
        assert!(matches!(req.decode_response(body), Err(SdkError::Serde(_))));
    }
}
