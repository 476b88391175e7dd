//! Gateway response envelope.

use crate::error::SdkError;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Code the gateway uses for a successful call.
pub const SUCCESS_CODE: i32 = 0;

/// Generic gateway response: status code, message and a typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<R> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    /// Server time in epoch milliseconds.
    pub timestamp: Option<i64>,
    pub data: Option<R>,
}

impl<R: DeserializeOwned> ResponseEnvelope<R> {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SdkError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl<R> ResponseEnvelope<R> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The payload of a successful call.
    ///
    /// A non-zero code becomes [`SdkError::Api`]. A successful call without a
    /// payload is reported the same way, carrying the success code.
    pub fn into_data(self) -> Result<R, SdkError> {
        if !self.is_success() {
            return Err(SdkError::Api {
                code: self.code,
                message: self.message,
            });
        }
        self.data.ok_or_else(|| SdkError::Api {
            code: self.code,
            message: "response carried no data".to_string(),
        })
    }
}
