//! Network constants for the Tiger OpenAPI gateway.

/// Default gateway URL. Every method is a POST to this single endpoint.
pub const DEFAULT_SERVER_URL: &str = "https://openapi.tigerfintech.com/gateway";

/// Sandbox gateway URL.
pub const SANDBOX_SERVER_URL: &str = "https://openapi-sandbox.tigerfintech.com/gateway";

/// API version stamped on every request unless overridden.
pub const DEFAULT_VERSION: &str = "1.0";

pub const DEFAULT_CHARSET: &str = "UTF-8";

pub const DEFAULT_SIGN_TYPE: &str = "RSA";

/// Timestamp format the gateway expects in the `timestamp` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
