//! Client configuration: developer id, default account and gateway location.
//!
//! A [`ClientConfig`] is read-only once built. Builders take it by reference
//! to resolve the default account; nothing in the SDK mutates it.
//!
//! For callers that prefer ambient configuration, [`install`] publishes one
//! config process-wide. It can be called once, and must happen before any
//! builder call that relies on [`global`].

use crate::error::SdkError;
use crate::network::{DEFAULT_SERVER_URL, DEFAULT_VERSION, SANDBOX_SERVER_URL};

use std::sync::OnceLock;

pub const ENV_TIGER_ID: &str = "TIGER_ID";
pub const ENV_ACCOUNT: &str = "TIGER_ACCOUNT";
pub const ENV_SERVER_URL: &str = "TIGER_SERVER_URL";
pub const ENV_DEVICE_ID: &str = "TIGER_DEVICE_ID";
pub const ENV_API_VERSION: &str = "TIGER_API_VERSION";

static GLOBAL: OnceLock<ClientConfig> = OnceLock::new();

/// Gateway client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Developer id issued by the gateway. Required only for sending.
    pub tiger_id: Option<String>,
    /// Account used by builders when the caller does not name one.
    pub default_account: Option<String>,
    pub server_url: String,
    /// API version stamped on new request envelopes.
    pub version: String,
    pub device_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tiger_id: None,
            default_account: None,
            server_url: DEFAULT_SERVER_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            device_id: None,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from `TIGER_*` environment variables.
    ///
    /// Unset or empty variables leave the corresponding field at its default.
    pub fn from_env() -> Self {
        let mut builder = Self::builder();
        if let Some(id) = env_value(ENV_TIGER_ID) {
            builder = builder.tiger_id(&id);
        }
        if let Some(account) = env_value(ENV_ACCOUNT) {
            builder = builder.default_account(&account);
        }
        if let Some(url) = env_value(ENV_SERVER_URL) {
            builder = builder.server_url(&url);
        }
        if let Some(device_id) = env_value(ENV_DEVICE_ID) {
            builder = builder.device_id(&device_id);
        }
        if let Some(version) = env_value(ENV_API_VERSION) {
            builder = builder.version(&version);
        }
        builder.build()
    }

    /// Pick the explicit account if given, else the configured default.
    ///
    /// A blank account counts as not given.
    pub fn resolve_account(&self, explicit: Option<&str>) -> Result<String, SdkError> {
        let given = |account: &&str| !account.trim().is_empty();
        match explicit
            .filter(given)
            .or_else(|| self.default_account.as_deref().filter(given))
        {
            Some(account) => Ok(account.to_string()),
            None => Err(SdkError::MissingConfiguration(
                "no account given and no default account configured".to_string(),
            )),
        }
    }

    pub fn tiger_id(&self) -> Result<&str, SdkError> {
        self.tiger_id
            .as_deref()
            .ok_or_else(|| SdkError::MissingConfiguration("tiger_id is not configured".to_string()))
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Publish `config` as the process-wide default.
///
/// Fails if a config was already installed; the first one stays in effect.
pub fn install(config: ClientConfig) -> Result<(), SdkError> {
    GLOBAL.set(config).map_err(|_| {
        SdkError::InvalidArgument("a process-wide ClientConfig is already installed".to_string())
    })
}

/// The process-wide config, if [`install`] has been called.
pub fn global() -> Option<&'static ClientConfig> {
    GLOBAL.get()
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn tiger_id(mut self, id: &str) -> Self {
        self.config.tiger_id = Some(id.to_string());
        self
    }

    pub fn default_account(mut self, account: &str) -> Self {
        self.config.default_account = Some(account.to_string());
        self
    }

    pub fn server_url(mut self, url: &str) -> Self {
        self.config.server_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Point at the sandbox gateway.
    pub fn sandbox(self) -> Self {
        self.server_url(SANDBOX_SERVER_URL)
    }

    pub fn version(mut self, version: &str) -> Self {
        self.config.version = version.to_string();
        self
    }

    pub fn device_id(mut self, device_id: &str) -> Self {
        self.config.device_id = Some(device_id.to_string());
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
