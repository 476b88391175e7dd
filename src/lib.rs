//! # Tiger OpenAPI SDK
//!
//! Typed request building and dispatch for the Tiger brokerage OpenAPI
//! gateway.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: closed-set enums, service methods, domain payloads and the
//!    order builder (no I/O)
//! 2. **Envelopes**: `RequestEnvelope<M>` binds a payload to its method,
//!    version and response type; `ResponseEnvelope<R>` decodes the answer
//! 3. **Transport**: the `Transport` seam, request signing, and the reqwest
//!    `HttpTransport` with per-method retry policies
//! 4. **High-Level Client**: `TigerClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tiger_openapi::prelude::*;
//!
//! let client = TigerClient::builder()
//!     .config(ClientConfig::from_env())
//!     .signer(my_rsa_signer)
//!     .build()?;
//!
//! let order = client.trade().build(
//!     TradeOrderBuilder::new()
//!         .contract(ContractItem::stock("AAPL", Currency::Usd))
//!         .buy()
//!         .quantity(100)
//!         .limit(dec!(150.25)),
//! )?;
//! let placed = client.trade().place(&order.with_stop_loss(dec!(140), TimeInForce::Day)?).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Closed-set enums and service method identifiers.
pub mod shared;

/// Domain modules (vertical slices): payloads, response types, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Gateway URL and protocol constants.
pub mod network;

/// Client configuration and the optional process-wide default.
pub mod config;

// ── Layer 2: Envelopes ───────────────────────────────────────────────────────

/// Typed request / response envelopes and the runtime payload sum.
pub mod envelope;

// ── Layer 3: Transport ───────────────────────────────────────────────────────

/// Transport seam, request signing and the HTTP implementation.
pub mod transport;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `TigerClient`, the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Closed sets
    pub use crate::shared::{
        ActionType, AttachType, Currency, Market, OrderType, SecType, ServiceMethod, TimeInForce,
    };

    // Domain types: contract
    pub use crate::domain::contract::{ContractItem, ContractModel};

    // Domain types: quote
    pub use crate::domain::quote::{MarketState, MarketStateModel, QuoteAskBidModel, RealTimeQuote};

    // Domain types: trade
    pub use crate::domain::trade::{
        Attach, CancelOrderModel, OrderKind, PlacedOrder, TradeOrderBuilder, TradeOrderModel,
    };

    // Envelopes
    pub use crate::envelope::{AnyRequest, ApiModel, ApiPayload, RequestEnvelope, ResponseEnvelope};

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Config + network
    pub use crate::config::{ClientConfig, ClientConfigBuilder};
    pub use crate::network::{DEFAULT_SERVER_URL, SANDBOX_SERVER_URL};

    // Transport
    pub use crate::transport::{RequestSigner, Transport, TransportRequest};
    #[cfg(feature = "http")]
    pub use crate::transport::http::HttpTransport;
    #[cfg(feature = "http")]
    pub use crate::transport::retry::RetryConfig;

    // Client + sub-clients
    pub use crate::client::{ContractsClient, QuotesClient, TigerClient, TigerClientBuilder, TradeClient};
}
