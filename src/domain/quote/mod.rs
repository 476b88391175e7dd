//! Quote domain: real-time briefs and market status.

pub mod client;

use crate::envelope::ApiModel;
use crate::error::SdkError;
use crate::shared::{Market, ServiceMethod};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── QuoteAskBidModel ────────────────────────────────────────────────────────

/// Payload of `brief`: real-time quotes for a list of symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteAskBidModel {
    pub symbols: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
    /// Include best bid/ask in each quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_ask_bid: Option<bool>,
}

impl QuoteAskBidModel {
    pub fn new<S: AsRef<str>>(symbols: &[S], market: Option<Market>) -> Result<Self, SdkError> {
        if symbols.is_empty() {
            return Err(SdkError::InvalidArgument(
                "parameter 'symbols' is empty".to_string(),
            ));
        }
        Ok(Self {
            symbols: symbols.iter().map(|s| s.as_ref().to_string()).collect(),
            market,
            include_ask_bid: Some(true),
        })
    }
}

impl ApiModel for QuoteAskBidModel {
    const METHOD: ServiceMethod = ServiceMethod::Brief;
    type Response = Vec<RealTimeQuote>;
}

/// One symbol's real-time quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeQuote {
    pub symbol: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub open: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub high: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub low: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub pre_close: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub latest_price: Option<Decimal>,
    /// Epoch milliseconds of `latest_price`.
    #[serde(default)]
    pub latest_time: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub ask_price: Option<Decimal>,
    #[serde(default)]
    pub ask_size: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub bid_price: Option<Decimal>,
    #[serde(default)]
    pub bid_size: Option<i64>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl RealTimeQuote {
    /// Ask minus bid, when both sides are quoted.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.ask_price? - self.bid_price?)
    }
}

// ─── MarketStateModel ────────────────────────────────────────────────────────

/// Payload of `market_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStateModel {
    pub market: Market,
}

impl ApiModel for MarketStateModel {
    const METHOD: ServiceMethod = ServiceMethod::MarketState;
    type Response = Vec<MarketState>;
}

/// Trading status of one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketState {
    pub market: String,
    /// Localized status text.
    #[serde(default)]
    pub market_status: Option<String>,
    /// Status code such as `TRADING`, `CLOSING` or `NOT_YET_OPEN`.
    pub status: String,
    #[serde(default)]
    pub open_time: Option<String>,
}

impl MarketState {
    pub fn is_trading(&self) -> bool {
        self.status == "TRADING"
    }
}
