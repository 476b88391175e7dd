//! Contract domain: instrument descriptors and contract lookup.

pub mod client;

use crate::envelope::ApiModel;
use crate::error::SdkError;
use crate::shared::{Currency, SecType, ServiceMethod};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── ContractItem ────────────────────────────────────────────────────────────

/// Identifies a tradable instrument.
///
/// `currency` and `sec_type` stay raw strings because that is how the contract
/// endpoint returns them; they are checked against the closed sets when an
/// order is built from the contract. Any other unset field means "not
/// applicable to this instrument class".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<i64>,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sec_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_symbol: Option<String>,
    /// Expiry as `yyyyMMdd` for derivatives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub strike: Option<Decimal>,
    /// `PUT` or `CALL` for options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub multiplier: Option<Decimal>,
}

impl ContractItem {
    /// A stock contract.
    pub fn stock(symbol: &str, currency: Currency) -> Self {
        Self {
            symbol: symbol.to_string(),
            currency: Some(currency.as_str().to_string()),
            sec_type: Some(SecType::Stock.as_str().to_string()),
            ..Default::default()
        }
    }

    /// An option contract.
    pub fn option(
        symbol: &str,
        expiry: &str,
        strike: Decimal,
        right: &str,
        currency: Currency,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            currency: Some(currency.as_str().to_string()),
            sec_type: Some(SecType::Option.as_str().to_string()),
            expiry: Some(expiry.to_string()),
            strike: Some(strike),
            right: Some(right.to_string()),
            multiplier: Some(Decimal::from(100)),
            ..Default::default()
        }
    }

    /// A futures contract.
    pub fn future(symbol: &str, expiry: &str, exchange: &str, currency: Currency) -> Self {
        Self {
            symbol: symbol.to_string(),
            currency: Some(currency.as_str().to_string()),
            sec_type: Some(SecType::Future.as_str().to_string()),
            exchange: Some(exchange.to_string()),
            expiry: Some(expiry.to_string()),
            ..Default::default()
        }
    }

    /// The contract's currency mapped into the closed set.
    pub fn parsed_currency(&self) -> Result<Option<Currency>, SdkError> {
        self.currency.as_deref().map(str::parse).transpose()
    }

    /// The contract's security type mapped into the closed set.
    pub fn parsed_sec_type(&self) -> Result<Option<SecType>, SdkError> {
        self.sec_type.as_deref().map(str::parse).transpose()
    }
}

// ─── ContractModel ───────────────────────────────────────────────────────────

/// Payload for the `contract` lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractModel {
    pub account: String,
    pub symbol: String,
    pub sec_type: SecType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub strike: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

impl ContractModel {
    pub fn new(account: &str, symbol: &str, sec_type: SecType) -> Self {
        Self {
            account: account.to_string(),
            symbol: symbol.to_string(),
            sec_type,
            currency: None,
            exchange: None,
            expiry: None,
            strike: None,
            right: None,
        }
    }
}

impl ApiModel for ContractModel {
    const METHOD: ServiceMethod = ServiceMethod::Contract;
    type Response = ContractItem;
}
