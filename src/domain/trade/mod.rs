//! Trade domain: order payloads, the order builder and attached exit orders.

pub mod attach;
pub mod builder;
pub mod client;

use crate::domain::contract::ContractItem;
use crate::envelope::ApiModel;
use crate::error::SdkError;
use crate::shared::{ActionType, AttachType, Currency, OrderType, SecType, ServiceMethod, TimeInForce};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use attach::Attach;
pub use builder::{OrderKind, TradeOrderBuilder};

// ─── TradeOrderModel ─────────────────────────────────────────────────────────

/// Payload of `place_order`.
///
/// Only the price fields that belong to `order_type` are set, and only the
/// attach fields that belong to `attach_type`. Use [`TradeOrderBuilder`] to get
/// both guarantees by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOrderModel {
    pub account: String,
    pub action: ActionType,
    pub total_quantity: i64,
    pub order_type: OrderType,

    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit_price: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub aux_price: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub trailing_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outside_rth: Option<bool>,

    // contract
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sec_type: Option<SecType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub multiplier: Option<Decimal>,

    // attached orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_type: Option<AttachType>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub profit_taker_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_taker_tif: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_taker_rth: Option<bool>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_loss_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss_tif: Option<TimeInForce>,
}

impl TradeOrderModel {
    /// Base order model for `contract`, priced according to `kind`.
    ///
    /// Fails with [`SdkError::UnknownEnumValue`] when the contract's currency or
    /// security type is not a known code, and with [`SdkError::InvalidArgument`]
    /// when a price or the multiplier cannot be sent exactly (see
    /// [`wire_price`]).
    pub fn from_contract(
        account: String,
        contract: &ContractItem,
        action: ActionType,
        quantity: i64,
        kind: OrderKind,
    ) -> Result<Self, SdkError> {
        kind.check_prices()?;
        let multiplier = contract
            .multiplier
            .map(|m| wire_price("multiplier", m))
            .transpose()?;

        let mut model = Self {
            account,
            action,
            total_quantity: quantity,
            order_type: kind.order_type(),
            limit_price: None,
            aux_price: None,
            trailing_percent: None,
            time_in_force: None,
            outside_rth: None,
            symbol: contract.symbol.clone(),
            currency: contract.parsed_currency()?,
            sec_type: contract.parsed_sec_type()?,
            exchange: contract.exchange.clone(),
            market: contract.market.clone(),
            local_symbol: contract.local_symbol.clone(),
            expiry: contract.expiry.clone(),
            strike: contract.strike.map(strike_text),
            right: contract.right.clone(),
            multiplier,
            attach_type: None,
            profit_taker_price: None,
            profit_taker_tif: None,
            profit_taker_rth: None,
            stop_loss_price: None,
            stop_loss_tif: None,
        };
        kind.apply(&mut model);
        Ok(model)
    }
}

/// Check that `price` arrives at the gateway unchanged.
///
/// Prices go out as JSON numbers, i.e. binary doubles. A decimal that has no
/// exact shortest double form (too many significant digits) would be silently
/// rounded on the wire, so it is rejected instead.
pub fn wire_price(field: &'static str, price: Decimal) -> Result<Decimal, SdkError> {
    let exact = price
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok())
        .is_some_and(|back| back == price);
    if exact {
        Ok(price)
    } else {
        Err(SdkError::InvalidArgument(format!(
            "parameter '{}' = {} cannot be sent without losing precision",
            field, price
        )))
    }
}

/// Strike as the gateway's order endpoint expects it: plain decimal text that
/// always carries a fractional part (`150.0`, `147.5`).
fn strike_text(strike: Decimal) -> String {
    let text = strike.normalize().to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

impl ApiModel for TradeOrderModel {
    const METHOD: ServiceMethod = ServiceMethod::PlaceOrder;
    type Response = PlacedOrder;
}

// ─── CancelOrderModel ────────────────────────────────────────────────────────

/// Payload of `cancel_order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderModel {
    pub account: String,
    /// Global order id returned by `place_order`.
    pub id: i64,
}

impl ApiModel for CancelOrderModel {
    const METHOD: ServiceMethod = ServiceMethod::CancelOrder;
    type Response = PlacedOrder;
}

// ─── PlacedOrder ─────────────────────────────────────────────────────────────

/// `data` of a `place_order` / `cancel_order` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    /// Global order id.
    pub id: i64,
    /// Account-local order number, when the gateway reports one.
    #[serde(default)]
    pub order_id: Option<i64>,
    /// Ids of attached child orders.
    #[serde(default)]
    pub sub_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option_contract() -> ContractItem {
        ContractItem::option(
            "AAPL",
            "20240119",
            Decimal::new(1500, 1),
            "CALL",
            Currency::Usd,
        )
    }

    #[test]
    fn test_from_contract_copies_contract_fields() {
        let model = TradeOrderModel::from_contract(
            "acc1".into(),
            &option_contract(),
            ActionType::Buy,
            2,
            OrderKind::Market,
        )
        .unwrap();
        assert_eq!(model.symbol, "AAPL");
        assert_eq!(model.sec_type, Some(SecType::Option));
        assert_eq!(model.currency, Some(Currency::Usd));
        assert_eq!(model.expiry.as_deref(), Some("20240119"));
        assert_eq!(model.strike.as_deref(), Some("150.0"));
        assert_eq!(model.right.as_deref(), Some("CALL"));
        assert_eq!(model.multiplier, Some(Decimal::from(100)));
        assert_eq!(model.order_type, OrderType::Market);
    }

    #[test]
    fn test_wire_omits_unset_fields() {
        let model = TradeOrderModel::from_contract(
            "acc1".into(),
            &ContractItem::stock("AAPL", Currency::Usd),
            ActionType::Buy,
            100,
            OrderKind::Limit {
                limit_price: Decimal::new(15025, 2),
            },
        )
        .unwrap();
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "account": "acc1",
                "action": "BUY",
                "total_quantity": 100,
                "order_type": "LMT",
                "limit_price": 150.25,
                "symbol": "AAPL",
                "currency": "USD",
                "sec_type": "STK"
            })
        );
    }

    #[test]
    fn test_placed_order_deserialize() {
        let json = r#"{"id": 13810009016, "orderId": 42, "subIds": [13810009017, 13810009018]}"#;
        let placed: PlacedOrder = serde_json::from_str(json).unwrap();
        assert_eq!(placed.id, 13810009016);
        assert_eq!(placed.order_id, Some(42));
        assert_eq!(placed.sub_ids.len(), 2);

        let placed: PlacedOrder = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(placed.order_id.is_none());
        assert!(placed.sub_ids.is_empty());
    }

    #[test]
    fn test_strike_text_keeps_fraction() {
        assert_eq!(strike_text(Decimal::new(1500, 1)), "150.0");
        assert_eq!(strike_text(Decimal::new(1475, 1)), "147.5");
        assert_eq!(strike_text(Decimal::new(125, 3)), "0.125");
    }

    #[test]
    fn test_wire_price_accepts_exact_prices() {
        for price in [
            Decimal::new(15025, 2),
            Decimal::new(1, 1),
            Decimal::new(3, 1),
            Decimal::new(1, 10),
            Decimal::from(100),
        ] {
            assert_eq!(wire_price("limit_price", price).unwrap(), price);
        }
    }

    #[test]
    fn test_wire_price_rejects_lossy_prices() {
        // 123456789.012345678 and 9999999999999999.99
        for price in [
            Decimal::new(123456789012345678, 9),
            Decimal::new(999999999999999999, 2),
        ] {
            assert!(matches!(
                wire_price("limit_price", price),
                Err(SdkError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_from_contract_rejects_lossy_limit() {
        let err = TradeOrderModel::from_contract(
            "acc1".into(),
            &ContractItem::stock("AAPL", Currency::Usd),
            ActionType::Buy,
            1,
            OrderKind::Limit {
                limit_price: Decimal::new(123456789012345678, 9),
            },
        )
        .unwrap_err();
        assert!(matches!(err, SdkError::InvalidArgument(_)));
    }
}
