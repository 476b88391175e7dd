//! Fluent builder for `place_order` requests.

use crate::config::{self, ClientConfig};
use crate::domain::contract::ContractItem;
use crate::envelope::RequestEnvelope;
use crate::error::SdkError;
use crate::shared::{ActionType, OrderType, TimeInForce};

use super::{wire_price, TradeOrderModel};

use rust_decimal::Decimal;

/// Order variant together with exactly the price fields it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Market,
    Limit {
        limit_price: Decimal,
    },
    Stop {
        aux_price: Decimal,
    },
    StopLimit {
        limit_price: Decimal,
        aux_price: Decimal,
    },
    Trail {
        trailing_percent: Decimal,
        aux_price: Decimal,
    },
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::Stop { .. } => OrderType::Stop,
            OrderKind::StopLimit { .. } => OrderType::StopLimit,
            OrderKind::Trail { .. } => OrderType::Trail,
        }
    }

    /// Every price this variant carries must survive the wire unchanged.
    pub fn check_prices(&self) -> Result<(), SdkError> {
        match *self {
            OrderKind::Market => {}
            OrderKind::Limit { limit_price } => {
                wire_price("limit_price", limit_price)?;
            }
            OrderKind::Stop { aux_price } => {
                wire_price("aux_price", aux_price)?;
            }
            OrderKind::StopLimit {
                limit_price,
                aux_price,
            } => {
                wire_price("limit_price", limit_price)?;
                wire_price("aux_price", aux_price)?;
            }
            OrderKind::Trail {
                trailing_percent,
                aux_price,
            } => {
                wire_price("trailing_percent", trailing_percent)?;
                wire_price("aux_price", aux_price)?;
            }
        }
        Ok(())
    }

    /// Set the order type and this variant's price fields; clear the rest.
    pub(crate) fn apply(&self, model: &mut TradeOrderModel) {
        model.order_type = self.order_type();
        model.limit_price = None;
        model.aux_price = None;
        model.trailing_percent = None;

        match *self {
            OrderKind::Market => {}
            OrderKind::Limit { limit_price } => {
                model.limit_price = Some(limit_price);
            }
            OrderKind::Stop { aux_price } => {
                model.aux_price = Some(aux_price);
            }
            OrderKind::StopLimit {
                limit_price,
                aux_price,
            } => {
                model.limit_price = Some(limit_price);
                model.aux_price = Some(aux_price);
            }
            OrderKind::Trail {
                trailing_percent,
                aux_price,
            } => {
                model.trailing_percent = Some(trailing_percent);
                model.aux_price = Some(aux_price);
            }
        }
    }
}

/// Builder for `place_order` envelopes.
///
/// The contract, action, quantity and order kind are required. The account is
/// optional: when it is not set, `build` takes the default account from the
/// given [`ClientConfig`].
///
/// # Example
///
/// ```rust,ignore
/// let request = TradeOrderBuilder::new()
///     .account("acc1")
///     .contract(ContractItem::stock("AAPL", Currency::Usd))
///     .buy()
///     .quantity(100)
///     .limit(dec!(150.25))
///     .build(&config)?
///     .with_stop_loss(dec!(140), TimeInForce::GoodTillCancel)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TradeOrderBuilder {
    account: Option<String>,
    contract: Option<ContractItem>,
    action: Option<ActionType>,
    quantity: Option<i64>,
    kind: Option<OrderKind>,
    time_in_force: Option<TimeInForce>,
    outside_rth: Option<bool>,
}

impl TradeOrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trade on this account instead of the configured default.
    pub fn account(mut self, account: &str) -> Self {
        self.account = Some(account.to_string());
        self
    }

    pub fn contract(mut self, contract: ContractItem) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn action(mut self, action: ActionType) -> Self {
        self.action = Some(action);
        self
    }

    pub fn buy(self) -> Self {
        self.action(ActionType::Buy)
    }

    pub fn sell(self) -> Self {
        self.action(ActionType::Sell)
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Select the order variant. A later call replaces an earlier one.
    pub fn kind(mut self, kind: OrderKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn market(self) -> Self {
        self.kind(OrderKind::Market)
    }

    pub fn limit(self, limit_price: Decimal) -> Self {
        self.kind(OrderKind::Limit { limit_price })
    }

    pub fn stop(self, aux_price: Decimal) -> Self {
        self.kind(OrderKind::Stop { aux_price })
    }

    pub fn stop_limit(self, limit_price: Decimal, aux_price: Decimal) -> Self {
        self.kind(OrderKind::StopLimit {
            limit_price,
            aux_price,
        })
    }

    pub fn trail(self, trailing_percent: Decimal, aux_price: Decimal) -> Self {
        self.kind(OrderKind::Trail {
            trailing_percent,
            aux_price,
        })
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Allow filling outside regular trading hours.
    pub fn outside_rth(mut self, outside_rth: bool) -> Self {
        self.outside_rth = Some(outside_rth);
        self
    }

    /// Validate and build the envelope, resolving the account from `config`.
    ///
    /// Errors:
    /// - [`SdkError::InvalidArgument`] if the contract, action, quantity or
    ///   order kind is missing, the quantity is not positive, or a price has
    ///   more precision than the wire can carry;
    /// - [`SdkError::MissingConfiguration`] if no account was set and
    ///   `config` has no default account;
    /// - [`SdkError::UnknownEnumValue`] if the contract's currency or
    ///   security type is not a known code.
    pub fn build(self, config: &ClientConfig) -> Result<RequestEnvelope<TradeOrderModel>, SdkError> {
        let contract = self
            .contract
            .ok_or_else(|| SdkError::InvalidArgument("parameter 'contract' is missing".to_string()))?;
        let account = config.resolve_account(self.account.as_deref())?;
        let action = self
            .action
            .ok_or_else(|| SdkError::InvalidArgument("parameter 'action' is missing".to_string()))?;
        let quantity = self
            .quantity
            .ok_or_else(|| SdkError::InvalidArgument("parameter 'quantity' is missing".to_string()))?;
        if quantity <= 0 {
            return Err(SdkError::InvalidArgument(format!(
                "parameter 'quantity' must be positive, got {}",
                quantity
            )));
        }
        let kind = self.kind.ok_or_else(|| {
            SdkError::InvalidArgument("order kind is missing (call .market(), .limit(), ...)".to_string())
        })?;

        let mut model = TradeOrderModel::from_contract(account, &contract, action, quantity, kind)?;
        model.time_in_force = self.time_in_force;
        model.outside_rth = self.outside_rth;

        tracing::trace!(
            account = %model.account,
            symbol = %model.symbol,
            order_type = %model.order_type,
            "Built place_order request"
        );

        Ok(RequestEnvelope::new(model).with_version(config.version.clone()))
    }

    /// Like [`build`](Self::build), using the process-wide config installed
    /// with [`config::install`].
    ///
    /// Without an installed config only an explicit account can satisfy the
    /// account requirement.
    pub fn build_default(self) -> Result<RequestEnvelope<TradeOrderModel>, SdkError> {
        match config::global() {
            Some(config) => self.build(config),
            None => self.build(&ClientConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Currency, ServiceMethod};

    fn config() -> ClientConfig {
        ClientConfig::builder().default_account("default1").build()
    }

    fn aapl() -> ContractItem {
        ContractItem::stock("AAPL", Currency::Usd)
    }

    fn base() -> TradeOrderBuilder {
        TradeOrderBuilder::new().contract(aapl()).buy().quantity(10)
    }

    #[test]
    fn test_market_order_has_no_prices() {
        let req = base().market().build(&config()).unwrap();
        let model = req.model();
        assert_eq!(req.method(), ServiceMethod::PlaceOrder);
        assert_eq!(model.order_type, OrderType::Market);
        assert!(model.limit_price.is_none());
        assert!(model.aux_price.is_none());
        assert!(model.trailing_percent.is_none());
    }

    #[test]
    fn test_later_kind_replaces_earlier_prices() {
        let req = base()
            .limit(Decimal::new(15025, 2))
            .market()
            .build(&config())
            .unwrap();
        assert_eq!(req.model().order_type, OrderType::Market);
        assert!(req.model().limit_price.is_none());
    }

    #[test]
    fn test_trail_order_fields() {
        let req = base()
            .trail(Decimal::new(5, 0), Decimal::new(2, 0))
            .build(&config())
            .unwrap();
        let model = req.model();
        assert_eq!(model.order_type, OrderType::Trail);
        assert_eq!(model.trailing_percent, Some(Decimal::new(5, 0)));
        assert_eq!(model.aux_price, Some(Decimal::new(2, 0)));
        assert!(model.limit_price.is_none());
    }

    #[test]
    fn test_account_defaults_from_config() {
        let req = base().market().build(&config()).unwrap();
        assert_eq!(req.model().account, "default1");
    }

    #[test]
    fn test_version_follows_config() {
        let config = ClientConfig::builder()
            .default_account("default1")
            .version("2.0")
            .build();
        let req = base().market().build(&config).unwrap();
        assert_eq!(req.version(), "2.0");
    }

    #[test]
    fn test_missing_contract_checked_before_account() {
        let err = TradeOrderBuilder::new()
            .buy()
            .quantity(1)
            .market()
            .build(&ClientConfig::default())
            .unwrap_err();
        assert!(matches!(err, SdkError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_action_quantity_kind() {
        let no_action = TradeOrderBuilder::new().contract(aapl()).quantity(1).market();
        assert!(matches!(no_action.build(&config()), Err(SdkError::InvalidArgument(_))));

        let no_qty = TradeOrderBuilder::new().contract(aapl()).buy().market();
        assert!(matches!(no_qty.build(&config()), Err(SdkError::InvalidArgument(_))));

        let no_kind = TradeOrderBuilder::new().contract(aapl()).buy().quantity(1);
        assert!(matches!(no_kind.build(&config()), Err(SdkError::InvalidArgument(_))));
    }

    #[test]
    fn test_non_positive_quantity() {
        let err = base().quantity(0).market().build(&config()).unwrap_err();
        assert!(matches!(err, SdkError::InvalidArgument(_)));
    }

    #[test]
    fn test_tif_and_rth_copied() {
        let req = base()
            .limit(Decimal::ONE)
            .time_in_force(TimeInForce::GoodTillCancel)
            .outside_rth(true)
            .build(&config())
            .unwrap();
        assert_eq!(req.model().time_in_force, Some(TimeInForce::GoodTillCancel));
        assert_eq!(req.model().outside_rth, Some(true));
    }

    #[test]
    fn test_lossy_price_rejected_for_every_priced_kind() {
        let lossy = Decimal::new(123456789012345678, 9);
        for kind in [
            OrderKind::Limit { limit_price: lossy },
            OrderKind::Stop { aux_price: lossy },
            OrderKind::StopLimit {
                limit_price: Decimal::ONE,
                aux_price: lossy,
            },
            OrderKind::Trail {
                trailing_percent: lossy,
                aux_price: Decimal::ONE,
            },
        ] {
            let err = base().kind(kind).build(&config()).unwrap_err();
            assert!(matches!(err, SdkError::InvalidArgument(_)), "{:?}", kind);
        }
    }
}
