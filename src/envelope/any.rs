//! Untyped requests: a runtime sum over every known payload kind.
//!
//! Useful where the payload type is not known statically, e.g. requests read
//! back from a queue. Converting to a typed envelope, or applying an
//! order-only operation, checks the payload kind and fails with
//! [`SdkError::TypeMismatch`] instead of guessing.

use crate::domain::contract::ContractModel;
use crate::domain::quote::{MarketStateModel, QuoteAskBidModel};
use crate::domain::trade::{Attach, CancelOrderModel, TradeOrderModel};
use crate::error::SdkError;
use crate::shared::{ServiceMethod, TimeInForce};

use super::request::{ApiModel, RequestEnvelope};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Generates [`ApiPayload`] and the conversions between it and each model.
/// One line per payload kind.
macro_rules! payloads {
    ($($variant:ident($model:ty)),+ $(,)?) => {
        /// Payload of an [`AnyRequest`], tagged by service method.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "method", content = "biz_content", rename_all = "snake_case")]
        pub enum ApiPayload {
            $($variant($model),)+
        }

        impl ApiPayload {
            pub fn method(&self) -> ServiceMethod {
                match self {
                    $(ApiPayload::$variant(_) => <$model as ApiModel>::METHOD,)+
                }
            }

            /// The payload as the JSON string carried in `biz_content`.
            pub fn biz_content(&self) -> Result<String, SdkError> {
                match self {
                    $(ApiPayload::$variant(model) => Ok(serde_json::to_string(model)?),)+
                }
            }
        }

        $(
            impl From<$model> for ApiPayload {
                fn from(model: $model) -> Self {
                    ApiPayload::$variant(model)
                }
            }

            impl TryFrom<ApiPayload> for $model {
                type Error = SdkError;

                fn try_from(payload: ApiPayload) -> Result<Self, Self::Error> {
                    match payload {
                        ApiPayload::$variant(model) => Ok(model),
                        #[allow(unreachable_patterns)]
                        other => Err(SdkError::TypeMismatch {
                            expected: <$model as ApiModel>::METHOD.as_str(),
                            actual: other.method().as_str(),
                        }),
                    }
                }
            }
        )+
    };
}

payloads! {
    PlaceOrder(TradeOrderModel),
    CancelOrder(CancelOrderModel),
    Brief(QuoteAskBidModel),
    MarketState(MarketStateModel),
    Contract(ContractModel),
}

/// A request whose payload kind is only known at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyRequest {
    pub version: String,
    pub payload: ApiPayload,
}

impl AnyRequest {
    pub fn method(&self) -> ServiceMethod {
        self.payload.method()
    }

    pub fn biz_content(&self) -> Result<String, SdkError> {
        self.payload.biz_content()
    }

    /// Recover the typed envelope, checking the payload kind.
    pub fn into_typed<M>(self) -> Result<RequestEnvelope<M>, SdkError>
    where
        M: ApiModel + TryFrom<ApiPayload, Error = SdkError>,
    {
        let model = M::try_from(self.payload)?;
        Ok(RequestEnvelope::new(model).with_version(self.version))
    }

    /// Replace the attach slot of a trade order payload.
    pub fn with_attach(self, attach: Attach) -> Result<Self, SdkError> {
        let typed: RequestEnvelope<TradeOrderModel> = self.into_typed()?;
        Ok(typed.with_attach(attach)?.into())
    }

    pub fn with_profit_taker(self, price: Decimal, tif: TimeInForce, rth: bool) -> Result<Self, SdkError> {
        self.with_attach(Attach::ProfitTaker { price, tif, rth })
    }

    pub fn with_stop_loss(self, price: Decimal, tif: TimeInForce) -> Result<Self, SdkError> {
        self.with_attach(Attach::StopLoss { price, tif })
    }

    pub fn with_bracket(
        self,
        profit_price: Decimal,
        profit_tif: TimeInForce,
        profit_rth: bool,
        loss_price: Decimal,
        loss_tif: TimeInForce,
    ) -> Result<Self, SdkError> {
        self.with_attach(Attach::Bracket {
            profit_price,
            profit_tif,
            profit_rth,
            loss_price,
            loss_tif,
        })
    }
}

impl<M> From<RequestEnvelope<M>> for AnyRequest
where
    M: ApiModel + Into<ApiPayload>,
{
    fn from(envelope: RequestEnvelope<M>) -> Self {
        let version = envelope.version().to_string();
        AnyRequest {
            version,
            payload: envelope.into_model().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::domain::contract::ContractItem;
    use crate::domain::trade::TradeOrderBuilder;
    use crate::shared::{AttachType, Currency, Market};

    fn order() -> AnyRequest {
        TradeOrderBuilder::new()
            .account("acc1")
            .contract(ContractItem::stock("AAPL", Currency::Usd))
            .sell()
            .quantity(5)
            .stop(Decimal::new(95, 0))
            .build(&ClientConfig::default())
            .unwrap()
            .into()
    }

    fn brief() -> AnyRequest {
        RequestEnvelope::new(QuoteAskBidModel::new(&["AAPL"], Some(Market::Us)).unwrap()).into()
    }

    #[test]
    fn test_method_follows_payload() {
        assert_eq!(order().method(), ServiceMethod::PlaceOrder);
        assert_eq!(brief().method(), ServiceMethod::Brief);
    }

    #[test]
    fn test_into_typed_roundtrip() {
        let typed: RequestEnvelope<TradeOrderModel> = order().into_typed().unwrap();
        assert_eq!(typed.model().account, "acc1");
        assert_eq!(typed.version(), crate::network::DEFAULT_VERSION);
    }

    #[test]
    fn test_into_typed_wrong_kind() {
        let err = brief().into_typed::<TradeOrderModel>().unwrap_err();
        match err {
            SdkError::TypeMismatch { expected, actual } => {
                assert_eq!(expected, "place_order");
                assert_eq!(actual, "brief");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_attach_on_order_payload() {
        let req = order()
            .with_stop_loss(Decimal::new(90, 0), TimeInForce::Day)
            .unwrap();
        match req.payload {
            ApiPayload::PlaceOrder(model) => {
                assert_eq!(model.attach_type, Some(AttachType::Loss));
                assert_eq!(model.stop_loss_price, Some(Decimal::new(90, 0)));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_attach_on_quote_payload_is_type_mismatch() {
        let err = brief()
            .with_profit_taker(Decimal::ONE, TimeInForce::Day, true)
            .unwrap_err();
        assert!(matches!(err, SdkError::TypeMismatch { .. }));
    }

    #[test]
    fn test_serde_tagged_by_method() {
        let req = brief();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["payload"]["method"], "brief");
        assert_eq!(json["payload"]["biz_content"]["symbols"][0], "AAPL");

        let back: AnyRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, req);
    }
}
