//! Attached exit orders: profit taker, stop loss, or both.
//!
//! An order has a single attach slot. Each `with_*` call replaces whatever was
//! attached before, kind and fields together: the last call wins and nothing
//! from an earlier call survives. Attach prices follow the same wire rule as
//! base order prices and are rejected when they cannot be sent exactly.

use crate::envelope::RequestEnvelope;
use crate::error::SdkError;
use crate::shared::{AttachType, TimeInForce};

use super::{wire_price, TradeOrderModel};

use rust_decimal::Decimal;

/// Exit strategy for a base order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    ProfitTaker {
        price: Decimal,
        tif: TimeInForce,
        rth: bool,
    },
    StopLoss {
        price: Decimal,
        tif: TimeInForce,
    },
    Bracket {
        profit_price: Decimal,
        profit_tif: TimeInForce,
        profit_rth: bool,
        loss_price: Decimal,
        loss_tif: TimeInForce,
    },
}

impl Attach {
    pub fn attach_type(&self) -> AttachType {
        match self {
            Attach::ProfitTaker { .. } => AttachType::Profit,
            Attach::StopLoss { .. } => AttachType::Loss,
            Attach::Bracket { .. } => AttachType::Brackets,
        }
    }

    pub fn check_prices(&self) -> Result<(), SdkError> {
        match *self {
            Attach::ProfitTaker { price, .. } => {
                wire_price("profit_taker_price", price)?;
            }
            Attach::StopLoss { price, .. } => {
                wire_price("stop_loss_price", price)?;
            }
            Attach::Bracket {
                profit_price,
                loss_price,
                ..
            } => {
                wire_price("profit_taker_price", profit_price)?;
                wire_price("stop_loss_price", loss_price)?;
            }
        }
        Ok(())
    }
}

impl TradeOrderModel {
    /// Replace the attach slot with `attach`.
    ///
    /// On error the model is left as it was.
    pub fn set_attach(&mut self, attach: Attach) -> Result<(), SdkError> {
        attach.check_prices()?;
        self.clear_attach();
        self.attach_type = Some(attach.attach_type());

        match attach {
            Attach::ProfitTaker { price, tif, rth } => {
                self.profit_taker_price = Some(price);
                self.profit_taker_tif = Some(tif);
                self.profit_taker_rth = Some(rth);
            }
            Attach::StopLoss { price, tif } => {
                self.stop_loss_price = Some(price);
                self.stop_loss_tif = Some(tif);
            }
            Attach::Bracket {
                profit_price,
                profit_tif,
                profit_rth,
                loss_price,
                loss_tif,
            } => {
                self.profit_taker_price = Some(profit_price);
                self.profit_taker_tif = Some(profit_tif);
                self.profit_taker_rth = Some(profit_rth);
                self.stop_loss_price = Some(loss_price);
                self.stop_loss_tif = Some(loss_tif);
            }
        }
        Ok(())
    }

    pub fn clear_attach(&mut self) {
        self.attach_type = None;
        self.profit_taker_price = None;
        self.profit_taker_tif = None;
        self.profit_taker_rth = None;
        self.stop_loss_price = None;
        self.stop_loss_tif = None;
    }
}

impl RequestEnvelope<TradeOrderModel> {
    /// New envelope with `attach` in the order's attach slot.
    pub fn with_attach(self, attach: Attach) -> Result<Self, SdkError> {
        self.try_map_model(|mut model| {
            model.set_attach(attach)?;
            Ok(model)
        })
    }

    /// Attach a profit-taker limit order.
    pub fn with_profit_taker(
        self,
        price: Decimal,
        tif: TimeInForce,
        rth: bool,
    ) -> Result<Self, SdkError> {
        self.with_attach(Attach::ProfitTaker { price, tif, rth })
    }

    /// Attach a stop-loss order.
    pub fn with_stop_loss(self, price: Decimal, tif: TimeInForce) -> Result<Self, SdkError> {
        self.with_attach(Attach::StopLoss { price, tif })
    }

    /// Attach both a profit taker and a stop loss.
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
