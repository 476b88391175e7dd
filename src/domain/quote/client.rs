//! Quotes sub-client.

use crate::client::TigerClient;
use crate::domain::quote::{MarketState, MarketStateModel, QuoteAskBidModel, RealTimeQuote};
use crate::envelope::RequestEnvelope;
use crate::error::SdkError;
use crate::shared::Market;

/// Sub-client for quote operations.
pub struct Quotes<'a> {
    pub(crate) client: &'a TigerClient,
}

impl<'a> Quotes<'a> {
    /// Real-time quotes, best bid/ask included.
    pub async fn briefs<S: AsRef<str>>(
        &self,
        symbols: &[S],
        market: Option<Market>,
    ) -> Result<Vec<RealTimeQuote>, SdkError> {
        let model = QuoteAskBidModel::new(symbols, market)?;
        self.client.execute_data(&self.envelope(model)).await
    }

    pub async fn market_state(&self, market: Market) -> Result<Vec<MarketState>, SdkError> {
        let model = MarketStateModel { market };
        self.client.execute_data(&self.envelope(model)).await
    }

    fn envelope<M: crate::envelope::ApiModel>(&self, model: M) -> RequestEnvelope<M> {
        RequestEnvelope::new(model).with_version(self.client.config.version.clone())
    }
}
