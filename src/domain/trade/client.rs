//! Trade sub-client: build, place and cancel orders.

use crate::client::TigerClient;
use crate::domain::trade::{CancelOrderModel, PlacedOrder, TradeOrderBuilder, TradeOrderModel};
use crate::envelope::RequestEnvelope;
use crate::error::SdkError;

/// Sub-client for order operations.
pub struct Trade<'a> {
    pub(crate) client: &'a TigerClient,
}

impl<'a> Trade<'a> {
    /// Build `order` against this client's config.
    pub fn build(
        &self,
        order: TradeOrderBuilder,
    ) -> Result<RequestEnvelope<TradeOrderModel>, SdkError> {
        order.build(&self.client.config)
    }

    /// Submit a built order.
    pub async fn place(
        &self,
        order: &RequestEnvelope<TradeOrderModel>,
    ) -> Result<PlacedOrder, SdkError> {
        let placed = self.client.execute_data(order).await?;
        tracing::info!(
            id = placed.id,
            symbol = %order.model().symbol,
            action = %order.model().action,
            "order placed"
        );
        Ok(placed)
    }

    /// Cancel an order by its global id.
    pub async fn cancel(&self, account: Option<&str>, id: i64) -> Result<PlacedOrder, SdkError> {
        let account = self.client.config.resolve_account(account)?;
        let request = RequestEnvelope::new(CancelOrderModel { account, id })
            .with_version(self.client.config.version.clone());
        self.client.execute_data(&request).await
    }
}
