//! Contracts sub-client.

use crate::client::TigerClient;
use crate::domain::contract::{ContractItem, ContractModel};
use crate::envelope::RequestEnvelope;
use crate::error::SdkError;
use crate::shared::SecType;

/// Sub-client for contract lookups.
pub struct Contracts<'a> {
    pub(crate) client: &'a TigerClient,
}

impl<'a> Contracts<'a> {
    /// Look up a contract for the default account.
    pub async fn get(&self, symbol: &str, sec_type: SecType) -> Result<ContractItem, SdkError> {
        let account = self.client.config.resolve_account(None)?;
        self.query(ContractModel::new(&account, symbol, sec_type)).await
    }

    pub async fn query(&self, model: ContractModel) -> Result<ContractItem, SdkError> {
        let request =
            RequestEnvelope::new(model).with_version(self.client.config.version.clone());
        self.client.execute_data(&request).await
    }
}
