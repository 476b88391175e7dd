//! Builders that fall back to the process-wide config.
//!
//! Kept in its own test binary: the global can only be installed once.

use rust_decimal::Decimal;
use tiger_openapi::config;
use tiger_openapi::prelude::*;

fn order() -> TradeOrderBuilder {
    TradeOrderBuilder::new()
        .contract(ContractItem::stock("00700", Currency::Hkd))
        .buy()
        .quantity(100)
        .limit(Decimal::new(3204, 1))
}

#[test]
fn test_build_default_reads_installed_config() {
    config::install(
        ClientConfig::builder()
            .default_account("global1")
            .version("2.0")
            .build(),
    )
    .unwrap();

    let req = order().build_default().unwrap();
    assert_eq!(req.model().account, "global1");
    assert_eq!(req.model().currency, Some(Currency::Hkd));
    assert_eq!(req.version(), "2.0");

    let req = order().account("acc9").build_default().unwrap();
    assert_eq!(req.model().account, "acc9");

    // The client builder picks up the same config when none is given.
    struct Never;
    #[async_trait::async_trait]
    impl Transport for Never {
        async fn send(&self, _: TransportRequest<'_>) -> Result<Vec<u8>, SdkError> {
            Err(SdkError::Http(HttpError::Timeout))
        }
    }
    let client = TigerClient::builder()
        .transport(std::sync::Arc::new(Never))
        .build()
        .unwrap();
    assert_eq!(client.config().default_account.as_deref(), Some("global1"));
    let req = client.trade().build(order()).unwrap();
    assert_eq!(req.model().account, "global1");

    assert!(config::install(ClientConfig::default()).is_err());
}
