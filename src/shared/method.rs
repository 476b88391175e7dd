//! Gateway service methods.

closed_set! {
    /// Remote operation a request targets. The wire token is sent verbatim as
    /// the `method` field of every gateway request.
    pub enum ServiceMethod {
        // trade
        OrderNo => "order_no",
        PreviewOrder => "preview_order",
        PlaceOrder => "place_order",
        BatchPlaceOrder => "batch_place_order",
        CancelOrder => "cancel_order",
        ModifyOrder => "modify_order",

        // quote
        MarketState => "market_state",
        AllSymbols => "all_symbols",
        AllSymbolNames => "all_symbol_names",
        Brief => "brief",
        StockDetail => "stock_detail",
        Timeline => "timeline",
        HourTradingTimeline => "hour_trading_timeline",
        Kline => "kline",
        TradeTick => "trade_tick",

        // option quote
        OptionExpiration => "option_expiration",
        OptionChain => "option_chain",
        OptionBrief => "option_brief",
        OptionKline => "option_kline",
        OptionTradeTick => "option_trade_tick",

        // account / assets
        Accounts => "accounts",
        Assets => "assets",
        Positions => "positions",
        Orders => "orders",
        ActiveOrders => "active_orders",
        InactiveOrders => "inactive_orders",
        FilledOrders => "filled_orders",

        // contract
        Contract => "contract",
    }
}

impl ServiceMethod {
    /// Whether replaying the call cannot change account state.
    ///
    /// Drives the transport's retry policy: anything that creates, cancels or
    /// amends an order is never retried.
    pub fn is_idempotent(&self) -> bool {
        !matches!(
            self,
            Self::OrderNo
                | Self::PlaceOrder
                | Self::BatchPlaceOrder
                | Self::CancelOrder
                | Self::ModifyOrder
        )
    }
}
