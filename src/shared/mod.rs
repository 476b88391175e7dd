//! Closed-set constants shared across all domain modules.
//!
//! Every enum here serializes to the exact uppercase token the gateway uses
//! (`"BUY"`, `"STP_LMT"`, `"USD"`, ...). Parsing a string that is not a member
//! of the set fails with [`SdkError::UnknownEnumValue`]; nothing is coerced.

/// Declares a closed-set enum with its wire token, `as_str`, `Display` and a
/// strict `FromStr`.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::SdkError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::error::SdkError::unknown(stringify!($name), other)),
                }
            }
        }
    };
}

pub mod method;

pub use method::ServiceMethod;

// ─── ActionType ──────────────────────────────────────────────────────────────

closed_set! {
    /// Order direction.
    pub enum ActionType {
        Buy => "BUY",
        Sell => "SELL",
    }
}

// ─── OrderType ───────────────────────────────────────────────────────────────

closed_set! {
    /// Order types accepted by `place_order`.
    pub enum OrderType {
        Market => "MKT",
        Limit => "LMT",
        Stop => "STP",
        StopLimit => "STP_LMT",
        Trail => "TRAIL",
    }
}

// ─── Currency ────────────────────────────────────────────────────────────────

closed_set! {
    pub enum Currency {
        Usd => "USD",
        Hkd => "HKD",
        Cnh => "CNH",
        Sgd => "SGD",
    }
}

// ─── SecType ─────────────────────────────────────────────────────────────────

closed_set! {
    /// Security type of a contract.
    pub enum SecType {
        Stock => "STK",
        Option => "OPT",
        Warrant => "WAR",
        InlineWarrant => "IOPT",
        Future => "FUT",
        FutureOption => "FOP",
        Cash => "CASH",
        Fund => "FUND",
    }
}

// ─── TimeInForce ─────────────────────────────────────────────────────────────

closed_set! {
    pub enum TimeInForce {
        Day => "DAY",
        GoodTillCancel => "GTC",
        AtTheOpening => "OPG",
    }
}

// ─── AttachType ──────────────────────────────────────────────────────────────

closed_set! {
    /// Exit strategy attached to a base order. One kind per order.
    pub enum AttachType {
        Profit => "PROFIT",
        Loss => "LOSS",
        Brackets => "BRACKETS",
    }
}

// ─── Market ──────────────────────────────────────────────────────────────────

closed_set! {
    pub enum Market {
        All => "ALL",
        Us => "US",
        Hk => "HK",
        Cn => "CN",
        Sg => "SG",
    }
}
