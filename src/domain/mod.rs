//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: request payloads (`ApiModel` impls) and the typed `data` they
//!   answer with
//! - `client.rs`: sub-client that dispatches through `TigerClient`
//!
//! `trade` additionally holds the order builder and the attach operations.

pub mod contract;
pub mod quote;
pub mod trade;
