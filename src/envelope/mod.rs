//! Request and response envelopes.
//!
//! - `request`: [`ApiModel`] (method → payload → response binding) and the
//!   typed [`RequestEnvelope`]
//! - `response`: [`ResponseEnvelope`], decoded into the bound response type
//! - `any`: [`AnyRequest`] / [`ApiPayload`] for payloads only known at runtime

pub mod any;
pub mod request;
pub mod response;

pub use any::{AnyRequest, ApiPayload};
pub use request::{ApiModel, RequestEnvelope};
pub use response::ResponseEnvelope;
