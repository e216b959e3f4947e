//! Typed Rust client for the Kavenegar REST API.
//!
//! The design splits into three layers: a domain layer of validated values
//! and the parameter model, a transport layer for the wire-format quirks
//! (keyed URLs, form encoding with JSON-text arrays, the response envelope),
//! and a client layer orchestrating requests. Every endpoint wrapper funnels
//! through [`KavenegarClient::translate`].
//!
//! ```rust,no_run
//! use kavenegar::{ApiKey, KavenegarClient, RequestParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kavenegar::KavenegarError> {
//!     let client = KavenegarClient::new(ApiKey::new("...")?);
//!     let params = RequestParams::new()
//!         .with("receptor", vec!["09123456789"])
//!         .with("message", "hello");
//!     let _entries = client.sms_send(params).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxFuture, CallOptions, DEFAULT_CHUNK_SIZE, DEFAULT_TIMEOUT, HealthReport, HttpTransport,
    KavenegarClient, KavenegarClientBuilder, KavenegarError, RawResponse, WebhookPayload,
};
pub use domain::{
    ApiKey, MessageText, ParamValue, ProxyUrl, Receptor, RequestParams, SenderLine,
    ValidationError,
};
pub use transport::EnvelopeStatus;
