//! JSON-RPC over HTTP access to the Deribit API.
//!
//! [`transport`] moves raw bodies, [`rpc`] owns the envelope and its
//! validation, [`client`] exposes one typed method per endpoint.

pub mod client;
pub mod error;
pub mod models;
pub mod rpc;
pub mod transport;

pub use client::DeribitClient;
pub use error::{ExchangeError, ExchangeResult};
pub use models::{AccessToken, Credentials};
pub use rpc::RpcClient;
pub use transport::{HttpTransport, Transport};
