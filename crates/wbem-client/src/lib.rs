//! wbem-client: CIM operations over HTTP.
//!
//! This crate wires the HTTP transport, the dispatcher, and the operation
//! catalog into a [`WbemClient`], and layers the indication subscription
//! life-cycle and listener on top. It is consumed by the `wbemcli` binary
//! and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod dispatch;
pub mod listener;
pub mod operations;
pub mod subscription;
pub mod transport;

pub use config::{ClientConfig, Endpoint, Scheme};
pub use dispatch::Dispatcher;
pub use operations::WbemClient;
pub use transport::{CimRequest, CimResponse, HttpTransport, Transport};
