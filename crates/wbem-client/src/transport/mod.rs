//! Transport layer: one POST per CIM operation.
//!
//! The dispatcher talks to a [`Transport`] so tests can replay canned bodies
//! without a network.

pub mod http;

use async_trait::async_trait;
use bytes::Bytes;
use wbem_core::error::Result;

pub use http::HttpTransport;

/// Serialized operation request.
#[derive(Debug, Clone)]
pub struct CimRequest {
    /// `CIMMethod` header.
    pub method: String,
    /// `CIMObject` header.
    pub object: String,
    pub body: Bytes,
}

/// Raw response as seen on the wire.
#[derive(Debug, Clone)]
pub struct CimResponse {
    pub status: u16,
    pub reason: String,
    /// `CIMError` response header, if the server set one.
    pub cim_error: Option<String>,
    pub body: Bytes,
}

impl CimResponse {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            reason: "OK".into(),
            cim_error: None,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, req: CimRequest) -> Result<CimResponse>;
}
