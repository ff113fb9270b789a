//! Operation catalog.
//!
//! Every operation validates its required arguments (failing without a
//! round trip), encodes the call, dispatches it, and unwraps the typed
//! payload. An absent or empty `IRETURNVALUE` yields an empty result, never
//! an error.

mod association;
mod class;
mod instance;
mod method;
pub mod options;
mod property;
mod qualifier;

use std::sync::Arc;
use std::time::Duration;

use wbem_core::encode::EncodedCall;
use wbem_core::error::{Result, WbemError};
use wbem_core::model::{IReturnValue, ParamValue, ReturnValue};

use crate::config::{ConnectionSection, Endpoint, DEFAULT_NAMESPACE};
use crate::dispatch::Dispatcher;
use crate::transport::{HttpTransport, Transport};

pub use instance::QueryObject;
pub use options::{
    AssociatorNamesOptions, AssociatorsOptions, EnumerateClassesOptions,
    EnumerateInstancesOptions, GetClassOptions, GetInstanceOptions, ModifyInstanceOptions,
    ReferenceNamesOptions, ReferencesOptions,
};
pub use property::PropertyValue;

/// Handle for issuing CIM operations against one namespace.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct WbemClient {
    dispatcher: Arc<Dispatcher>,
    namespace: String,
}

impl WbemClient {
    pub fn new(transport: Arc<dyn Transport>, namespace: impl Into<String>, log_wire: bool) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(transport, log_wire)),
            namespace: namespace_or_default(namespace.into()),
        }
    }

    /// HTTP client for `endpoint`, targeting the endpoint's namespace.
    pub fn connect(
        endpoint: &Endpoint,
        timeout: Duration,
        verify_tls: bool,
        log_wire: bool,
    ) -> Result<Self> {
        let transport = HttpTransport::new(endpoint.clone(), timeout, verify_tls)?;
        tracing::debug!(
            url = %endpoint.post_url(),
            namespace = %endpoint.namespace,
            verify_tls,
            "wbem client ready"
        );
        Ok(Self::new(
            Arc::new(transport),
            endpoint.namespace.clone(),
            log_wire,
        ))
    }

    pub fn from_config(conn: &ConnectionSection) -> Result<Self> {
        Self::connect(
            &conn.endpoint()?,
            conn.timeout(),
            conn.verify_tls,
            conn.log_wire,
        )
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Same transport, different target namespace. A blank namespace means
    /// `root/cimv2`.
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            namespace: namespace_or_default(namespace.into()),
        }
    }

    async fn intrinsic(&self, call: EncodedCall) -> Result<Option<IReturnValue>> {
        self.dispatcher.intrinsic(call).await
    }

    async fn extrinsic(&self, call: EncodedCall) -> Result<(Option<ReturnValue>, Vec<ParamValue>)> {
        self.dispatcher.extrinsic(call).await
    }
}

fn require(value: &str, name: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        Err(WbemError::MissingArgument(name))
    } else {
        Ok(())
    }
}

fn unexpected(method: &str, rv: &IReturnValue) -> WbemError {
    WbemError::malformed(format!(
        "{method}: unexpected {} in IRETURNVALUE",
        rv.kind()
    ))
}

fn namespace_or_default(namespace: String) -> String {
    match namespace.trim().trim_matches('/') {
        "" => DEFAULT_NAMESPACE.to_string(),
        ns => ns.to_string(),
    }
}
