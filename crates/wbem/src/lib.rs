//! wbem-rs: a WBEM client speaking CIM-XML over HTTP.
//!
//! Depend on this crate alone to get the document model and encoder
//! (`core`), the operation catalog, subscription and listener (`client`),
//! and a `prelude` with the types most callers touch.

pub mod core {
    pub use wbem_core::*;
}

pub mod client {
    pub use wbem_client::*;
}

pub mod prelude {
    pub use wbem_client::config::{ClientConfig, Endpoint};
    pub use wbem_client::listener::{Indication, IndicationHandler};
    pub use wbem_client::operations::{PropertyValue, QueryObject};
    pub use wbem_client::WbemClient;
    pub use wbem_core::model::{Class, Instance, InstanceName, ObjectName, ParamValue};
    pub use wbem_core::{CimError, CimStatus, Result, WbemError};
}
