//! Client config loader (strict parsing).

pub mod endpoint;
pub mod schema;

use std::fs;

use wbem_core::error::{Result, WbemError};

pub use endpoint::{Endpoint, Scheme, DEFAULT_NAMESPACE};
pub use schema::{ClientConfig, ConnectionSection, ListenerSection, SubscriptionSection};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| WbemError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig =
        serde_yaml::from_str(s).map_err(|e| WbemError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
