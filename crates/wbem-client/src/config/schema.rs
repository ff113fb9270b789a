use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use wbem_core::error::{Result, WbemError};

use super::endpoint::Endpoint;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    pub connection: ConnectionSection,

    #[serde(default)]
    pub listener: ListenerSection,

    #[serde(default)]
    pub subscription: SubscriptionSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WbemError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.connection.validate()?;
        self.listener.validate()?;
        self.subscription.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSection {
    pub url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Certificate validation is off unless asked for.
    #[serde(default)]
    pub verify_tls: bool,

    /// Trace request and response bodies.
    #[serde(default)]
    pub log_wire: bool,
}

impl ConnectionSection {
    /// Section with defaults for everything but the URL.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_ms: default_timeout_ms(),
            verify_tls: false,
            log_wire: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1000..=3_600_000).contains(&self.timeout_ms) {
            return Err(WbemError::Config(
                "connection.timeout_ms must be between 1000 and 3600000".into(),
            ));
        }
        self.endpoint()?;
        Ok(())
    }

    pub fn endpoint(&self) -> Result<Endpoint> {
        Endpoint::parse(&self.url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListenerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ListenerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ListenerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            WbemError::Config(format!(
                "listener.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionSection {
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,

    #[serde(default = "default_query_language")]
    pub query_language: String,

    #[serde(default = "default_query")]
    pub query: String,

    #[serde(default = "default_source_namespace")]
    pub source_namespace: String,
}

impl Default for SubscriptionSection {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
            query_language: default_query_language(),
            query: default_query(),
            source_namespace: default_source_namespace(),
        }
    }
}

impl SubscriptionSection {
    pub fn validate(&self) -> Result<()> {
        for (field, v) in [
            ("subscription.name_prefix", &self.name_prefix),
            ("subscription.query_language", &self.query_language),
            ("subscription.query", &self.query),
            ("subscription.source_namespace", &self.source_namespace),
        ] {
            if v.trim().is_empty() {
                return Err(WbemError::Config(format!("{field} must not be empty")));
            }
        }
        if self.name_prefix.contains(':') {
            return Err(WbemError::Config(
                "subscription.name_prefix must not contain ':'".into(),
            ));
        }
        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    300_000
}
fn default_listen() -> String {
    "0.0.0.0:59988".into()
}
fn default_name_prefix() -> String {
    "wbem-rs".into()
}
fn default_query_language() -> String {
    "WQL".into()
}
fn default_query() -> String {
    "SELECT * FROM CIM_AlertIndication".into()
}
fn default_source_namespace() -> String {
    "root/cimv2".into()
}
