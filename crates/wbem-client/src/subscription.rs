//! Indication subscription life-cycle.
//!
//! A subscription is three instances on the server: a filter selecting the
//! indications, a listener destination pointing back at us, and the
//! subscription associating the two. All three are keyed by this host's
//! system name and a configurable name prefix.

use std::net::{IpAddr, SocketAddr};

use tokio::net::UdpSocket;
use wbem_core::error::{Result, WbemError};
use wbem_core::model::{
    CimProperty, Instance, InstanceName, KeyBinding, LocalInstancePath, LocalNamespacePath,
    PropertyReference, ValueReference,
};
use wbem_core::CimStatus;

use crate::config::SubscriptionSection;
use crate::operations::WbemClient;

pub const FILTER_CLASS: &str = "CIM_IndicationFilter";
pub const DESTINATION_CLASS: &str = "CIM_ListenerDestinationCIMXML";
pub const SUBSCRIPTION_CLASS: &str = "CIM_IndicationSubscription";
pub const SYSTEM_CLASS: &str = "CIM_ComputerSystem";

/// Everything needed to build the three subscription instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionParams {
    /// Value of the `SystemName` keys (this host's name).
    pub system_name: String,
    pub name_prefix: String,
    pub query_language: String,
    pub query: String,
    pub source_namespace: String,
    /// Address the listener is reachable on from the server.
    pub destination: SocketAddr,
}

impl SubscriptionParams {
    pub fn from_config(
        section: &SubscriptionSection,
        system_name: impl Into<String>,
        destination: SocketAddr,
    ) -> Self {
        Self {
            system_name: system_name.into(),
            name_prefix: section.name_prefix.clone(),
            query_language: section.query_language.clone(),
            query: section.query.clone(),
            source_namespace: section.source_namespace.clone(),
            destination,
        }
    }

    pub fn filter_name(&self) -> String {
        format!("{}:DefaultFilter", self.name_prefix)
    }

    pub fn destination_name(&self) -> String {
        format!("{}:{}", self.name_prefix, self.destination.ip())
    }

    /// `http://ip:port` the server delivers indications to.
    pub fn destination_url(&self) -> String {
        format!("http://{}", self.destination)
    }

    pub fn filter_instance(&self) -> Instance {
        Instance::new(FILTER_CLASS)
            .with_string("QueryLanguage", self.query_language.as_str())
            .with_string("Query", self.query.as_str())
            .with_string("SourceNamespace", self.source_namespace.as_str())
            .with_string("Name", self.filter_name())
            .with_string("CreationClassName", FILTER_CLASS)
            .with_string("SystemName", self.system_name.as_str())
            .with_string("SystemCreationClassName", SYSTEM_CLASS)
    }

    pub fn destination_instance(&self) -> Instance {
        Instance::new(DESTINATION_CLASS)
            .with_string("Destination", self.destination_url())
            .with_string("SystemCreationClassName", SYSTEM_CLASS)
            .with_string("SystemName", self.system_name.as_str())
            .with_string("CreationClassName", DESTINATION_CLASS)
            .with_string("Name", self.destination_name())
    }

    /// Subscription referencing the filter and destination, both resolved in
    /// `namespace` (the namespace the instances are created in).
    pub fn subscription_instance(&self, namespace: &str) -> Instance {
        Instance::new(SUBSCRIPTION_CLASS)
            .with_property(reference_property(
                "Handler",
                DESTINATION_CLASS,
                self.destination_reference(namespace),
            ))
            .with_property(reference_property(
                "Filter",
                FILTER_CLASS,
                self.filter_reference(namespace),
            ))
    }

    pub fn filter_path(&self) -> InstanceName {
        self.keyed(FILTER_CLASS, self.filter_name())
    }

    pub fn destination_path(&self) -> InstanceName {
        self.keyed(DESTINATION_CLASS, self.destination_name())
    }

    /// Name of the subscription instance: its `Filter` and `Handler` keys
    /// reference the other two instances in `namespace`.
    pub fn subscription_path(&self, namespace: &str) -> InstanceName {
        InstanceName::new(SUBSCRIPTION_CLASS)
            .with_binding(KeyBinding::reference(
                "Filter",
                self.filter_reference(namespace),
            ))
            .with_binding(KeyBinding::reference(
                "Handler",
                self.destination_reference(namespace),
            ))
    }

    fn filter_reference(&self, namespace: &str) -> ValueReference {
        local_reference(namespace, self.filter_path())
    }

    fn destination_reference(&self, namespace: &str) -> ValueReference {
        local_reference(namespace, self.destination_path())
    }

    fn keyed(&self, class: &str, name: String) -> InstanceName {
        InstanceName::new(class)
            .with_key("SystemCreationClassName", SYSTEM_CLASS)
            .with_key("SystemName", self.system_name.as_str())
            .with_key("CreationClassName", class)
            .with_key("Name", name)
    }
}

fn local_reference(namespace: &str, instance_name: InstanceName) -> ValueReference {
    ValueReference::LocalInstancePath(LocalInstancePath {
        namespace: LocalNamespacePath::parse(namespace),
        instance_name,
    })
}

fn reference_property(property: &str, class: &str, value: ValueReference) -> CimProperty {
    CimProperty::Reference(PropertyReference {
        name: property.to_string(),
        reference_class: Some(class.to_string()),
        value: Some(value),
        ..PropertyReference::default()
    })
}

/// Create filter, destination, and subscription in that order. Instances
/// that already exist are left as they are.
pub async fn subscribe(client: &WbemClient, params: &SubscriptionParams) -> Result<()> {
    let steps = [
        ("filter", params.filter_instance()),
        ("destination", params.destination_instance()),
        ("subscription", params.subscription_instance(client.namespace())),
    ];
    for (what, instance) in steps {
        match client.create_instance(&instance).await {
            Ok(_) => tracing::info!(what, class = %instance.class_name, "created"),
            Err(e) if has_status(&e, CimStatus::AlreadyExists) => {
                tracing::info!(what, class = %instance.class_name, "already exists")
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Delete this host's subscription, destination, and filter in that order.
/// Instances that are already gone are skipped. Returns how many were deleted.
pub async fn unsubscribe(client: &WbemClient, params: &SubscriptionParams) -> Result<usize> {
    let steps = [
        ("subscription", params.subscription_path(client.namespace())),
        ("destination", params.destination_path()),
        ("filter", params.filter_path()),
    ];
    let mut deleted = 0;
    for (what, name) in steps {
        match client.delete_instance(&name).await {
            Ok(()) => {
                tracing::info!(what, class = %name.class_name, "deleted");
                deleted += 1;
            }
            Err(e) if has_status(&e, CimStatus::NotFound) => {
                tracing::info!(what, class = %name.class_name, "not found")
            }
            Err(e) => return Err(e),
        }
    }
    Ok(deleted)
}

/// Delete every subscription, destination, and filter instance visible in
/// the client's namespace. Returns how many were deleted.
pub async fn clean_subscriptions(client: &WbemClient) -> Result<usize> {
    let mut deleted = 0;
    for class in [SUBSCRIPTION_CLASS, DESTINATION_CLASS, FILTER_CLASS] {
        let names = client.enumerate_instance_names(class).await?;
        tracing::info!(class, count = names.len(), "cleaning");
        for name in &names {
            client.delete_instance(name).await?;
            deleted += 1;
        }
    }
    Ok(deleted)
}

fn has_status(e: &WbemError, status: CimStatus) -> bool {
    matches!(e, WbemError::Cim { error, .. } if error.status() == status)
}

/// This host's name, used for the `SystemName` keys.
pub fn system_name() -> Result<String> {
    hostname::get()
        .map_err(|e| WbemError::Config(format!("hostname lookup failed: {e}")))?
        .into_string()
        .map_err(|_| WbemError::Config("hostname is not valid UTF-8".into()))
}

/// Local address the OS would use to reach `host`. No packet is sent.
pub async fn local_ip_towards(host: &str) -> Result<IpAddr> {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let bind = if host.contains(':') { "[::]:0" } else { "0.0.0.0:0" };
    let sock = UdpSocket::bind(bind)
        .await
        .map_err(|e| WbemError::Transport(format!("udp bind failed: {e}")))?;
    sock.connect((host, 80))
        .await
        .map_err(|e| WbemError::Transport(format!("no route to {host}: {e}")))?;
    sock.local_addr()
        .map(|a| a.ip())
        .map_err(|e| WbemError::Transport(format!("local address unavailable: {e}")))
}
