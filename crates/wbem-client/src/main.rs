//! wbemcli: one-shot CIM operations from the command line.
//!
//! Connection settings come from `--config <yaml>` or `--url`; results are
//! printed as pretty JSON. `subscribe`, `unsubscribe`, `listen`, and `clean` manage
//! indication subscriptions pointing back at this host.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use wbem_client::config::{self, ClientConfig, ConnectionSection, Endpoint};
use wbem_client::listener::{self, PrintHandler};
use wbem_client::operations::{
    EnumerateClassesOptions, EnumerateInstancesOptions, GetClassOptions, GetInstanceOptions,
};
use wbem_client::subscription::{self, SubscriptionParams};
use wbem_client::WbemClient;
use wbem_core::error::{Result, WbemError};
use wbem_core::model::{ClassName, InstanceName, ObjectName, ParamValue};

#[derive(Parser, Debug)]
#[command(name = "wbemcli", version, about = "CIM-XML operations over HTTP")]
struct Cli {
    /// YAML client config. Takes precedence over `--url`.
    #[arg(long)]
    config: Option<String>,

    /// scheme://[user[:pass]@]host[:port][/namespace]
    #[arg(long, env = "WBEM_URL")]
    url: Option<String>,

    /// Override the target namespace.
    #[arg(long)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GetClass
    Gc {
        class: String,
        #[arg(long)]
        all: bool,
        #[arg(long)]
        class_origin: bool,
    },
    /// EnumerateClasses
    Ec {
        class: Option<String>,
        #[arg(long)]
        deep: bool,
    },
    /// EnumerateClassNames
    Ecn {
        class: Option<String>,
        #[arg(long)]
        deep: bool,
    },
    /// EnumerateInstances
    Ei {
        class: String,
        #[arg(long)]
        shallow: bool,
    },
    /// EnumerateInstanceNames
    Ein { class: String },
    /// GetInstance
    Gi {
        class: String,
        #[arg(long = "key", value_parser = parse_pair)]
        keys: Vec<(String, String)>,
    },
    /// DeleteInstance
    Di {
        class: String,
        #[arg(long = "key", value_parser = parse_pair)]
        keys: Vec<(String, String)>,
    },
    /// ExecQuery
    Eq {
        query: String,
        #[arg(long, default_value = "WQL")]
        lang: String,
    },
    /// InvokeMethod on a class, or on an instance when keys are given
    Im {
        class: String,
        method: String,
        #[arg(long = "key", value_parser = parse_pair)]
        keys: Vec<(String, String)>,
        #[arg(long = "param", value_parser = parse_pair)]
        params: Vec<(String, String)>,
    },
    /// EnumerateQualifiers
    Qualifiers,
    /// Create filter, destination, and subscription, then listen
    Subscribe {
        #[arg(long)]
        no_listen: bool,
    },
    /// Delete this host's subscription, destination, and filter
    Unsubscribe,
    /// Run the indication listener only
    Listen,
    /// Delete all subscriptions, destinations, and filters
    Clean,
}

fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))
}

fn instance_name(class: &str, keys: Vec<(String, String)>) -> InstanceName {
    keys.into_iter()
        .fold(InstanceName::new(class), |n, (k, v)| n.with_key(k, v))
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    match (&cli.config, &cli.url) {
        (Some(path), _) => config::load_from_file(path),
        (None, Some(url)) => {
            let cfg = ClientConfig {
                version: 1,
                connection: ConnectionSection::for_url(url.as_str()),
                listener: Default::default(),
                subscription: Default::default(),
            };
            cfg.validate()?;
            Ok(cfg)
        }
        (None, None) => Err(WbemError::Config("either --config or --url is required".into())),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|e| WbemError::malformed(format!("json encode failed: {e}")))?;
    println!("{s}");
    Ok(())
}

/// Names this host's subscription instances after the local address the
/// server is reached from.
async fn subscription_params(
    cfg: &ClientConfig,
    endpoint: &Endpoint,
) -> Result<SubscriptionParams> {
    let listen = cfg.listener.listen_addr()?;
    let ip = subscription::local_ip_towards(&endpoint.host).await?;
    Ok(SubscriptionParams::from_config(
        &cfg.subscription,
        subscription::system_name()?,
        (ip, listen.port()).into(),
    ))
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli)?;
    let endpoint = cfg.connection.endpoint()?;
    let mut client = WbemClient::from_config(&cfg.connection)?;
    if let Some(ns) = &cli.namespace {
        client = client.with_namespace(ns.as_str());
    }
    tracing::debug!(?endpoint, namespace = client.namespace(), "wbemcli");

    match cli.command {
        Command::Gc {
            class,
            all,
            class_origin,
        } => {
            let opts = GetClassOptions {
                local_only: !all,
                include_class_origin: class_origin,
                ..GetClassOptions::default()
            };
            print_json(&client.get_class(&class, opts).await?)
        }
        Command::Ec { class, deep } => {
            let opts = EnumerateClassesOptions {
                deep_inheritance: deep,
                ..EnumerateClassesOptions::default()
            };
            print_json(&client.enumerate_classes(class.as_deref(), opts).await?)
        }
        Command::Ecn { class, deep } => {
            print_json(&client.enumerate_class_names(class.as_deref(), deep).await?)
        }
        Command::Ei { class, shallow } => {
            let opts = EnumerateInstancesOptions {
                deep_inheritance: !shallow,
                ..EnumerateInstancesOptions::default()
            };
            print_json(&client.enumerate_instances(&class, opts).await?)
        }
        Command::Ein { class } => print_json(&client.enumerate_instance_names(&class).await?),
        Command::Gi { class, keys } => {
            let name = instance_name(&class, keys);
            print_json(&client.get_instance(&name, GetInstanceOptions::default()).await?)
        }
        Command::Di { class, keys } => {
            client.delete_instance(&instance_name(&class, keys)).await?;
            println!("Done!");
            Ok(())
        }
        Command::Eq { query, lang } => print_json(&client.exec_query(&lang, &query).await?),
        Command::Im {
            class,
            method,
            keys,
            params,
        } => {
            let target = if keys.is_empty() {
                ObjectName::Class(ClassName::new(class))
            } else {
                ObjectName::Instance(instance_name(&class, keys))
            };
            let params = params
                .into_iter()
                .map(|(k, v)| ParamValue::new(k, v))
                .collect();
            let (code, out) = client.invoke_method(&target, &method, params).await?;
            print_json(&serde_json::json!({ "return": code, "out": out }))
        }
        Command::Qualifiers => print_json(&client.enumerate_qualifiers().await?),
        Command::Subscribe { no_listen } => {
            let listen = cfg.listener.listen_addr()?;
            let params = subscription_params(&cfg, &endpoint).await?;
            if no_listen {
                return subscription::subscribe(&client, &params).await;
            }
            let server = tokio::spawn(listener::serve(listen, Arc::new(PrintHandler)));
            subscription::subscribe(&client, &params).await?;
            println!("Subscribed; delivering to {}", params.destination_url());
            server
                .await
                .map_err(|e| WbemError::Transport(format!("listener task failed: {e}")))?
        }
        Command::Unsubscribe => {
            let params = subscription_params(&cfg, &endpoint).await?;
            let n = subscription::unsubscribe(&client, &params).await?;
            println!("Deleted {n} instance(s)");
            Ok(())
        }
        Command::Listen => {
            listener::serve(cfg.listener.listen_addr()?, Arc::new(PrintHandler)).await
        }
        Command::Clean => {
            let n = subscription::clean_subscriptions(&client).await?;
            println!("Deleted {n} instance(s)");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERR - {e}");
            ExitCode::FAILURE
        }
    }
}
