//! Connection URL: `scheme://[user[:pass]@]host[:port][/namespace]`.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;
use wbem_core::error::{Result, WbemError};

pub const DEFAULT_NAMESPACE: &str = "root/cimv2";
pub const DEFAULT_PORT_HTTP: u16 = 5988;
pub const DEFAULT_PORT_HTTPS: u16 = 5989;
/// Request path every operation is posted to.
pub const REQUEST_PATH: &str = "cimom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Unrecognized schemes fall back to plain HTTP.
    fn from_url(s: &str) -> Self {
        if s.eq_ignore_ascii_case("https") {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => DEFAULT_PORT_HTTP,
            Scheme::Https => DEFAULT_PORT_HTTPS,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved connection target.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub namespace: String,
}

impl Endpoint {
    /// User, password, and namespace are percent-decoded. A port written in
    /// the URL is kept even when it is the scheme's usual one (`:80`).
    pub fn parse(s: &str) -> Result<Self> {
        let raw = s.trim();
        let url =
            Url::parse(raw).map_err(|e| WbemError::Config(format!("invalid url {s:?}: {e}")))?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| WbemError::Config(format!("url {s:?} has no host")))?
            .to_string();
        let scheme = Scheme::from_url(url.scheme());
        let port = url
            .port()
            .or_else(|| {
                has_explicit_port(raw)
                    .then(|| url.port_or_known_default())
                    .flatten()
            })
            .unwrap_or_else(|| scheme.default_port());
        let namespace = decode(url.path(), "namespace")?;
        let namespace = namespace.trim_matches('/');

        Ok(Self {
            scheme,
            host,
            port,
            username: Some(url.username())
                .filter(|u| !u.is_empty())
                .map(|u| decode(u, "user").map(Cow::into_owned))
                .transpose()?,
            password: url
                .password()
                .map(|p| decode(p, "password").map(Cow::into_owned))
                .transpose()?,
            namespace: if namespace.is_empty() {
                DEFAULT_NAMESPACE.to_string()
            } else {
                namespace.to_string()
            },
        })
    }

    /// `scheme://host:port/cimom`.
    pub fn post_url(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.scheme, self.host, self.port, REQUEST_PATH
        )
    }

    /// Value for the `Host` header.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("namespace", &self.namespace)
            .finish()
    }
}

fn decode<'a>(v: &'a str, what: &str) -> Result<Cow<'a, str>> {
    percent_decode_str(v)
        .decode_utf8()
        .map_err(|e| WbemError::Config(format!("url {what} is not valid UTF-8: {e}")))
}

/// Whether the authority in `raw` spells out `:port`. The URL parser drops a
/// port equal to the scheme default, so this is read from the text.
fn has_explicit_port(raw: &str) -> bool {
    let rest = raw.split_once("://").map_or(raw, |(_, r)| r);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let after_host = host_port.rsplit_once(']').map_or(host_port, |(_, p)| p);
    after_host
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}
