//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_TYPE, HOST, TE};
use reqwest::Client;
use wbem_core::error::{Result, WbemError};
use wbem_core::model::message::PROTOCOL_VERSION;

use super::{CimRequest, CimResponse, Transport};
use crate::config::Endpoint;

pub const CONTENT_TYPE_XML: &str = "application/xml; charset=\"utf-8\"";

/// Characters %-escaped in the `CIMObject` header, on top of controls and
/// non-ASCII: everything outside the URI character set.
const CIM_OBJECT_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub struct HttpTransport {
    client: Client,
    endpoint: Endpoint,
    url: String,
}

impl HttpTransport {
    pub fn new(endpoint: Endpoint, timeout: Duration, verify_tls: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| WbemError::Transport(format!("http client init failed: {e}")))?;
        let url = endpoint.post_url();
        Ok(Self {
            client,
            endpoint,
            url,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn headers(&self, req: &CimRequest) -> Result<HeaderMap> {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_XML));
        h.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));
        h.insert(TE, HeaderValue::from_static("trailers"));
        h.insert(HOST, header_value(&self.endpoint.authority())?);
        h.insert("CIMOperation", HeaderValue::from_static("MethodCall"));
        h.insert("CIMProtocolVersion", HeaderValue::from_static(PROTOCOL_VERSION));
        h.insert("CIMMethod", header_value(&req.method)?);
        h.insert("CIMObject", header_value(&cim_object_header(&req.object))?);
        Ok(h)
    }
}

/// `CIMObject` value: the rendered path with URI-unsafe bytes %-escaped.
pub fn cim_object_header(object: &str) -> String {
    utf8_percent_encode(object, CIM_OBJECT_ESCAPE).to_string()
}

fn header_value(v: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(v)
        .map_err(|_| WbemError::Transport(format!("invalid header value: {v:?}")))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, req: CimRequest) -> Result<CimResponse> {
        let mut rb = self
            .client
            .post(&self.url)
            .headers(self.headers(&req)?)
            .body(req.body);
        if let Some(user) = &self.endpoint.username {
            rb = rb.basic_auth(user, self.endpoint.password.as_deref());
        }

        let resp = rb.send().await.map_err(map_reqwest)?;
        let status = resp.status();
        let cim_error = resp
            .headers()
            .get("CIMError")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await.map_err(map_reqwest)?;

        Ok(CimResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            cim_error,
            body,
        })
    }
}

fn map_reqwest(e: reqwest::Error) -> WbemError {
    if e.is_timeout() {
        WbemError::Timeout
    } else {
        WbemError::Transport(e.to_string())
    }
}
