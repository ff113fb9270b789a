//! Indication listener (CIM export server).
//!
//! Accepts `SIMPLEEXPREQ` / `MULTIEXPREQ` documents POSTed to any path,
//! hands each exported instance to an [`IndicationHandler`], and acknowledges
//! with an `EXPMETHODRESPONSE`. Bodies that do not decode get HTTP 400 and
//! `CIMError: request-not-valid`.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use bytes::Bytes;
use serde::Serialize;
use wbem_core::encode::export_response;
use wbem_core::error::{Result, WbemError};
use wbem_core::model::{Cim, Instance, MessageKind, SimpleExpReq};

use crate::transport::http::CONTENT_TYPE_XML;

/// One exported instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indication {
    /// Export method name, normally `ExportIndication`.
    pub method: String,
    /// `EXPPARAMVALUE` name, normally `NewIndication`.
    pub param: String,
    pub instance: Instance,
}

impl Indication {
    pub fn message(&self) -> Option<&str> {
        self.instance.value("Message")
    }

    pub fn indication_time(&self) -> Option<&str> {
        self.instance.value("IndicationTime")
    }
}

#[async_trait]
pub trait IndicationHandler: Send + Sync {
    async fn handle(&self, indication: Indication);
}

/// Prints `IndicationTime - Message` per indication on stdout.
pub struct PrintHandler;

#[async_trait]
impl IndicationHandler for PrintHandler {
    async fn handle(&self, indication: Indication) {
        println!(
            "{} - {}",
            indication.indication_time().unwrap_or_default(),
            indication.message().unwrap_or_default()
        );
    }
}

#[derive(Clone)]
struct ListenerState {
    handler: Arc<dyn IndicationHandler>,
}

pub fn build_router(handler: Arc<dyn IndicationHandler>) -> Router {
    Router::new()
        .fallback(receive)
        .with_state(ListenerState { handler })
}

pub async fn serve(listen: SocketAddr, handler: Arc<dyn IndicationHandler>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| WbemError::Transport(format!("listener bind failed ({listen}): {e}")))?;
    tracing::info!(%listen, "indication listener starting");
    axum::serve(listener, build_router(handler))
        .await
        .map_err(|e| WbemError::Transport(format!("listener failed: {e}")))
}

async fn receive(State(state): State<ListenerState>, method: Method, body: Bytes) -> Response {
    if method != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let requests = match decode_requests(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting export request");
            return (
                StatusCode::BAD_REQUEST,
                [("CIMExport", "MethodResponse"), ("CIMError", "request-not-valid")],
            )
                .into_response();
        }
    };

    let mut responses = Vec::with_capacity(requests.len());
    for req in &requests {
        let method = req.call.name.as_str();
        for p in &req.call.params {
            let Some(instance) = &p.instance else {
                continue;
            };
            tracing::debug!(method, class = %instance.class_name, "indication received");
            state
                .handler
                .handle(Indication {
                    method: method.to_string(),
                    param: p.name.clone(),
                    instance: instance.clone(),
                })
                .await;
        }
        responses.push(export_response(method, None));
    }

    match encode_responses(responses, requests.len() > 1) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                ("Content-Type", CONTENT_TYPE_XML),
                ("CIMExport", "MethodResponse"),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "export response encoding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn decode_requests(body: &[u8]) -> Result<Vec<SimpleExpReq>> {
    let doc = Cim::from_bytes(body)?;
    match doc.into_message().map(|m| m.kind) {
        Some(MessageKind::SimpleExpReq(r)) => Ok(vec![r]),
        Some(MessageKind::MultiExpReq(r)) if !r.is_empty() => Ok(r),
        _ => Err(WbemError::malformed("expected SIMPLEEXPREQ or MULTIEXPREQ")),
    }
}

/// One `SIMPLEEXPRSP` per request, wrapped in `MULTIEXPRSP` when batched.
fn encode_responses(responses: Vec<Cim>, batched: bool) -> Result<Vec<u8>> {
    if !batched {
        return match responses.into_iter().next() {
            Some(doc) => doc.to_bytes(),
            None => Err(WbemError::malformed("no export request to acknowledge")),
        };
    }
    let rsps = responses
        .into_iter()
        .filter_map(Cim::into_message)
        .filter_map(|m| match m.kind {
            MessageKind::SimpleExpRsp(r) => Some(r),
            _ => None,
        })
        .collect();
    Cim::message(MessageKind::MultiExpRsp(rsps)).to_bytes()
}
