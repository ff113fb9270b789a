use std::sync::Arc;

use bytes::Bytes;
use wbem_core::encode::EncodedCall;
use wbem_core::error::{Result, WbemError};
use wbem_core::model::{
    Cim, ErrorElement, IMethodResponseBody, IReturnValue, MessageKind, MethodResponseBody,
    ParamValue, ReturnValue, SimpleRsp,
};

use crate::transport::{CimRequest, Transport};

/// Sends encoded calls and unwraps the `SIMPLERSP` envelope.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    log_wire: bool,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, log_wire: bool) -> Self {
        Self {
            transport,
            log_wire,
        }
    }

    /// One round trip. Non-200 statuses and undecodable bodies are errors;
    /// an `ERROR` element inside the response is left for the caller.
    pub async fn dispatch(&self, call: EncodedCall) -> Result<SimpleRsp> {
        let body = call.document.to_bytes()?;
        if self.log_wire {
            tracing::debug!(
                method = %call.method,
                object = %call.object,
                body = %String::from_utf8_lossy(&body),
                "cim request"
            );
        }

        let resp = self
            .transport
            .post(CimRequest {
                method: call.method.clone(),
                object: call.object,
                body: Bytes::from(body),
            })
            .await?;

        if self.log_wire {
            tracing::debug!(
                status = resp.status,
                body = %String::from_utf8_lossy(&resp.body),
                "cim response"
            );
        }

        if resp.status != 200 {
            let message = match &resp.cim_error {
                Some(e) => format!("{} ({e})", resp.reason),
                None => resp.reason.clone(),
            };
            tracing::warn!(method = %call.method, status = resp.status, %message, "http error");
            return Err(WbemError::Http {
                status: resp.status,
                message,
            });
        }

        let doc = Cim::from_bytes(&resp.body).map_err(|e| e.with_body(&resp.body))?;
        match doc.into_message().map(|m| m.kind) {
            Some(MessageKind::SimpleRsp(rsp)) => Ok(rsp),
            other => {
                let found = other.as_ref().map(kind_name).unwrap_or("DECLARATION");
                tracing::debug!(method = %call.method, found, "response is not SIMPLERSP");
                Err(WbemError::malformed(format!("expected SIMPLERSP, found {found}"))
                    .with_body(&resp.body))
            }
        }
    }

    /// Intrinsic call: yields the `IRETURNVALUE`, absent when the server sent
    /// none.
    pub async fn intrinsic(&self, call: EncodedCall) -> Result<Option<IReturnValue>> {
        let method = call.method.clone();
        match self.dispatch(call).await? {
            SimpleRsp::Intrinsic(r) => match r.body {
                IMethodResponseBody::Error(e) => Err(protocol_error(&method, e)),
                IMethodResponseBody::Success { return_value, .. } => Ok(return_value),
            },
            SimpleRsp::Method(_) => Err(WbemError::malformed(format!(
                "{method}: expected IMETHODRESPONSE, found METHODRESPONSE"
            ))),
        }
    }

    /// Extrinsic call: yields the return value and output parameters.
    pub async fn extrinsic(
        &self,
        call: EncodedCall,
    ) -> Result<(Option<ReturnValue>, Vec<ParamValue>)> {
        let method = call.method.clone();
        match self.dispatch(call).await? {
            SimpleRsp::Method(r) => match r.body {
                MethodResponseBody::Error(e) => Err(protocol_error(&method, e)),
                MethodResponseBody::Success {
                    return_value,
                    out_params,
                } => Ok((return_value, out_params)),
            },
            SimpleRsp::Intrinsic(_) => Err(WbemError::malformed(format!(
                "{method}: expected METHODRESPONSE, found IMETHODRESPONSE"
            ))),
        }
    }
}

fn protocol_error(method: &str, e: ErrorElement) -> WbemError {
    let error = e.cim_error();
    tracing::debug!(method, code = error.code(), name = error.name(), "cim error");
    WbemError::Cim {
        error,
        server_description: e.description,
    }
}

fn kind_name(kind: &MessageKind) -> &'static str {
    match kind {
        MessageKind::SimpleReq(_) => "SIMPLEREQ",
        MessageKind::MultiReq(_) => "MULTIREQ",
        MessageKind::SimpleRsp(_) => "SIMPLERSP",
        MessageKind::MultiRsp(_) => "MULTIRSP",
        MessageKind::SimpleExpReq(_) => "SIMPLEEXPREQ",
        MessageKind::MultiExpReq(_) => "MULTIEXPREQ",
        MessageKind::SimpleExpRsp(_) => "SIMPLEEXPRSP",
        MessageKind::MultiExpRsp(_) => "MULTIEXPRSP",
    }
}
