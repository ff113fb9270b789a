//! Indication listener over a loopback socket.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wbem_client::listener::{build_router, Indication, IndicationHandler};

#[derive(Default)]
struct Collect {
    seen: Mutex<Vec<Indication>>,
}

#[async_trait]
impl IndicationHandler for Collect {
    async fn handle(&self, indication: Indication) {
        self.seen.lock().unwrap().push(indication);
    }
}

async fn start() -> (SocketAddr, Arc<Collect>) {
    let handler = Arc::new(Collect::default());
    let app = build_router(handler.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handler)
}

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

async fn post(addr: SocketAddr, body: String) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .header("CIMExport", "MethodRequest")
        .header("CIMExportMethod", "ExportIndication")
        .body(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn delivers_indication_and_acknowledges() {
    let (addr, handler) = start().await;
    let resp = post(addr, load("export_indication_req.xml")).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.headers()["CIMExport"], "MethodResponse");
    let body = resp.text().await.unwrap();
    assert!(body.contains("<SIMPLEEXPRSP><EXPMETHODRESPONSE NAME=\"ExportIndication\"/>"));

    let seen = handler.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "ExportIndication");
    assert_eq!(seen[0].param, "NewIndication");
    assert_eq!(seen[0].message(), Some("fan 2 failed"));
    assert_eq!(seen[0].indication_time(), Some("20261016101500.000000+000"));
}

#[tokio::test]
async fn batched_requests_get_batched_response() {
    let (addr, handler) = start().await;
    let resp = post(addr, load("export_multi_req.xml")).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("<MULTIEXPRSP>"));
    assert_eq!(body.matches("<SIMPLEEXPRSP>").count(), 2);

    let messages: Vec<String> = handler
        .seen
        .lock()
        .unwrap()
        .iter()
        .map(|i| i.message().unwrap_or_default().to_string())
        .collect();
    assert_eq!(messages, ["psu 1 lost input", "psu 1 restored"]);
}

#[tokio::test]
async fn undecodable_body_is_rejected() {
    let (addr, handler) = start().await;
    let resp = post(addr, "<CIM><MESSAGE".to_string()).await;

    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(resp.headers()["CIMError"], "request-not-valid");
    assert!(handler.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn operation_response_is_not_an_export() {
    let (addr, handler) = start().await;
    let resp = post(addr, load("get_class_rsp.xml")).await;
    assert_eq!(resp.status().as_u16(), 400);
    assert!(handler.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn only_post_is_accepted() {
    let (addr, _) = start().await;
    let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 405);
}
