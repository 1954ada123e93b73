//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{HeaderValue, Response};
use request_mux::{handler_fn, Handler, HttpServer, ServerConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A running server; shuts down when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Serve `handler` at `/items` on an ephemeral port.
pub async fn start_server(handler: impl Handler + 'static) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = HttpServer::new(ServerConfig::default()).mount("/items", handler);
    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    TestServer {
        addr,
        _shutdown: tx,
    }
}

/// Handler that writes `body` when called.
pub fn write_handler(body: &'static str) -> impl Handler {
    handler_fn(move |_req, res: &mut Response<Body>| {
        res.headers_mut()
            .insert("x-handler", HeaderValue::from_static(body));
        *res.body_mut() = Body::from(body);
    })
}

/// Send a request and return status, headers and body text.
#[allow(dead_code)]
pub async fn send(
    method: &str,
    url: &str,
    headers: &[(&str, &str)],
) -> (u16, reqwest::header::HeaderMap, String) {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let mut req = client.request(reqwest::Method::from_bytes(method.as_bytes()).unwrap(), url);
    for (name, value) in headers {
        req = req.header(*name, *value);
    }
    let res = req.send().await.expect("server unreachable");
    let status = res.status().as_u16();
    let headers = res.headers().clone();
    let body = res.text().await.unwrap();
    (status, headers, body)
}
