//! The `/items` routing tree served by the binary.
//!
//! ```text
//! GET  → Accept      { application/xml, application/json }
//! POST → ContentType { application/xml, application/json }
//! PUT  → ContentType { application/xml, application/json }
//! ```

use axum::body::Body;
use axum::http::{header, HeaderValue, Response, StatusCode};
use serde::Serialize;

use crate::routing::{handler_fn, AcceptRouter, ContentTypeRouter, Handler, MethodRouter};

/// A catalogue entry.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: u32,
    pub name: &'static str,
}

pub const ITEMS: &[Item] = &[
    Item { id: 1, name: "anvil" },
    Item { id: 2, name: "rocket skates" },
];

fn write(res: &mut Response<Body>, status: StatusCode, content_type: &'static str, body: String) {
    *res.status_mut() = status;
    res.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    *res.body_mut() = Body::from(body);
}

fn items_json() -> String {
    // Serializing a slice of plain structs cannot fail.
    serde_json::to_string(ITEMS).unwrap_or_else(|_| "[]".to_string())
}

fn items_xml() -> String {
    let mut xml = String::from("<items>");
    for item in ITEMS {
        xml.push_str(&format!(
            "<item id=\"{}\">{}</item>",
            item.id,
            escape_xml(item.name)
        ));
    }
    xml.push_str("</items>");
    xml
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Handler that answers with a fixed status and a one-line message.
fn ack(status: StatusCode, content_type: &'static str, message: &'static str) -> impl Handler {
    handler_fn(move |_req, res: &mut Response<Body>| {
        write(res, status, content_type, message.to_string());
    })
}

fn edits(status: StatusCode, xml: &'static str, json: &'static str) -> ContentTypeRouter {
    ContentTypeRouter::new()
        .route("application/xml", ack(status, "application/xml", xml))
        .route("application/json", ack(status, "application/json", json))
}

/// Build the `/items` tree.
pub fn items() -> MethodRouter {
    let listing = AcceptRouter::new()
        .route(
            "application/xml",
            handler_fn(|_req, res: &mut Response<Body>| {
                write(res, StatusCode::OK, "application/xml", items_xml())
            }),
        )
        .route(
            "application/json",
            handler_fn(|_req, res: &mut Response<Body>| {
                write(res, StatusCode::OK, "application/json", items_json())
            }),
        );

    MethodRouter::new()
        .route("GET", listing)
        .route(
            "POST",
            edits(StatusCode::CREATED, "<added/>", r#"{"added":true}"#),
        )
        .route(
            "PUT",
            edits(StatusCode::OK, "<edited/>", r#"{"edited":true}"#),
        )
}
