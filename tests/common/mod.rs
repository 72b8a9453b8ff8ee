//! Shared helpers for the integration tests: a recording notification sink
//! and one-shot loopback HTTP servers.

#![allow(dead_code)]

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use async_trait::async_trait;
use confedit::config::Endpoints;
use confedit::notify::{Decision, Notification, NotificationSink};
use tiny_http::{Header, Response, Server};

/// Sink that records notifications and answers every confirmation with a
/// fixed decision.
pub struct RecordingSink {
    decision: Decision,
    pub notes: Vec<Notification>,
    pub confirms: usize,
}

impl RecordingSink {
    pub fn confirming() -> Self {
        Self::with_decision(Decision::Confirmed)
    }

    pub fn cancelling() -> Self {
        Self::with_decision(Decision::Cancelled)
    }

    fn with_decision(decision: Decision) -> Self {
        Self {
            decision,
            notes: Vec::new(),
            confirms: 0,
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn notify(&mut self, note: Notification) {
        self.notes.push(note);
    }

    async fn confirm(&mut self, _title: &str, _message: &str) -> Decision {
        self.confirms += 1;
        self.decision
    }
}

pub fn endpoints(load: Option<&str>, save: &str) -> Endpoints {
    Endpoints {
        load_url: load.map(|url| url.parse().expect("load url")),
        save_url: save.parse().expect("save url"),
    }
}

/// A URL nothing listens on (bound once, then released).
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/", addr)
}

/// Serve exactly one request with the given status, body, and content type.
pub fn serve_once(
    status: u16,
    body: &str,
    content_type: Option<&str>,
) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("bind loopback server");
    let addr = server.server_addr().to_ip().expect("ip listener");
    let url = format!("http://{}/", addr);

    let body = body.as_bytes().to_vec();
    let content_type = content_type.map(str::to_string);
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            // from_data sets no Content-Type of its own
            let mut response = Response::from_data(body).with_status_code(status);
            if let Some(ct) = content_type {
                if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], ct.as_bytes()) {
                    response.add_header(header);
                }
            }
            let _ = request.respond(response);
        }
    });

    (url, handle)
}

/// What the save endpoint saw.
pub struct CapturedRequest {
    pub method: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Answer one request per status in order, capturing each request.
pub fn capture_many(
    statuses: Vec<u16>,
) -> (String, mpsc::Receiver<CapturedRequest>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("bind loopback server");
    let addr = server.server_addr().to_ip().expect("ip listener");
    let url = format!("http://{}/", addr);

    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        for status in statuses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let method = request.method().to_string();
            let content_type = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Content-Type"))
                .map(|header| header.value.to_string());
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let _ = request.respond(Response::from_data(Vec::new()).with_status_code(status));
            let _ = tx.send(CapturedRequest {
                method,
                content_type,
                body,
            });
        }
    });

    (url, rx, handle)
}

/// Capture a single request, answering with the given status.
pub fn capture_once(
    status: u16,
) -> (String, mpsc::Receiver<CapturedRequest>, thread::JoinHandle<()>) {
    capture_many(vec![status])
}
