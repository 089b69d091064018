//! Shared helpers for integration tests: a canned-response HTTP stub that
//! stands in for the search backend.

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{Receiver, channel};
use std::thread;

/// Single-purpose HTTP responder: accepts one connection per canned
/// response, answers each POST with the corresponding JSON body, then stops
/// listening. Captured request bodies come back through `finish`.
pub struct StubEs {
    pub url: String,
    requests: Receiver<Value>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StubEs {
    pub fn start(responses: Vec<Value>) -> Self {
        Self::start_with_status(200, responses)
    }

    pub fn start_with_status(status: u16, responses: Vec<Value>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener addr");
        let (tx, rx) = channel();
        let handle = thread::spawn(move || {
            for response in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                if let Some(body) = serve_one(stream, status, &response) {
                    let _ = tx.send(body);
                }
            }
            // The listener drops here, so the next connection attempt is
            // refused. Follow-mode tests rely on that to terminate.
        });
        StubEs {
            url: format!("http://{addr}"),
            requests: rx,
            handle: Some(handle),
        }
    }

    /// Waits for every canned response to be served and returns the request
    /// bodies seen, in order. Call only after the client is done, or this
    /// blocks waiting for connections that will never come.
    pub fn finish(mut self) -> Vec<Value> {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.requests.try_iter().collect()
    }
}

fn serve_one(mut stream: TcpStream, status: u16, response: &Value) -> Option<Value> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut content_length = 0usize;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).ok()? == 0 {
            return None;
        }
        let header = line.trim();
        if header.is_empty() {
            break;
        }
        let lower = header.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("content-length:") {
            content_length = rest.trim().parse().ok()?;
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    let payload = response.to_string();
    let reason = if status == 200 { "OK" } else { "Error" };
    let reply = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{payload}",
        payload.len(),
    );
    stream.write_all(reply.as_bytes()).ok()?;
    let _ = stream.flush();

    serde_json::from_slice(&body).ok()
}

/// Response envelope in the backend's `_search` shape.
pub fn es_response(hits: Vec<Value>) -> Value {
    json!({
        "took": 3,
        "timed_out": false,
        "hits": {
            "total": hits.len(),
            "hits": hits
        }
    })
}

/// One hit. `_score` is null, as the backend reports when sorting by time.
pub fn hit(id: &str, timestamp: &str, message: &str) -> Value {
    json!({
        "_id": id,
        "_score": null,
        "_source": {
            "@timestamp": timestamp,
            "message": message
        }
    })
}
