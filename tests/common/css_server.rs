//! Minimal HTTP/1.1 server serving canned stylesheet routes for tests.
//!
//! Routes are matched by exact request path; unknown paths get 404. Runs in
//! a background thread until the process exits.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// One canned response.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u32,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl Route {
    /// 200 text/css response.
    pub fn css(body: &str) -> Self {
        Self {
            status: 200,
            content_type: Some("text/css".to_string()),
            location: None,
            body: body.as_bytes().to_vec(),
        }
    }

    /// 200 response with an explicit charset parameter and raw bytes.
    pub fn css_with_charset(body: Vec<u8>, charset: &str) -> Self {
        Self {
            status: 200,
            content_type: Some(format!("text/css; charset={charset}")),
            location: None,
            body,
        }
    }

    /// 301 redirect to `target`.
    pub fn redirect(target: &str) -> Self {
        Self {
            status: 301,
            content_type: None,
            location: Some(target.to_string()),
            body: Vec::new(),
        }
    }
}

/// Starts a server serving `routes` and returns the base URL
/// (e.g. "http://127.0.0.1:12345/").
pub fn start(routes: HashMap<String, Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match request_path(request) {
        Some(path) => path,
        None => return,
    };

    match routes.get(path) {
        Some(route) => {
            let mut response = format!(
                "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                route.status,
                reason(route.status),
                route.body.len()
            );
            if let Some(content_type) = &route.content_type {
                response.push_str(&format!("Content-Type: {}\r\n", content_type));
            }
            if let Some(location) = &route.location {
                response.push_str(&format!("Location: {}\r\n", location));
            }
            response.push_str("\r\n");
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(&route.body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found",
            );
        }
    }
}

fn request_path(request: &str) -> Option<&str> {
    let first_line = request.lines().next()?;
    first_line.split_whitespace().nth(1)
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        404 => "Not Found",
        _ => "OK",
    }
}
