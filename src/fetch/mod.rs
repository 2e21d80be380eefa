//! Content fetching for import targets.
//!
//! One blocking GET per call via the curl crate (libcurl). Redirects are
//! followed by the transport; the redirect target is surfaced through the
//! `Location` header so relative references inside the fetched body can be
//! rebased against the URL the content actually came from.

mod error;
mod parse;

pub use error::TransportError;

use std::collections::HashMap;
use std::str;
use std::time::Duration;

use crate::rewrite;

/// Result of one GET: body bytes plus normalized response headers.
#[derive(Debug, Clone)]
pub struct Response {
    pub body: Vec<u8>,
    /// Final hop's headers, lowercase names.
    pub headers: HashMap<String, String>,
    /// Redirect target, if the transfer was redirected.
    pub location: Option<String>,
}

impl Response {
    /// The URL fetched content should be interpreted against: the redirect
    /// target (resolved against the requested URL, since `Location` may be
    /// relative) if the transfer was redirected, else the requested URL.
    pub fn effective_url(&self, requested: &str) -> String {
        match &self.location {
            Some(location) => rewrite::resolve_reference(requested, location),
            None => requested.to_string(),
        }
    }
}

/// Transport seam for the resolver.
///
/// The engine performs exactly one GET per import and never retries.
/// Implementations own redirect following and timeouts; the core defines
/// neither. Tests and hosts substitute their own implementation.
pub trait Transport {
    fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Response, TransportError>;
}

/// Blocking transport on curl easy handles.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Transport for CurlTransport {
    fn get(
        &self,
        url: &str,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Response, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        for (k, v) in custom_headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !custom_headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }

        let (headers, location) = parse::parse_header_lines(&header_lines);
        Ok(Response {
            body,
            headers,
            location,
        })
    }
}
