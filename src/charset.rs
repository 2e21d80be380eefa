//! Charset detection and decoding for fetched stylesheet bodies.
//!
//! The encoding label comes from the `content-type` response header when
//! present, otherwise from a leading `@charset "..."` declaration in the
//! first 256 bytes. The header always wins over content sniffing.

use encoding_rs::Encoding;
use std::collections::HashMap;

/// How many leading bytes are inspected for an `@charset` declaration.
const SNIFF_LIMIT: usize = 256;

/// Detects the encoding label for a response body, or `None` if neither the
/// `content-type` header nor a leading `@charset` declaration names one.
pub fn detect_encoding(headers: &HashMap<String, String>, body: &[u8]) -> Option<String> {
    if let Some(value) = headers.get("content-type") {
        if let Some(label) = charset_param(value) {
            return Some(label);
        }
    }
    let prefix = &body[..body.len().min(SNIFF_LIMIT)];
    charset_at_rule(prefix)
}

/// Decodes a response body to text using the detected encoding.
///
/// An unknown label or no label at all degrades to lossy UTF-8; decoding
/// itself never fails, malformed sequences become replacement characters.
pub fn decode_body(headers: &HashMap<String, String>, body: &[u8]) -> String {
    match detect_encoding(headers, body).and_then(|label| Encoding::for_label(label.as_bytes())) {
        Some(encoding) => encoding.decode(body).0.into_owned(),
        None => String::from_utf8_lossy(body).into_owned(),
    }
}

/// Extracts the `charset=<token>` parameter from a content-type value.
/// The token must start right after the `=`; a quoted charset does not match.
fn charset_param(value: &str) -> Option<String> {
    let lower = value.to_ascii_lowercase();
    let mut search = 0;
    while let Some(found) = lower[search..].find("charset=") {
        let start = search + found + "charset=".len();
        let token = label_token(value[start..].as_bytes());
        if !token.is_empty() {
            return Some(token.to_string());
        }
        search = start;
    }
    None
}

/// Recognizes `@charset "<token>"` anchored at offset zero. The keyword is
/// case-insensitive; the single space and double quotes are exact. The
/// captured token keeps its original casing.
fn charset_at_rule(prefix: &[u8]) -> Option<String> {
    const LEAD: &[u8] = b"@charset \"";
    if prefix.len() < LEAD.len() || !prefix[..LEAD.len()].eq_ignore_ascii_case(LEAD) {
        return None;
    }
    let rest = &prefix[LEAD.len()..];
    let token = label_token(rest);
    if token.is_empty() || rest.get(token.len()) != Some(&b'"') {
        return None;
    }
    Some(token.to_string())
}

/// Leading run of encoding-label characters (`[A-Za-z0-9_-]`).
fn label_token(bytes: &[u8]) -> &str {
    let end = bytes
        .iter()
        .position(|b| !(b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_'))
        .unwrap_or(bytes.len());
    // The matched range is pure ASCII.
    std::str::from_utf8(&bytes[..end]).unwrap_or("")
}
