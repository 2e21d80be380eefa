//! Parse raw HTTP response header lines into a lookup map.

use std::collections::HashMap;

/// Folds collected header lines into a lowercase-keyed map.
///
/// A status line (`HTTP/...`) starts a new response in a redirect chain and
/// resets the map, so only the final hop's headers survive. The most recent
/// `Location` value is kept separately across hops: it names the redirect
/// target the final response was fetched from.
pub(crate) fn parse_header_lines(lines: &[String]) -> (HashMap<String, String>, Option<String>) {
    let mut headers = HashMap::new();
    let mut location = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.len() >= 5 && line.as_bytes()[..5].eq_ignore_ascii_case(b"http/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name == "location" && !value.is_empty() {
                location = Some(value.to_string());
            }
            headers.insert(name, value.to_string());
        }
    }

    (headers, location)
}
