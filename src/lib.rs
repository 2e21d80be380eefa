//! Recursive remote `@import` resolution for CSS stylesheets.
//!
//! Walks a parsed stylesheet, fetches each imported resource, decodes it,
//! resolves its own imports depth-first, and merges the result back at the
//! import's position — flattened, or wrapped in one `@media` rule when the
//! import carried a condition. Relative `url(...)` references inside fetched
//! content are rewritten against the URL they were fetched from so they stay
//! valid after the merge. One failing import never blocks the rest: the run
//! always yields a populated stylesheet plus the list of per-import errors.

pub mod charset;
pub mod directive;
pub mod fetch;
pub mod resolve;
pub mod rewrite;
pub mod sheet;
pub mod visited;

use anyhow::Result;

pub use fetch::{CurlTransport, Transport, TransportError};
pub use resolve::{ImportError, ResolveOptions};
pub use sheet::{Declaration, Rule, Stylesheet};

/// Parses `css` against `source_url`, resolves every import, and serializes
/// the result.
///
/// Returns the final text together with the per-import errors; errors never
/// abort the run, the text contains whatever resolved. Fails only if the
/// top-level text itself cannot be parsed.
pub fn inline_imports(
    css: &str,
    source_url: &str,
    transport: &dyn Transport,
    options: &ResolveOptions,
) -> Result<(String, Vec<ImportError>)> {
    let mut stylesheet = sheet::parse(css, source_url)?;
    let errors = resolve::resolve_imports(&mut stylesheet, transport, options);
    Ok((sheet::serialize(&stylesheet), errors))
}
