//! Base-URL binding for rewriting references inside fetched content.
//!
//! Without this step, relative references inside imported content would be
//! interpreted against the wrong document once the rules are merged into the
//! importing stylesheet.

use url::Url;

/// Joins `reference` against `base`.
///
/// An absolute reference replaces the base and so passes through unchanged.
/// A reference that cannot be joined, or an unparsable base, comes back
/// untouched.
pub fn resolve_reference(base: &str, reference: &str) -> String {
    match Url::parse(base) {
        Ok(base) => base
            .join(reference)
            .map(|joined| joined.to_string())
            .unwrap_or_else(|_| reference.to_string()),
        Err(_) => reference.to_string(),
    }
}

/// Returns a resolver bound to a fixed base URL, handed to the `url(...)`
/// rewrite pass for each freshly fetched stylesheet. Hosts can use it with
/// the top-level sheet's source as well.
pub fn resolver_for(base: &str) -> impl Fn(&str) -> String {
    let base = base.to_string();
    move |reference: &str| resolve_reference(&base, reference)
}
