//! Stylesheet data model.
//!
//! Parsing, serialization, and `url(...)` rewriting live in submodules; the
//! model itself is a closed enum so rule dispatch in the resolver is
//! exhaustive at compile time.

mod parse;
mod rewrite;
mod serialize;

pub use parse::parse;
pub use rewrite::rewrite_urls;
pub use serialize::serialize;

/// One `property: value` pair inside a style rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// A top-level stylesheet rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Raw `@import` expression: everything after the keyword, without the
    /// trailing `;`. Always replaced or dropped by resolution; never present
    /// in final output.
    Import { expr: String },
    /// `@charset` declaration. Dropped from final output: content has been
    /// normalized to one encoding by the time it is merged.
    Charset { value: String },
    /// Selector list plus declarations (possibly empty).
    Style {
        selectors: Vec<String>,
        declarations: Vec<Declaration>,
    },
    /// Merge artifact wrapping the rules of a conditioned import. Input
    /// `@media` blocks parse as `Other` and pass through verbatim.
    Media { condition: String, rules: Vec<Rule> },
    /// Any other rule kind, kept verbatim and order-preserving.
    Other { raw: String },
}

/// An ordered rule list annotated with the URL it was parsed against.
/// Owned by the resolution run that created it; resolution replaces the rule
/// sequence in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub source: String,
    pub rules: Vec<Rule>,
}
