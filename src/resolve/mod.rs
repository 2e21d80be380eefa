//! The import resolver: walks a rule list depth-first, fetching and merging
//! imported stylesheets in place.
//!
//! Strictly sequential: import *N*'s entire subtree resolves before import
//! *N+1* is looked at, and the fetch is the only suspension point. One
//! [`VisitedSet`] travels through the whole recursion, so cycles and
//! duplicates are cut off globally for the run. Failures are recorded per
//! import and never block sibling rules.

mod error;

pub use error::ImportError;

use std::collections::HashMap;

use crate::charset;
use crate::directive;
use crate::fetch::Transport;
use crate::rewrite;
use crate::sheet::{self, Rule, Stylesheet};
use crate::visited::VisitedSet;

/// Per-run options. `Default` sends no extra headers and leaves fetched text
/// untouched before parsing.
pub struct ResolveOptions {
    /// Extra request headers sent on every fetch.
    pub headers: HashMap<String, String>,
    /// Hook applied to decoded text before parsing.
    pub preprocess: Option<Box<dyn Fn(String) -> String + Send + Sync>>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            preprocess: None,
        }
    }
}

/// Resolves every `@import` in `sheet`, replacing its rule list in place.
///
/// Returns the per-import errors encountered; an empty list means full
/// success. The stylesheet is always left populated with whatever resolved
/// (best-effort, not all-or-nothing).
pub fn resolve_imports(
    sheet: &mut Stylesheet,
    transport: &dyn Transport,
    options: &ResolveOptions,
) -> Vec<ImportError> {
    let mut run = Run {
        transport,
        options,
        visited: VisitedSet::new(),
        errors: Vec::new(),
    };
    run.resolve_rules(sheet);
    run.errors
}

/// State for one top-level invocation. Nothing here survives the run.
struct Run<'a> {
    transport: &'a dyn Transport,
    options: &'a ResolveOptions,
    visited: VisitedSet,
    errors: Vec<ImportError>,
}

impl Run<'_> {
    fn resolve_rules(&mut self, sheet: &mut Stylesheet) {
        let rules = std::mem::take(&mut sheet.rules);
        let mut out = Vec::with_capacity(rules.len());
        for rule in rules {
            match rule {
                Rule::Charset { .. } => {}
                Rule::Import { expr } => self.resolve_import(&expr, &sheet.source, &mut out),
                Rule::Style {
                    selectors,
                    declarations,
                } => out.push(Rule::Style {
                    selectors,
                    declarations,
                }),
                Rule::Media { condition, rules } => out.push(Rule::Media { condition, rules }),
                Rule::Other { raw } => out.push(Rule::Other { raw }),
            }
        }
        sheet.rules = out;
    }

    fn resolve_import(&mut self, expr: &str, source: &str, out: &mut Vec<Rule>) {
        let raw = format!("@import {expr};");
        let Some(directive) = directive::parse_import(&raw) else {
            tracing::debug!("skipping unparsable import: {}", expr);
            return;
        };

        let target = rewrite::resolve_reference(source, &directive.path);
        if self.visited.contains(&target) {
            tracing::debug!("dropping already-resolved import of {}", target);
            return;
        }
        self.visited.insert(&target);

        tracing::debug!("fetching import {}", target);
        let response = match self.transport.get(&target, &self.options.headers) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("fetch failed for {}: {}", target, err);
                self.errors.push(ImportError::Transport {
                    url: target,
                    source: err,
                });
                return;
            }
        };
        let effective = response.effective_url(&target);

        let mut text = charset::decode_body(&response.headers, &response.body);
        if let Some(preprocess) = &self.options.preprocess {
            text = preprocess(text);
        }

        let mut inner = match sheet::parse(&text, &effective) {
            Ok(inner) => inner,
            Err(err) => {
                tracing::warn!("parse failed for {}: {}", target, err);
                self.errors.push(ImportError::Content {
                    url: target,
                    source: err,
                });
                return;
            }
        };
        let resolve = rewrite::resolver_for(&effective);
        if let Err(err) = sheet::rewrite_urls(&mut inner, &resolve) {
            tracing::warn!("url rewrite failed for {}: {}", target, err);
            self.errors.push(ImportError::Content {
                url: target,
                source: err,
            });
            return;
        }

        // Entire subtree before the next sibling.
        self.resolve_rules(&mut inner);

        if directive.condition.is_empty() {
            out.extend(inner.rules);
        } else {
            out.push(Rule::Media {
                condition: directive.condition,
                rules: inner.rules,
            });
        }
    }
}
