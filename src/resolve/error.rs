//! Per-import error types, aggregated over one resolution run.

use std::fmt;

use crate::fetch::TransportError;

/// Failure resolving one import. Recorded and skipped; never aborts the run
/// or blocks sibling imports.
#[derive(Debug)]
pub enum ImportError {
    /// The fetch failed (curl error or non-2xx status).
    Transport { url: String, source: TransportError },
    /// Fetched text failed to parse or rewrite.
    Content { url: String, source: anyhow::Error },
}

impl ImportError {
    /// Absolute URL of the import that failed.
    pub fn url(&self) -> &str {
        match self {
            ImportError::Transport { url, .. } | ImportError::Content { url, .. } => url,
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Transport { url, source } => write!(f, "fetch {}: {}", url, source),
            ImportError::Content { url, source } => write!(f, "parse {}: {}", url, source),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Transport { source, .. } => Some(source),
            ImportError::Content { source, .. } => Some(&**source),
        }
    }
}
