//! Unified error types for dupdetect.
//!
//! This module provides a comprehensive error hierarchy for the library,
//! with rich context for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dupdetect operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DupDetectError {
    /// A query or all-pairs enumeration was attempted before the index was built or loaded.
    #[error("index not initialized: {context}")]
    NotInitialized { context: String },

    /// A signature was requested for a document whose shingle set is empty.
    #[error("cannot compute a signature for an empty document: {context}")]
    EmptyDocument { context: String },

    /// A hash-function tag failed to parse, or named an unknown family.
    #[error("malformed hash-function tag '{tag}': {reason}")]
    MalformedTag { tag: String, reason: String },

    /// A loaded snapshot violates the index's shape invariants.
    #[error("inconsistent index snapshot: {0}")]
    InconsistentIndex(String),

    /// Invalid construction parameters (bad `M`/`r`, conflicting preprocessing flags, ...).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO errors with path context (persistence load/store, corpus reading).
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Errors reading the tabular `(doc_id, text)` input corpus.
    #[error("failed to read corpus: {0}")]
    Csv(String),

    /// Errors (de)serializing the persisted index snapshot.
    #[error("failed to (de)serialize index snapshot: {0}")]
    Serde(String),
}

/// Convenient Result type for dupdetect operations.
pub type Result<T> = std::result::Result<T, DupDetectError>;

impl DupDetectError {
    /// Create a `NotInitialized` error with context.
    pub fn not_initialized(context: impl Into<String>) -> Self {
        Self::NotInitialized {
            context: context.into(),
        }
    }

    /// Create an `EmptyDocument` error with context.
    pub fn empty_document(context: impl Into<String>) -> Self {
        Self::EmptyDocument {
            context: context.into(),
        }
    }

    /// Create a `MalformedTag` error.
    pub fn malformed_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create an `InconsistentIndex` error.
    pub fn inconsistent_index(message: impl Into<String>) -> Self {
        Self::InconsistentIndex(message.into())
    }

    /// Create a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

impl From<std::io::Error> for DupDetectError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DupDetectError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

impl From<csv::Error> for DupDetectError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Extension trait for adding context to errors.
///
/// Mirrors the context-chaining idiom used throughout the library: each
/// `.context(...)` call prepends a note, producing a breadcrumb trail from
/// the outermost caller down to the original failure.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DupDetectError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context(e.into(), &ctx)
        })
    }
}

fn add_context(err: DupDetectError, new_ctx: &str) -> DupDetectError {
    match err {
        DupDetectError::NotInitialized { context } => DupDetectError::NotInitialized {
            context: chain(new_ctx, &context),
        },
        DupDetectError::EmptyDocument { context } => DupDetectError::EmptyDocument {
            context: chain(new_ctx, &context),
        },
        DupDetectError::Io {
            path,
            message,
            source,
        } => DupDetectError::Io {
            path,
            message: chain(new_ctx, &message),
            source,
        },
        DupDetectError::Config(msg) => DupDetectError::Config(chain(new_ctx, &msg)),
        DupDetectError::Csv(msg) => DupDetectError::Csv(chain(new_ctx, &msg)),
        DupDetectError::Serde(msg) => DupDetectError::Serde(chain(new_ctx, &msg)),
        other => other,
    }
}

fn chain(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_chains_instead_of_replacing() {
        let initial: Result<()> = Err(DupDetectError::config("bad r"));
        let chained = initial.context("while building index");
        match chained {
            Err(DupDetectError::Config(msg)) => {
                assert!(msg.contains("while building index"));
                assert!(msg.contains("bad r"));
            }
            _ => panic!("expected Config error"),
        }
    }

    #[test]
    fn not_initialized_display() {
        let err = DupDetectError::not_initialized("query");
        assert!(err.to_string().contains("not initialized"));
    }
}
