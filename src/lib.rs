//! **A library for near-duplicate document detection over Jaccard similarity.**
//!
//! `dupdetect` shingles documents into overlapping token windows, summarizes
//! each document's shingle set with a MinHash signature, and indexes those
//! signatures with banded locality-sensitive hashing (LSH) so that
//! near-duplicate pairs can be found without ever comparing every document
//! to every other document.
//!
//! ## Core Concepts & Modules
//!
//! - **[`preprocess`]**: Normalizes raw text into a shingle set (`k`-token
//!   windows hashed with [`preprocess::longcrc`]).
//! - **[`hashing`]**: The pluggable hash-function families (`Xorhash`,
//!   `Linconhash`, `MD5hash`) MinHash draws from, and their compact tag
//!   grammar for persistence.
//! - **[`signature`]**: Computes a document's MinHash signature from its
//!   shingle set, and builds a whole corpus's signature matrix in parallel.
//! - **[`index`]**: The [`index::LshIndex`] itself — banded bucket tables,
//!   query-by-document, all-pairs verification, and the analytical
//!   sensitivity model.
//! - **[`persistence`]**: Full-snapshot JSON (de)serialization of an index.
//! - **[`config`]**: Banding parameters, hash family selection, and
//!   pre-processing flags, with presets and validation.
//! - **[`error`]**: The crate's unified error type and context-chaining
//!   extension traits.
//!
//! ## Getting Started: Building and Querying an Index
//!
//! ```
//! use dupdetect::index::LshIndex;
//! use dupdetect::preprocess::PreprocessFlags;
//!
//! # fn main() -> dupdetect::error::Result<()> {
//! let docs = vec![
//!     "the quick brown fox jumps over the lazy dog".to_string(),
//!     "the quick brown fox leaps over the lazy dog".to_string(),
//!     "completely unrelated text about gardening".to_string(),
//! ];
//!
//! let index = LshIndex::build(&docs, 20, 4, "Linconhash", PreprocessFlags::default(), 2, 42)?;
//! let matches = index.query("the quick brown fox jumps over the lazy dog", 0.3)?;
//! assert!(matches.contains(&0));
//! # Ok(())
//! # }
//! ```

#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod hashing;
pub mod index;
pub mod persistence;
pub mod preprocess;
pub mod signature;

pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{DupDetectError, ErrorContext, Result};
pub use hashing::HashFamily;
pub use index::{AllPairsResult, LshIndex};
pub use preprocess::PreprocessFlags;
pub use signature::Signature;
