//! Configuration types for dupdetect.

use crate::preprocess::PreprocessFlags;

/// The only recognized runtime setting besides the banding parameters
/// themselves (spec.md §6): the worker-pool size used by signature-matrix
/// construction and by all-pairs' Jaccard-verification fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Signature length (number of hash functions), `M`.
    pub m: usize,
    /// Band width (signature positions per band), `r`.
    pub r: usize,
    /// Hash-function family selector: `"Xorhash"`, `"Linconhash"`, or `"MD5hash"`.
    pub hash_family: &'static str,
    /// Pre-processing flags applied to documents and queries.
    pub preprocess: PreprocessFlags,
    /// Worker-pool size for parallel signature computation.
    pub threads: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            m: 100,
            r: 5,
            hash_family: "Linconhash",
            preprocess: PreprocessFlags::default(),
            threads: num_cpus(),
        }
    }
}

/// A small, dependency-free stand-in for `num_cpus::get()` — the teacher
/// pulls in `num_cpus` for this in larger crates, but a single call site
/// doesn't warrant the dependency here.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Builder for [`AppConfig`], following the teacher's `AppConfigBuilder`
/// pattern (`config/types.rs`).
#[derive(Debug, Clone, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    #[must_use]
    pub fn m(mut self, m: usize) -> Self {
        self.config.m = m;
        self
    }

    #[must_use]
    pub fn r(mut self, r: usize) -> Self {
        self.config.r = r;
        self
    }

    #[must_use]
    pub fn hash_family(mut self, family: &'static str) -> Self {
        self.config.hash_family = family;
        self
    }

    #[must_use]
    pub fn preprocess(mut self, flags: PreprocessFlags) -> Self {
        self.config.preprocess = flags;
        self
    }

    #[must_use]
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl AppConfig {
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }
}
