//! Configuration module for dupdetect.
//!
//! Mirrors the teacher's layered `config/{mod,types,defaults,validation}.rs`
//! split, scaled to this crate's single recognized runtime setting
//! (`threads`) plus the banding parameters `M`/`r`, the hash family
//! selector, and `PreprocessFlags`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dupdetect::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::default();
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//! let config = AppConfig::builder().m(200).r(10).build();
//! ```

mod defaults;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{AppConfig, AppConfigBuilder};
pub use validation::{ConfigError, Validatable};
