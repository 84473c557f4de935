//! Configuration validation for dupdetect.
//!
//! Grounded on the teacher's `Validatable` trait (`config/validation.rs`);
//! checks the conditions spec.md §7 assigns to `ConfigError`.

use super::types::AppConfig;

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the validation error.
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.r == 0 {
            errors.push(ConfigError {
                field: "r".to_string(),
                message: "band width r must be greater than zero".to_string(),
            });
        } else {
            if self.m < self.r {
                errors.push(ConfigError {
                    field: "m".to_string(),
                    message: format!("M ({}) must be >= r ({})", self.m, self.r),
                });
            }
            if self.m % self.r != 0 {
                errors.push(ConfigError {
                    field: "m".to_string(),
                    message: format!("M ({}) must be a multiple of r ({})", self.m, self.r),
                });
            }
        }

        let valid_families = ["Xorhash", "Linconhash", "MD5hash"];
        if !valid_families.contains(&self.hash_family) {
            errors.push(ConfigError {
                field: "hash_family".to_string(),
                message: format!(
                    "unknown hash family '{}'. Valid options: {}",
                    self.hash_family,
                    valid_families.join(", ")
                ),
            });
        }

        if self.preprocess.filter_stopwords && self.preprocess.stopword_start {
            errors.push(ConfigError {
                field: "preprocess".to_string(),
                message: "filter_stopwords and stopword_start are mutually exclusive".to_string(),
            });
        }
        if self.preprocess.shingle_size == 0 {
            errors.push(ConfigError {
                field: "preprocess.shingle_size".to_string(),
                message: "shingle_size must be greater than zero".to_string(),
            });
        }

        if self.threads == 0 {
            errors.push(ConfigError {
                field: "threads".to_string(),
                message: "threads must be at least 1".to_string(),
            });
        }

        errors
    }
}
