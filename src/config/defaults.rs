//! Default configurations and presets for dupdetect.
//!
//! Provides named presets for common use cases, grounded on the teacher's
//! `ConfigPreset` enum (`config/defaults.rs`), scaled to the banding
//! parameters and hash family this crate recognizes instead of SBOM
//! matching knobs.

use super::types::AppConfig;
use crate::preprocess::PreprocessFlags;

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Balanced settings suitable for most corpora (`M=100, r=5`).
    Default,
    /// Fewer, wider bands: high precision, more missed near-duplicates.
    Strict,
    /// More, narrower bands: high recall, more false candidates to verify.
    Permissive,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "exact" => Some(Self::Strict),
            "permissive" | "loose" => Some(Self::Permissive),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced banding suitable for most corpora",
            Self::Strict => "Wider bands, fewer candidates, higher precision",
            Self::Permissive => "Narrower bands, more candidates, higher recall",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Permissive]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::Permissive => Self::permissive_preset(),
        }
    }

    /// Fewer bands of greater width: a document must agree closely across
    /// a longer run of hash functions to collide at all.
    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            m: 100,
            r: 10,
            hash_family: "Linconhash",
            preprocess: PreprocessFlags::reference(),
            ..Self::default()
        }
    }

    /// More, narrower bands: easier to collide, more candidates fall to
    /// the exact Jaccard verification step.
    #[must_use]
    pub fn permissive_preset() -> Self {
        Self {
            m: 100,
            r: 2,
            hash_family: "Linconhash",
            preprocess: PreprocessFlags::default(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
    }

    #[test]
    fn strict_uses_wider_bands_than_permissive() {
        let strict = AppConfig::strict_preset();
        let permissive = AppConfig::permissive_preset();
        assert!(strict.r > permissive.r);
    }

    #[test]
    fn from_preset_default_matches_default() {
        assert_eq!(
            AppConfig::from_preset(ConfigPreset::Default),
            AppConfig::default()
        );
    }
}
