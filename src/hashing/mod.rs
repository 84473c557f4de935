//! A pluggable family of 64-bit integer-to-integer hash functions, each
//! round-tripping through a compact string tag.
//!
//! Grounded on `original_source/src/signature.py`'s `Basehash`/`Xorhash`/
//! `Linconhash` (a base class with `calculate`, here modeled as a tagged
//! enum per spec.md §9's design note) and extended with `MD5hash` per
//! spec.md §4.2. The tag grammar (`Family_param1_param2_...`) is the
//! external contract; it is not renamed or reshaped here.

use crate::error::{DupDetectError, Result};
use md5::{Digest, Md5};
use rand::Rng;

/// The large prime used by [`HashFamily::Linconhash`], fixed by spec.md §4.2.
pub const LINCONHASH_PRIME: u64 = 533_603_009_383_305_529;

/// A member of one of the three hash-function families.
///
/// "gives worse results, should not be used" -- the reference implementation's
/// own assessment of `Xorhash`, preserved here as it carries information
/// about the relative quality of the families, not a behavior change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFamily {
    /// `calculate(x) = x XOR k`.
    Xorhash(u64),
    /// `calculate(x) = (a*x + b) mod c`, with `c` fixed to [`LINCONHASH_PRIME`].
    Linconhash { a: u64, b: u64, c: u64 },
    /// `calculate(x) = first 64 bits of md5(be8(x) || be8(seed))`.
    MD5hash(u64),
}

impl HashFamily {
    /// The selector string for this family (`"Xorhash"`, `"Linconhash"`, or `"MD5hash"`).
    #[must_use]
    pub fn family_name(&self) -> &'static str {
        match self {
            Self::Xorhash(_) => "Xorhash",
            Self::Linconhash { .. } => "Linconhash",
            Self::MD5hash(_) => "MD5hash",
        }
    }

    /// Construct a fresh instance of the named family with independently
    /// drawn random parameters.
    pub fn random(family_name: &str, rng: &mut impl Rng) -> Result<Self> {
        match family_name {
            "Xorhash" => Ok(Self::Xorhash(rng.gen::<u64>())),
            "Linconhash" => {
                let a = rng.gen_range(u64::from(u32::MAX) + 1..=u64::MAX);
                let b = rng.gen::<u64>();
                Ok(Self::Linconhash {
                    a,
                    b,
                    c: LINCONHASH_PRIME,
                })
            }
            "MD5hash" => Ok(Self::MD5hash(rng.gen::<u64>())),
            other => Err(DupDetectError::config(format!(
                "unknown hash family '{other}'"
            ))),
        }
    }

    /// Compute the 64-bit image of `x` under this hash function.
    #[must_use]
    pub fn calculate(&self, x: u64) -> u64 {
        match *self {
            Self::Xorhash(k) => x ^ k,
            Self::Linconhash { a, b, c } => {
                let wide = u128::from(a) * u128::from(x) + u128::from(b);
                (wide % u128::from(c)) as u64
            }
            Self::MD5hash(seed) => {
                let mut hasher = Md5::new();
                hasher.update(x.to_be_bytes());
                hasher.update(seed.to_be_bytes());
                let digest = hasher.finalize();
                u64::from_be_bytes(digest[0..8].try_into().expect("md5 digest is 16 bytes"))
            }
        }
    }

    /// Serialize this hash function to its compact string tag.
    #[must_use]
    pub fn store(&self) -> String {
        match *self {
            Self::Xorhash(k) => format!("Xorhash_{k}"),
            Self::Linconhash { a, b, c } => format!("Linconhash_{a}_{b}_{c}"),
            Self::MD5hash(a) => format!("MD5hash_{a}"),
        }
    }

    /// Parse a hash function back from its string tag. Fatal (`MalformedTag`)
    /// if the tag does not parse or names an unknown family.
    pub fn load(tag: &str) -> Result<Self> {
        let mut parts = tag.split('_');
        let family = parts
            .next()
            .ok_or_else(|| DupDetectError::malformed_tag(tag, "empty tag"))?;

        let parse_u64 = |s: Option<&str>| -> Result<u64> {
            s.ok_or_else(|| DupDetectError::malformed_tag(tag, "missing parameter"))?
                .parse::<u64>()
                .map_err(|e| DupDetectError::malformed_tag(tag, e.to_string()))
        };

        match family {
            "Xorhash" => {
                let k = parse_u64(parts.next())?;
                if parts.next().is_some() {
                    return Err(DupDetectError::malformed_tag(tag, "too many parameters"));
                }
                Ok(Self::Xorhash(k))
            }
            "Linconhash" => {
                let a = parse_u64(parts.next())?;
                let b = parse_u64(parts.next())?;
                let c = parse_u64(parts.next())?;
                if parts.next().is_some() {
                    return Err(DupDetectError::malformed_tag(tag, "too many parameters"));
                }
                Ok(Self::Linconhash { a, b, c })
            }
            "MD5hash" => {
                let a = parse_u64(parts.next())?;
                if parts.next().is_some() {
                    return Err(DupDetectError::malformed_tag(tag, "too many parameters"));
                }
                Ok(Self::MD5hash(a))
            }
            other => Err(DupDetectError::malformed_tag(
                tag,
                format!("unknown hash family '{other}'"),
            )),
        }
    }
}
