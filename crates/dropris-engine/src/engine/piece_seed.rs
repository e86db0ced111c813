use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic shape generation.
///
/// A 128-bit seed for the [`Pcg32`] generator that picks each new shape.
/// The same seed yields the same shape sequence, which makes sessions
/// reproducible for debugging and testing.
///
/// Seeds are written as 32 hexadecimal digits, both in serde form and on the
/// command line.
///
/// # Example
///
/// ```
/// use dropris_engine::PieceSeed;
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdef0123456789abcdef");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

/// Error returned when a seed string is not 32 hexadecimal digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed '{input}': {reason}")]
pub struct ParseSeedError {
    input: String,
    reason: String,
}

impl PieceSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Creates the generator this seed describes.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| ParseSeedError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error(format!("expected 32 characters, got {}", s.len())));
        }
        // from_str_radix accepts a leading '+', which is not a hex digit.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error("expected only hexadecimal digits".to_owned()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| error(e.to_string()))?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use crate::ShapeKind;

    use super::*;

    #[test]
    fn test_format_is_32_char_hex_string() {
        let seed: PieceSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let hex_str = serialized.trim_matches('"');
        assert_eq!(hex_str.len(), 32);
        assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(serde_json::from_str::<PieceSeed>(&serialized).unwrap(), seed);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(
            PieceSeed::from_u128(0).to_string(),
            "00000000000000000000000000000000"
        );
        assert_eq!(
            PieceSeed::from_u128(u128::MAX).to_string(),
            "ffffffffffffffffffffffffffffffff"
        );
        // Big-endian: first byte appears first.
        let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(
            seed.0,
            [
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76,
                0x54, 0x32, 0x10
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        for input in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
            "+123456789abcdef0123456789abcdef",
        ] {
            let err = input.parse::<PieceSeed>().unwrap_err();
            assert!(err.to_string().contains("invalid hex seed"), "{input}: {err}");
        }
        assert!(serde_json::from_str::<PieceSeed>("\"xyz\"").is_err());
    }

    #[test]
    fn test_same_seed_same_shapes() {
        let seed = PieceSeed::from_u128(0x1234_5678_9abc_def0_1122_3344_5566_7788);
        let mut rng1 = seed.rng();
        let mut rng2 = seed.rng();
        for _ in 0..20 {
            let a: ShapeKind = rng1.random();
            let b: ShapeKind = rng2.random();
            assert_eq!(a, b);
        }
    }
}
