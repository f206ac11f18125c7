//! Owned SHA-1 digest value

use crate::error::ValidationError;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size of a SHA-1 digest in bytes
pub const DIGEST_LEN: usize = 20;

/// A 160-bit SHA-1 digest.
///
/// Renders as 40 lowercase hex characters through `Display` and serde, and
/// parses from hex in either case. Comparison and hashing are by value, so a
/// digest can key a map directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Take the raw digest bytes
    pub fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Uppercase hex rendering
    pub fn to_hex_upper(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Number of bits that differ from `other`
    pub fn bit_distance(&self, other: &Digest) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_upper())
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|err| {
            let reason = match err {
                hex::FromHexError::InvalidHexCharacter { c, index } => {
                    format!("invalid character {c:?} at position {index}")
                }
                _ => format!("expected {} hex characters", DIGEST_LEN * 2),
            };
            Error::Validation(ValidationError::invalid_digest(s, &reason))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const ABC: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";

    #[test]
    fn test_display_is_lowercase_hex() {
        let digest: Digest = ABC.parse().unwrap();

        assert_eq!(digest.to_string(), ABC);
        assert_eq!(digest.to_hex(), ABC);
        assert_eq!(format!("{digest:x}"), ABC);
        assert_eq!(format!("{digest:X}"), ABC.to_uppercase());
        assert_eq!(digest.to_hex_upper(), ABC.to_uppercase());
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let lower: Digest = ABC.parse().unwrap();
        let upper: Digest = ABC.to_uppercase().parse().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = "a9993e36".parse::<Digest>().unwrap_err();
        assert!(err.to_string().contains("expected 40 hex characters"));

        let err = format!("{ABC}00").parse::<Digest>().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidDigest { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let input = format!("z{}", &ABC[1..]);
        let err = input.parse::<Digest>().unwrap_err();
        assert!(err.to_string().contains("position 0"));
    }

    #[test]
    fn test_bytes_round_trip() {
        let digest: Digest = ABC.parse().unwrap();
        let bytes = digest.into_bytes();

        assert_eq!(bytes[0], 0xa9);
        assert_eq!(bytes[19], 0x9d);
        assert_eq!(Digest::from_bytes(bytes), digest);
        assert_eq!(digest.as_ref().len(), DIGEST_LEN);
    }

    #[test]
    fn test_debug_format() {
        let digest: Digest = ABC.parse().unwrap();
        assert_eq!(format!("{digest:?}"), format!("Digest({ABC})"));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let digest: Digest = ABC.parse().unwrap();
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{ABC}\""));

        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);

        assert!(serde_json::from_str::<Digest>("\"not-a-digest\"").is_err());
    }

    #[test]
    fn test_digest_as_map_key() {
        let digest: Digest = ABC.parse().unwrap();
        let mut seen = HashMap::new();
        *seen.entry(digest).or_insert(0) += 1;
        *seen.entry(ABC.parse::<Digest>().unwrap()).or_insert(0) += 1;

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[&digest], 2);
    }

    #[test]
    fn test_bit_distance() {
        let zero = Digest::from_bytes([0u8; DIGEST_LEN]);
        let ones = Digest::from_bytes([0xffu8; DIGEST_LEN]);

        assert_eq!(zero.bit_distance(&zero), 0);
        assert_eq!(zero.bit_distance(&ones), 160);
    }
}
