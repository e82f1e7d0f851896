use std::fmt;
use std::str::FromStr;

use crate::hex::{hex_decode, hex_to_string};
use crate::InvalidArgument;

/// A SHA-1 commit hash, as reported by the remote history.
///
/// Parsed from exactly 40 lowercase hex characters; the raw digest is kept
/// inline so the type is `Copy` and cheap to compare and hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sha([u8; 20]);

impl Sha {
    /// Length of the hex representation.
    pub const HEX_LEN: usize = 40;

    /// Create a `Sha` from a 40-character lowercase hex string.
    pub fn from_hex(hex: &str) -> Result<Self, InvalidArgument> {
        let mut bytes = [0u8; 20];
        hex_decode(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Get the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Get the hex string representation (lowercase).
    pub fn to_hex(&self) -> String {
        hex_to_string(&self.0)
    }

    /// Abbreviated form used in log output.
    pub fn short(&self) -> String {
        hex_to_string(&self.0[..4])
    }
}

impl fmt::Display for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha({})", self.short())
    }
}

impl FromStr for Sha {
    type Err = InvalidArgument;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SHA: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

    #[test]
    fn display_matches_input() {
        let sha = Sha::from_hex(SHA).unwrap();
        assert_eq!(sha.to_string(), SHA);
        assert_eq!(sha.to_hex(), SHA);
    }

    #[test]
    fn debug_shows_short_hash() {
        let sha = Sha::from_hex(SHA).unwrap();
        assert_eq!(format!("{:?}", sha), "Sha(da39a3ee)");
    }

    #[test]
    fn parse_via_from_str() {
        let sha: Sha = SHA.parse().unwrap();
        assert_eq!(sha.as_bytes()[0], 0xda);
    }

    #[test]
    fn rejects_short_and_long_input() {
        assert!(Sha::from_hex("abcd").is_err());
        assert!(Sha::from_hex(&format!("{SHA}0")).is_err());
        assert!(Sha::from_hex("").is_err());
    }

    #[test]
    fn rejects_uppercase() {
        let err = Sha::from_hex(&SHA.to_uppercase()).unwrap_err();
        assert!(matches!(err, InvalidArgument::Sha(_)));
    }

    #[test]
    fn error_message_names_input() {
        let err = Sha::from_hex("not-a-sha").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sha \"not-a-sha\" does not appear to be a valid sha1 hash."
        );
    }

    #[test]
    fn usable_as_set_member() {
        let a = Sha::from_hex(SHA).unwrap();
        let b = Sha::from_hex(SHA).unwrap();
        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }
}
