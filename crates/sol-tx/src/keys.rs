//! Fixed-size byte identifiers: account keys, blockhashes and signatures.
//!
//! All three are raw byte arrays whose text form is base-58 with no
//! checksum. A value is always fully initialized and exactly `N` bytes;
//! every fallible constructor checks the length before anything is stored.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::base58;
use crate::error::CodecError;

/// An immutable `N`-byte value with a base-58 text form.
///
/// Equality is byte-wise. No ordering is defined.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBytes<const N: usize>([u8; N]);

/// A 32-byte account or program identifier (an Ed25519 public key or a PDA).
pub type PublicKey = FixedBytes<32>;

/// A 32-byte recent blockhash.
pub type Hash = FixedBytes<32>;

/// A 64-byte detached Ed25519 signature.
pub type Signature = FixedBytes<64>;

impl<const N: usize> FixedBytes<N> {
    /// Length in bytes.
    pub const LEN: usize = N;

    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// The all-zero value.
    pub const fn zeroed() -> Self {
        Self([0u8; N])
    }

    /// Copy from a slice that must be exactly `N` bytes.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        let arr: [u8; N] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse the base-58 text form.
    pub fn from_base58(text: &str) -> Result<Self, CodecError> {
        base58::decode_array::<N>(text).map(Self)
    }

    pub fn to_base58(&self) -> String {
        base58::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; N] {
        self.0
    }
}

impl FixedBytes<32> {
    /// Whether these bytes decompress to a point on the Ed25519 curve.
    ///
    /// Wallet keys are on the curve; program-derived addresses never are.
    pub fn is_on_curve(&self) -> bool {
        curve25519_dalek::edwards::CompressedEdwardsY(self.0)
            .decompress()
            .is_some()
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedBytes<N> {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> FromStr for FixedBytes<N> {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl<const N: usize> fmt::Display for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBytes<{}>({})", N, self)
    }
}

impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base58(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

    #[test]
    fn default_is_zero() {
        assert_eq!(PublicKey::default().as_bytes(), &[0u8; 32]);
        assert_eq!(Signature::default().as_bytes(), &[0u8; 64]);
        assert_eq!(
            PublicKey::default().to_base58(),
            "11111111111111111111111111111111"
        );
    }

    #[test]
    fn from_slice_requires_exact_length() {
        assert!(PublicKey::try_from_slice(&[1u8; 32]).is_ok());
        assert_eq!(
            PublicKey::try_from_slice(&[1u8; 31]),
            Err(CodecError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
        assert_eq!(
            Signature::try_from(&[1u8; 65][..]),
            Err(CodecError::InvalidLength {
                expected: 64,
                actual: 65
            })
        );
    }

    #[test]
    fn base58_roundtrip_known_key() {
        let key: PublicKey = TOKEN_PROGRAM.parse().unwrap();
        assert_eq!(key.to_base58(), TOKEN_PROGRAM);
        assert_eq!(key.to_string(), TOKEN_PROGRAM);
    }

    #[test]
    fn signature_roundtrip() {
        let mut bytes = [0u8; 64];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i * 7) as u8;
        }
        let sig = Signature::new(bytes);
        let parsed = Signature::from_base58(&sig.to_base58()).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn key_text_is_not_a_signature() {
        assert!(matches!(
            Signature::from_base58(TOKEN_PROGRAM),
            Err(CodecError::LengthMismatch { expected: 64, .. })
        ));
    }

    #[test]
    fn parse_surfaces_codec_errors() {
        assert!(matches!(
            "0OIl".parse::<PublicKey>(),
            Err(CodecError::InvalidCharacter { .. })
        ));
        assert_eq!("".parse::<PublicKey>(), Err(CodecError::EmptyInput));
    }

    #[test]
    fn equality_is_bytewise() {
        let a = PublicKey::new([5u8; 32]);
        let b = PublicKey::from([5u8; 32]);
        let mut c_bytes = [5u8; 32];
        c_bytes[31] = 6;
        assert_eq!(a, b);
        assert_ne!(a, PublicKey::new(c_bytes));
    }

    #[test]
    fn debug_shows_base58() {
        let key = PublicKey::zeroed();
        assert_eq!(
            format!("{key:?}"),
            "FixedBytes<32>(11111111111111111111111111111111)"
        );
    }

    #[test]
    fn serde_uses_base58_text() {
        let key: PublicKey = TOKEN_PROGRAM.parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{TOKEN_PROGRAM}\""));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);

        assert!(serde_json::from_str::<PublicKey>("\"0000\"").is_err());
    }

    #[test]
    fn basepoint_is_on_curve() {
        let mut basepoint = [0x66u8; 32];
        basepoint[0] = 0x58;
        assert!(PublicKey::new(basepoint).is_on_curve());
    }

    #[test]
    fn arbitrary_bytes_can_be_off_curve() {
        assert!(!PublicKey::new([0x02; 32]).is_on_curve());
    }
}
