//! Field hash: a 256-bit value stored little-endian, always below the
//! BN254 scalar field modulus.
//!
//! The stored bytes are the single source of truth. Hex text is a plain
//! hex encoding of those bytes (no reversal), the big-integer view treats
//! them as a little-endian integer, and bit tests during tree traversal
//! read bit `n` out of byte `n / 8` directly.

use std::fmt;

use ethers::types::U256;
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// BN254 scalar field modulus. A `Hash` is valid only while its big-integer
/// value is strictly less than `Q`.
pub const Q: U256 = U256([
    0x43e1_f593_f000_0001,
    0x2833_e848_79b9_7091,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
]);

#[derive(Debug, Error)]
pub enum HashError {
    #[error("big integer {0} is not below the field modulus")]
    OutOfField(U256),
    #[error("invalid hex hash: {0}")]
    BadHex(#[from] hex::FromHexError),
    #[error("decoded hash has {0} bytes, expected 32")]
    BadLength(usize),
    #[error("invalid decimal integer: {0}")]
    BadDecimal(String),
}

/// A field element, little-endian byte layout.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash([u8; 32]);

impl Hash {
    pub const ZERO: Hash = Hash([0u8; 32]);

    pub const ONE: Hash = {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        Hash(bytes)
    };

    /// Builds a `Hash` from a big integer, rejecting values at or above `Q`.
    pub fn from_big_int(n: U256) -> Result<Self, HashError> {
        if n >= Q {
            return Err(HashError::OutOfField(n));
        }
        let mut bytes = [0u8; 32];
        n.to_little_endian(&mut bytes);
        Ok(Hash(bytes))
    }

    /// Parses the hex text form produced by [`Hash::hex`]: a plain hex
    /// encoding of the little-endian bytes, not reversed.
    ///
    /// This performs no field-range check; callers deserializing untrusted
    /// wire data should go through `Hash`'s `Deserialize` impl instead,
    /// which checks the decoded value against `Q`.
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let bytes = hex::decode(s.trim_start_matches("0x"))?;
        if bytes.len() != 32 {
            return Err(HashError::BadLength(bytes.len()));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Hash(out))
    }

    /// Hex text form: a plain hex encoding of the stored little-endian
    /// bytes.
    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a decimal integer (e.g. a revocation nonce) as a field
    /// element.
    pub fn from_decimal(s: &str) -> Result<Self, HashError> {
        let n = U256::from_dec_str(s).map_err(|_| HashError::BadDecimal(s.to_owned()))?;
        Self::from_big_int(n)
    }

    pub fn to_big_int(&self) -> U256 {
        U256::from_little_endian(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Tests bit `n` of the little-endian byte layout, counted from the
    /// least significant bit of byte 0. Used to choose a traversal
    /// direction at tree depth `n`.
    pub fn test_bit(&self, n: usize) -> bool {
        test_bit(&self.0, n)
    }
}

/// Free function form of [`Hash::test_bit`], usable against any
/// little-endian byte slice.
pub fn test_bit(bytes: &[u8], n: usize) -> bool {
    (bytes[n / 8] >> (n % 8)) & 1 == 1
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let hash = Hash::from_hex(&text).map_err(DeError::custom)?;
        if hash.to_big_int() >= Q {
            return Err(DeError::custom(HashError::OutOfField(hash.to_big_int())));
        }
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_round_trips() {
        let h = Hash::from_big_int(U256::zero()).unwrap();
        assert_eq!(h, Hash::ZERO);
        assert_eq!(h.to_big_int(), U256::zero());
    }

    #[test]
    fn one_round_trips() {
        let h = Hash::from_big_int(U256::one()).unwrap();
        assert_eq!(h, Hash::ONE);
        assert_eq!(h.to_big_int(), U256::one());
    }

    // Q - 1 fixture, including its hex text form.
    #[test]
    fn max_is_q_minus_one() {
        let max = Q - U256::one();
        let h = Hash::from_big_int(max).unwrap();
        assert_eq!(h.to_big_int(), max);
        assert_eq!(
            h.hex(),
            "000000f093f5e1439170b97948e833285d588181b64550b829a031e1724e6430"
        );
    }

    #[test]
    fn q_and_above_are_rejected() {
        assert!(matches!(
            Hash::from_big_int(Q),
            Err(HashError::OutOfField(_))
        ));
        assert!(matches!(
            Hash::from_big_int(Q + U256::one()),
            Err(HashError::OutOfField(_))
        ));
    }

    #[test]
    fn hex_round_trips() {
        let h = Hash::from_big_int(U256::from(12345u64)).unwrap();
        let hex = h.hex();
        let parsed = Hash::from_hex(&hex).unwrap();
        assert_eq!(h, parsed);
    }

    #[test]
    fn test_bit_reads_little_endian() {
        let h = Hash::from_big_int(U256::from(0b1010_u64)).unwrap();
        assert!(!h.test_bit(0));
        assert!(h.test_bit(1));
        assert!(!h.test_bit(2));
        assert!(h.test_bit(3));
    }

    #[test]
    fn serde_round_trip() {
        let h = Hash::from_big_int(U256::from(42u64)).unwrap();
        let json = serde_json::to_string(&h).unwrap();
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn serde_rejects_out_of_field_hex() {
        let mut bytes = [0u8; 32];
        Q.to_little_endian(&mut bytes);
        let json = format!("\"{}\"", hex::encode(bytes));
        let result: Result<Hash, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }
}
