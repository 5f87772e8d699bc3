use crate::error::{PaddingError, Result};
use crate::padding::{Padder, PaddingContext, Unpadder};
use serde::{Deserialize, Serialize};

/// Largest block size in bits; the pad length must fit in one byte
pub const MAX_BLOCK_SIZE_BITS: usize = 248;

/// PKCS#7 padding scheme for a fixed block size
///
/// Serialized as the plain block size in bits; deserialization runs the same
/// validation as [`Pkcs7::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Pkcs7 {
    block_size_bits: usize,
}

impl Pkcs7 {
    /// Create a scheme for `block_size_bits`, which must be a non-zero
    /// multiple of 8 below 256.
    pub fn new(block_size_bits: usize) -> Result<Self> {
        if block_size_bits == 0 || block_size_bits > MAX_BLOCK_SIZE_BITS {
            return Err(PaddingError::InvalidParameter(format!(
                "block size {} must be in range 8..=248 bits",
                block_size_bits
            )));
        }
        if block_size_bits % 8 != 0 {
            return Err(PaddingError::InvalidParameter(format!(
                "block size {} must be a multiple of 8",
                block_size_bits
            )));
        }
        Ok(Self { block_size_bits })
    }

    pub fn block_size_bits(&self) -> usize {
        self.block_size_bits
    }

    pub fn block_size_bytes(&self) -> usize {
        self.block_size_bits / 8
    }

    /// Fresh padding context bound to this block size
    pub fn padder(&self) -> Padder {
        Padder::new(self.block_size_bytes())
    }

    /// Fresh unpadding context bound to this block size
    pub fn unpadder(&self) -> Unpadder {
        Unpadder::new(self.block_size_bytes())
    }

    /// Length of the padded output for a message of `message_len` bytes
    pub fn padded_len(&self, message_len: usize) -> usize {
        let block = self.block_size_bytes();
        message_len + (block - message_len % block)
    }

    /// Pad a complete message in one call
    pub fn pad(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut padder = self.padder();
        let mut out = Vec::with_capacity(self.padded_len(message.len()));
        out.extend(padder.update(message)?);
        out.extend(padder.finalize()?);
        Ok(out)
    }

    /// Strip and validate the padding of a complete message
    pub fn unpad(&self, padded: &[u8]) -> Result<Vec<u8>> {
        let mut unpadder = self.unpadder();
        let mut out = unpadder.update(padded)?;
        out.extend(unpadder.finalize()?);
        Ok(out)
    }
}

impl Default for Pkcs7 {
    fn default() -> Self {
        Self {
            block_size_bits: 128,
        }
    }
}

impl TryFrom<usize> for Pkcs7 {
    type Error = PaddingError;
    fn try_from(bits: usize) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<Pkcs7> for usize {
    fn from(scheme: Pkcs7) -> usize {
        scheme.block_size_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_block_sizes() {
        for bits in (8..=248).step_by(8) {
            let scheme = Pkcs7::new(bits).unwrap();
            assert_eq!(scheme.block_size_bytes() * 8, bits);
        }
    }

    #[test]
    fn test_invalid_block_sizes() {
        for bits in [0, 7, 129, 256, 1024] {
            assert!(
                matches!(Pkcs7::new(bits), Err(PaddingError::InvalidParameter(_))),
                "block size {} should be rejected",
                bits
            );
        }
    }

    #[test]
    fn test_padded_len() {
        let scheme = Pkcs7::new(64).unwrap();
        assert_eq!(scheme.padded_len(0), 8);
        assert_eq!(scheme.padded_len(7), 8);
        assert_eq!(scheme.padded_len(8), 16);
        assert_eq!(scheme.padded_len(9), 16);
    }

    #[test]
    fn test_one_shot_matches_streaming() {
        let scheme = Pkcs7::default();
        let message: Vec<u8> = (0..45).collect();

        let mut padder = scheme.padder();
        let mut streamed = padder.update(&message).unwrap();
        streamed.extend(padder.finalize().unwrap());

        assert_eq!(scheme.pad(&message).unwrap(), streamed);
        assert_eq!(scheme.unpad(&streamed).unwrap(), message);
    }

    #[test]
    fn test_factories_are_independent() {
        let scheme = Pkcs7::new(32).unwrap();
        let mut first = scheme.padder();
        let mut second = scheme.padder();
        first.update(b"ab").unwrap();
        first.finalize().unwrap();
        assert_eq!(second.finalize().unwrap(), vec![4u8; 4]);
    }

    #[test]
    fn test_serde_validates() {
        let scheme: Pkcs7 = serde_json::from_str("64").unwrap();
        assert_eq!(scheme.block_size_bits(), 64);
        assert_eq!(serde_json::to_string(&scheme).unwrap(), "64");
        assert!(serde_json::from_str::<Pkcs7>("129").is_err());
    }
}
