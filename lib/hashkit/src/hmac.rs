//! HMAC Implementation
//!
//! HMAC (RFC 2104, FIPS 198-1) over any fixed-output variant. The key is
//! reduced to one block of the underlying hash (the sponge rate for SHA-3).

use alloc::vec::Vec;

use crate::backend::{self, Backend};
use crate::bits::PackedBits;
use crate::error::{Error, Result};
use crate::variant::Variant;

/// Padded HMAC key blocks, packed in the variant's word order.
#[derive(Clone)]
pub struct HmacKey {
    variant: Variant,
    inner_pad: Vec<u32>,
    outer_pad: Vec<u32>,
}

impl HmacKey {
    /// Derive the inner and outer pads from raw key bytes.
    ///
    /// Keys longer than a block are hashed first; shorter keys are zero
    /// padded.
    pub fn derive(variant: Variant, key: &[u8]) -> Result<Self> {
        let output_bits = variant
            .output_bits()
            .ok_or(Error::UnsupportedOption("hmacKey"))?;
        let block_bytes = variant.block_bits() / 8;
        let order = variant.word_order();

        let mut key_block = if key.len() > block_bytes {
            backend::digest(variant, PackedBits::from_bytes(key, order), output_bits).to_bytes()
        } else {
            key.to_vec()
        };
        key_block.resize(block_bytes, 0);

        // Inner key = key XOR 0x36
        let inner_key_pad: Vec<u8> = key_block.iter().map(|b| b ^ 0x36).collect();
        // Outer key = key XOR 0x5c
        let outer_key_pad: Vec<u8> = key_block.iter().map(|b| b ^ 0x5c).collect();

        Ok(Self {
            variant,
            inner_pad: PackedBits::from_bytes(&inner_key_pad, order).into_words(),
            outer_pad: PackedBits::from_bytes(&outer_key_pad, order).into_words(),
        })
    }

    /// Block to absorb before any message data.
    pub fn inner_pad(&self) -> &[u32] {
        &self.inner_pad
    }

    /// Outer hash over the already finished inner digest.
    pub fn finish(&self, inner_digest: PackedBits, output_bits: usize) -> PackedBits {
        let mut outer = Backend::new(self.variant);
        outer.absorb(&self.outer_pad);
        outer.finalize(inner_digest, self.variant.block_bits() as u64, output_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(variant: Variant, key: &[u8], data: &[u8]) -> alloc::string::String {
        let key = HmacKey::derive(variant, key).unwrap();
        let output_bits = variant.output_bits().unwrap();
        let block_bits = variant.block_bits() as u64;

        let mut inner = Backend::new(variant);
        inner.absorb(key.inner_pad());
        let message = PackedBits::from_bytes(data, variant.word_order());
        let inner_digest = inner.finalize(message, block_bits, output_bits);
        hex::encode(key.finish(inner_digest, output_bits).to_bytes())
    }

    fn key(len: u8) -> Vec<u8> {
        (0..len).collect()
    }

    #[test]
    fn test_hmac_sha256_short_key() {
        assert_eq!(
            mac(Variant::Sha256, &key(32), b"Sample message for keylen<blocklen"),
            "a28cf43130ee696a98f14a37678b56bcfcbdd9e5cf69717fecf5480f0ebdf790"
        );
    }

    #[test]
    fn test_hmac_sha256_long_key() {
        assert_eq!(
            mac(Variant::Sha256, &key(100), b"Sample message for keylen=blocklen"),
            "bdccb6c72ddeadb500ae768386cb38cc41c63dbb0878ddb9c7a38a431b78378d"
        );
    }

    #[test]
    fn test_hmac_sha1_block_key() {
        assert_eq!(
            mac(Variant::Sha1, &key(64), b"Sample message for keylen=blocklen"),
            "5fd596ee78d5553c8ff4e72d266dfd192366da29"
        );
    }

    #[test]
    fn test_hmac_sha3_256() {
        assert_eq!(
            mac(Variant::Sha3_256, &key(32), b"Sample message for keylen<blocklen"),
            "4fe8e202c4f058e8dddc23d8c34e467343e23555e24fc2f025d598f558f67205"
        );
    }

    #[test]
    fn test_hmac_rejects_variable_output() {
        assert!(matches!(
            HmacKey::derive(Variant::Shake128, b"key"),
            Err(Error::UnsupportedOption(_))
        ));
    }
}
