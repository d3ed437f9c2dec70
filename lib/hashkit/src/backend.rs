//! Compression backends.
//!
//! One enum arm per algorithm family. Every arm consumes whole blocks of
//! packed words and produces its digest as packed words in the family's word
//! order, truncated to the requested length.

use crate::bits::{PackedBits, WordOrder};
use crate::keccak::{self, Sponge};
use crate::sha1::Sha1;
use crate::sha256::Sha256;
use crate::sha512::Sha512;
use crate::variant::Variant;

#[derive(Clone)]
pub enum Backend {
    Sha1(Sha1),
    /// SHA-224 and SHA-256
    Sha256(Sha256),
    /// SHA-384 and SHA-512
    Sha512(Sha512),
    /// SHA-3, SHAKE, cSHAKE and KMAC
    Keccak(Sponge),
}

impl Backend {
    /// Fresh state for `variant`.
    ///
    /// cSHAKE starts with SHAKE padding and only switches to cSHAKE padding
    /// once a non-empty function name or customization is absorbed.
    pub fn new(variant: Variant) -> Self {
        let rate = variant.block_bits();
        match variant {
            Variant::Sha1 => Backend::Sha1(Sha1::new()),
            Variant::Sha224 => Backend::Sha256(Sha256::new_224()),
            Variant::Sha256 => Backend::Sha256(Sha256::new()),
            Variant::Sha384 => Backend::Sha512(Sha512::new_384()),
            Variant::Sha512 => Backend::Sha512(Sha512::new()),
            Variant::Sha3_224 | Variant::Sha3_256 | Variant::Sha3_384 | Variant::Sha3_512 => {
                Backend::Keccak(Sponge::new(rate, keccak::SUFFIX_SHA3))
            }
            Variant::Shake128 | Variant::Shake256 | Variant::CShake128 | Variant::CShake256 => {
                Backend::Keccak(Sponge::new(rate, keccak::SUFFIX_SHAKE))
            }
            Variant::Kmac128 | Variant::Kmac256 => {
                Backend::Keccak(Sponge::new(rate, keccak::SUFFIX_CSHAKE))
            }
        }
    }

    /// Switch a sponge to cSHAKE domain separation.
    pub fn use_cshake_padding(&mut self) {
        if let Backend::Keccak(sponge) = self {
            sponge.set_suffix(keccak::SUFFIX_CSHAKE);
        }
    }

    /// Absorb whole blocks.
    pub fn absorb(&mut self, blocks: &[u32]) {
        match self {
            Backend::Sha1(state) => state.absorb(blocks),
            Backend::Sha256(state) => state.absorb(blocks),
            Backend::Sha512(state) => state.absorb(blocks),
            Backend::Keccak(sponge) => sponge.absorb(blocks),
        }
    }

    /// Pad `remainder`, finish the computation and return `output_bits` bits.
    ///
    /// `processed_bits` counts everything absorbed before `remainder`; the
    /// sponge does not need it.
    pub fn finalize(self, remainder: PackedBits, processed_bits: u64, output_bits: usize) -> PackedBits {
        let words = match self {
            Backend::Sha1(state) => state.finalize(remainder, processed_bits),
            Backend::Sha256(state) => state.finalize(remainder, processed_bits),
            Backend::Sha512(state) => state.finalize(remainder, processed_bits),
            Backend::Keccak(sponge) => return sponge.finalize(remainder, output_bits),
        };
        PackedBits::from_words(words, output_bits, WordOrder::BigEndian)
    }
}

/// Hash `data` from a fresh state of `variant`.
pub fn digest(variant: Variant, data: PackedBits, output_bits: usize) -> PackedBits {
    Backend::new(variant).finalize(data, 0, output_bits)
}
