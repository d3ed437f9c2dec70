//! SHA-1 Implementation
//!
//! Pure Rust SHA-1 compression function (FIPS 180-4). Kept for
//! interoperability; SHA-1 is not collision resistant.

use alloc::vec::Vec;

use crate::bits::PackedBits;
use crate::md;

const BLOCK_BITS: usize = 512;

/// SHA-1 chaining state.
#[derive(Clone)]
pub struct Sha1 {
    state: [u32; 5],
}

impl Sha1 {
    const H: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

    pub const fn new() -> Self {
        Self { state: Self::H }
    }

    /// Process a 16-word block.
    fn compress(&mut self, block: &[u32]) {
        debug_assert_eq!(block.len(), 16);

        let mut w = [0u32; 80];
        w[..16].copy_from_slice(block);
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;

        for (i, &wi) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) ^ (!b & d), 0x5a827999),
                20..=39 => (b ^ c ^ d, 0x6ed9eba1),
                40..=59 => ((b & c) ^ (b & d) ^ (c & d), 0x8f1bbcdc),
                _ => (b ^ c ^ d, 0xca62c1d6),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(wi);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        for (s, v) in self.state.iter_mut().zip([a, b, c, d, e]) {
            *s = s.wrapping_add(v);
        }
    }

    /// Absorb whole 512-bit blocks.
    pub fn absorb(&mut self, blocks: &[u32]) {
        for block in blocks.chunks_exact(BLOCK_BITS / 32) {
            self.compress(block);
        }
    }

    /// Pad and return the final chaining value as five big-endian words.
    pub fn finalize(mut self, remainder: PackedBits, processed_bits: u64) -> Vec<u32> {
        let total_bits = processed_bits + remainder.bit_len() as u64;
        let (blocks, tail) = remainder.take_blocks(BLOCK_BITS);
        self.absorb(&blocks);
        self.absorb(&md::pad(tail, total_bits, BLOCK_BITS));
        self.state.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::WordOrder;

    fn sha1(data: &[u8]) -> Vec<u8> {
        let words = Sha1::new().finalize(PackedBits::from_bytes(data, WordOrder::BigEndian), 0);
        PackedBits::from_words(words, 160, WordOrder::BigEndian).to_bytes()
    }

    #[test]
    fn test_sha1_abc() {
        assert_eq!(
            hex::encode(sha1(b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_sha1_two_blocks() {
        assert_eq!(
            hex::encode(sha1(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq")),
            "84983e441c3bd26ebaae4aa1f95129e5e54670f1"
        );
    }
}
