//! SHA-256 Implementation
//!
//! Pure Rust SHA-256 compression function (FIPS 180-4), shared by SHA-224
//! and SHA-256. The two differ only in their initial hash values and the
//! number of output words kept.

use alloc::vec::Vec;

use crate::bits::PackedBits;
use crate::md;

const BLOCK_BITS: usize = 512;

/// SHA-224/SHA-256 chaining state.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
}

impl Sha256 {
    /// Initial hash values (first 32 bits of fractional parts of square roots of first 8 primes).
    const H: [u32; 8] = [
        0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
        0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
    ];

    /// Round constants (first 32 bits of fractional parts of cube roots of first 64 primes).
    const K: [u32; 64] = [
        0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5,
        0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
        0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3,
        0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
        0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc,
        0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
        0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7,
        0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
        0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
        0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
        0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3,
        0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
        0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5,
        0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
        0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208,
        0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
    ];

    /// SHA-224 initial hash values (second 32 bits of the fractional parts of
    /// the square roots of the 9th through 16th primes).
    const H_224: [u32; 8] = [
        0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939,
        0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
    ];

    /// Create a SHA-256 state.
    pub const fn new() -> Self {
        Self { state: Self::H }
    }

    /// Create a SHA-224 state.
    pub const fn new_224() -> Self {
        Self { state: Self::H_224 }
    }

    /// Process a 16-word block.
    fn compress(&mut self, block: &[u32]) {
        debug_assert_eq!(block.len(), 16);

        let mut w = [0u32; 64];
        w[..16].copy_from_slice(block);

        // Extend to 64 words
        for i in 16..64 {
            let s0 = w[i - 15].rotate_right(7) ^ w[i - 15].rotate_right(18) ^ (w[i - 15] >> 3);
            let s1 = w[i - 2].rotate_right(17) ^ w[i - 2].rotate_right(19) ^ (w[i - 2] >> 10);
            w[i] = w[i - 16].wrapping_add(s0).wrapping_add(w[i - 7]).wrapping_add(s1);
        }

        // Initialize working variables
        let mut a = self.state[0];
        let mut b = self.state[1];
        let mut c = self.state[2];
        let mut d = self.state[3];
        let mut e = self.state[4];
        let mut f = self.state[5];
        let mut g = self.state[6];
        let mut h = self.state[7];

        // 64 rounds
        for i in 0..64 {
            let s1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
            let ch = (e & f) ^ ((!e) & g);
            let temp1 = h.wrapping_add(s1).wrapping_add(ch).wrapping_add(Self::K[i]).wrapping_add(w[i]);
            let s0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
            let maj = (a & b) ^ (a & c) ^ (b & c);
            let temp2 = s0.wrapping_add(maj);

            h = g;
            g = f;
            f = e;
            e = d.wrapping_add(temp1);
            d = c;
            c = b;
            b = a;
            a = temp1.wrapping_add(temp2);
        }

        // Add to state
        self.state[0] = self.state[0].wrapping_add(a);
        self.state[1] = self.state[1].wrapping_add(b);
        self.state[2] = self.state[2].wrapping_add(c);
        self.state[3] = self.state[3].wrapping_add(d);
        self.state[4] = self.state[4].wrapping_add(e);
        self.state[5] = self.state[5].wrapping_add(f);
        self.state[6] = self.state[6].wrapping_add(g);
        self.state[7] = self.state[7].wrapping_add(h);
    }

    /// Absorb whole 512-bit blocks.
    pub fn absorb(&mut self, blocks: &[u32]) {
        for block in blocks.chunks_exact(BLOCK_BITS / 32) {
            self.compress(block);
        }
    }

    /// Pad and return all eight state words; callers truncate for SHA-224.
    pub fn finalize(mut self, remainder: PackedBits, processed_bits: u64) -> Vec<u32> {
        let total_bits = processed_bits + remainder.bit_len() as u64;
        let (blocks, tail) = remainder.take_blocks(BLOCK_BITS);
        self.absorb(&blocks);
        self.absorb(&md::pad(tail, total_bits, BLOCK_BITS));
        self.state.to_vec()
    }
}
