//! Keccak Sponge
//!
//! Keccak-f[1600] permutation (FIPS 202) and the sponge construction used by
//! SHA-3, SHAKE, cSHAKE and KMAC. Lanes are native `u64`s indexed `x + 5y`;
//! data arrives as little-endian 32-bit words, two per lane.

use alloc::vec::Vec;

use crate::bits::{PackedBits, WordOrder};

/// Domain separation bits for SHA3-*, including the first padding bit.
pub const SUFFIX_SHA3: u8 = 0x06;
/// Domain separation bits for SHAKE*.
pub const SUFFIX_SHAKE: u8 = 0x1f;
/// Domain separation bits for customized cSHAKE* and KMAC*.
pub const SUFFIX_CSHAKE: u8 = 0x04;

/// Round constants for ι.
const RC: [u64; 24] = [
    0x0000000000000001, 0x0000000000008082, 0x800000000000808a, 0x8000000080008000,
    0x000000000000808b, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
    0x000000000000008a, 0x0000000000000088, 0x0000000080008009, 0x000000008000000a,
    0x000000008000808b, 0x800000000000008b, 0x8000000000008089, 0x8000000000008003,
    0x8000000000008002, 0x8000000000000080, 0x000000000000800a, 0x800000008000000a,
    0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

/// Rotation offsets for ρ, indexed `[x][y]`.
const RHO: [[u32; 5]; 5] = [
    [0, 36, 3, 41, 18],
    [1, 44, 10, 45, 2],
    [62, 6, 43, 15, 61],
    [28, 55, 25, 21, 56],
    [27, 20, 39, 8, 14],
];

/// Keccak-f[1600]: 24 rounds of θ, ρ, π, χ, ι.
pub fn keccak_f(a: &mut [u64; 25]) {
    for rc in RC {
        // θ
        let mut c = [0u64; 5];
        for (x, col) in c.iter_mut().enumerate() {
            *col = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                a[x + 5 * y] ^= d;
            }
        }

        // ρ and π
        let mut b = [0u64; 25];
        for x in 0..5 {
            for y in 0..5 {
                b[y + 5 * ((2 * x + 3 * y) % 5)] = a[x + 5 * y].rotate_left(RHO[x][y]);
            }
        }

        // χ
        for y in 0..5 {
            for x in 0..5 {
                a[x + 5 * y] = b[x + 5 * y] ^ (!b[(x + 1) % 5 + 5 * y] & b[(x + 2) % 5 + 5 * y]);
            }
        }

        // ι
        a[0] ^= rc;
    }
}

/// Sponge state with a fixed rate and domain suffix.
#[derive(Clone)]
pub struct Sponge {
    lanes: [u64; 25],
    rate_bits: usize,
    suffix: u8,
}

impl Sponge {
    pub const fn new(rate_bits: usize, suffix: u8) -> Self {
        Self {
            lanes: [0; 25],
            rate_bits,
            suffix,
        }
    }

    /// Switch the domain suffix; only meaningful before finalization.
    pub fn set_suffix(&mut self, suffix: u8) {
        self.suffix = suffix;
    }

    /// XOR whole rate-sized blocks into the state, permuting after each.
    pub fn absorb(&mut self, blocks: &[u32]) {
        for block in blocks.chunks_exact(self.rate_bits / 32) {
            for (lane, pair) in self.lanes.iter_mut().zip(block.chunks_exact(2)) {
                *lane ^= (u64::from(pair[1]) << 32) | u64::from(pair[0]);
            }
            keccak_f(&mut self.lanes);
        }
    }

    /// Pad, absorb the remainder and squeeze `output_bits` bits.
    pub fn finalize(mut self, remainder: PackedBits, output_bits: usize) -> PackedBits {
        let (blocks, tail) = remainder.take_blocks(self.rate_bits);
        self.absorb(&blocks);

        let rem = tail.bit_len();
        let suffix_bits = (8 - self.suffix.leading_zeros()) as usize;
        let padded_bits = (rem + suffix_bits + 1).div_ceil(self.rate_bits) * self.rate_bits;

        let mut words = tail.into_words();
        words.resize(padded_bits / 32, 0);

        let spread = u64::from(self.suffix) << (rem % 32);
        words[rem / 32] ^= spread as u32;
        if spread >> 32 != 0 {
            words[rem / 32 + 1] ^= (spread >> 32) as u32;
        }
        let last = words.len() - 1;
        words[last] ^= 0x8000_0000;
        self.absorb(&words);

        self.squeeze(output_bits)
    }

    fn squeeze(mut self, output_bits: usize) -> PackedBits {
        let lanes_per_block = self.rate_bits / 64;
        let mut out = Vec::with_capacity(output_bits.div_ceil(32) + 1);
        let mut lane = 0;
        while out.len() * 32 < output_bits {
            if lane == lanes_per_block {
                keccak_f(&mut self.lanes);
                lane = 0;
            }
            out.push(self.lanes[lane] as u32);
            out.push((self.lanes[lane] >> 32) as u32);
            lane += 1;
        }
        PackedBits::from_words(out, output_bits, WordOrder::LittleEndian)
    }
}
