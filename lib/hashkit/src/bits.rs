//! Packed Bit Buffers
//!
//! Data travels through the engine as 32-bit words plus an exact bit length.
//! SHA-1 and SHA-2 pack bytes big-endian into each word with bits numbered
//! MSB-first; the Keccak family packs bytes little-endian with bits numbered
//! LSB-first. Bits past `bit_len` in the last word are always zero.

use alloc::vec::Vec;

/// Byte order used when packing bytes into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOrder {
    /// SHA-1 / SHA-2
    BigEndian,
    /// SHA-3 / SHAKE / cSHAKE / KMAC
    LittleEndian,
}

impl WordOrder {
    /// Shift of byte `index` inside its word.
    #[inline]
    const fn byte_shift(self, index: usize) -> u32 {
        match self {
            WordOrder::BigEndian => 8 * (3 - (index % 4)) as u32,
            WordOrder::LittleEndian => 8 * (index % 4) as u32,
        }
    }

    /// Shift of bit `index` inside its word.
    #[inline]
    const fn bit_shift(self, index: usize) -> u32 {
        let within = match self {
            WordOrder::BigEndian => 7 - (index % 8),
            WordOrder::LittleEndian => index % 8,
        };
        self.byte_shift(index / 8) + within as u32
    }
}

/// Arbitrary-length binary data as packed words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    words: Vec<u32>,
    bit_len: usize,
    order: WordOrder,
}

impl PackedBits {
    /// Empty buffer.
    pub const fn new(order: WordOrder) -> Self {
        Self {
            words: Vec::new(),
            bit_len: 0,
            order,
        }
    }

    /// Pack a byte sequence.
    pub fn from_bytes(bytes: &[u8], order: WordOrder) -> Self {
        let mut packed = Self::new(order);
        packed.extend_from_bytes(bytes);
        packed
    }

    /// Wrap already packed words, keeping only the first `bit_len` bits.
    pub fn from_words(words: Vec<u32>, bit_len: usize, order: WordOrder) -> Self {
        let mut packed = Self {
            words,
            bit_len: 0,
            order,
        };
        packed.words.resize(bit_len.div_ceil(32), 0);
        packed.bit_len = bit_len;
        packed.clear_tail();
        packed
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn into_words(self) -> Vec<u32> {
        self.words
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn order(&self) -> WordOrder {
        self.order
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Byte `index`, counting from the start of the buffer.
    pub fn byte(&self, index: usize) -> u8 {
        (self.words[index / 4] >> self.order.byte_shift(index)) as u8
    }

    /// Bit `index`, counting from the start of the buffer.
    pub fn bit(&self, index: usize) -> bool {
        (self.words[index / 32] >> self.order.bit_shift(index)) & 1 == 1
    }

    /// Unpack into bytes; a partial trailing byte is emitted zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        (0..self.bit_len.div_ceil(8)).map(|i| self.byte(i)).collect()
    }

    /// Append whole bytes.
    pub fn extend_from_bytes(&mut self, bytes: &[u8]) {
        if self.bit_len % 8 != 0 {
            for &byte in bytes {
                for i in 0..8 {
                    let set = match self.order {
                        WordOrder::BigEndian => (byte >> (7 - i)) & 1 == 1,
                        WordOrder::LittleEndian => (byte >> i) & 1 == 1,
                    };
                    self.push_bit(set);
                }
            }
            return;
        }

        let mut offset = self.bit_len / 8;
        self.words.reserve((offset + bytes.len()).div_ceil(4) - self.words.len());
        for &byte in bytes {
            if offset / 4 == self.words.len() {
                self.words.push(0);
            }
            self.words[offset / 4] |= u32::from(byte) << self.order.byte_shift(offset);
            offset += 1;
        }
        self.bit_len += bytes.len() * 8;
    }

    /// Concatenate `other` at the bit level.
    ///
    /// Engine input is always whole bytes and takes the byte path; the
    /// bit-by-bit path handles a `self` that ends mid-byte.
    pub fn append(&mut self, other: &PackedBits) {
        debug_assert_eq!(self.order, other.order);

        if self.bit_len % 8 == 0 {
            let bytes = other.to_bytes();
            let bit_len = self.bit_len + other.bit_len;
            self.extend_from_bytes(&bytes);
            // The zero-filled tail of other's last byte is not data.
            self.bit_len = bit_len;
            return;
        }

        for i in 0..other.bit_len {
            self.push_bit(other.bit(i));
        }
    }

    fn push_bit(&mut self, set: bool) {
        if self.bit_len % 32 == 0 {
            self.words.push(0);
        }
        if set {
            self.words[self.bit_len / 32] |= 1 << self.order.bit_shift(self.bit_len);
        }
        self.bit_len += 1;
    }

    /// Shorten to `bit_len` bits.
    pub fn truncate(&mut self, bit_len: usize) {
        if bit_len >= self.bit_len {
            return;
        }
        self.words.truncate(bit_len.div_ceil(32));
        self.bit_len = bit_len;
        self.clear_tail();
    }

    /// Split off every complete block of `block_bits` bits.
    ///
    /// Returns the words of the complete blocks, back to back, and the
    /// remaining tail (possibly empty).
    pub fn take_blocks(mut self, block_bits: usize) -> (Vec<u32>, PackedBits) {
        debug_assert!(block_bits > 0 && block_bits % 32 == 0);

        let count = self.bit_len / block_bits;
        let taken = count * (block_bits / 32);
        let blocks = self.words.drain(..taken).collect();
        self.bit_len -= count * block_bits;
        (blocks, self)
    }

    fn clear_tail(&mut self) {
        for i in self.bit_len..self.words.len() * 32 {
            self.words[i / 32] &= !(1 << self.order.bit_shift(i));
        }
    }
}
