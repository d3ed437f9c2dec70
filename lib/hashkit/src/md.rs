//! Merkle–Damgård finalization shared by SHA-1 and SHA-2.

use alloc::vec::Vec;

use crate::bits::PackedBits;

/// Pad a tail shorter than one block into one or two complete blocks.
///
/// Appends a single `1` bit, zero fill, and the total message length in bits
/// as a big-endian integer occupying the last 64 bits (512-bit blocks) or the
/// last 128 bits (1024-bit blocks) of the final block.
pub(crate) fn pad(tail: PackedBits, total_bits: u64, block_bits: usize) -> Vec<u32> {
    let rem = tail.bit_len();
    debug_assert!(rem < block_bits);

    let length_bits = if block_bits == 1024 { 128 } else { 64 };
    let padded_bits = (rem + 1 + length_bits).div_ceil(block_bits) * block_bits;

    let mut words = tail.into_words();
    words.resize(padded_bits / 32, 0);
    words[rem / 32] |= 0x8000_0000 >> (rem % 32);

    let last = words.len() - 1;
    words[last] = total_bits as u32;
    words[last - 1] = (total_bits >> 32) as u32;
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::WordOrder;

    #[test]
    fn test_pad_single_block() {
        let tail = PackedBits::from_bytes(b"abc", WordOrder::BigEndian);
        let words = pad(tail, 24, 512);
        assert_eq!(words.len(), 16);
        assert_eq!(words[0], 0x6162_6380);
        assert!(words[1..15].iter().all(|&w| w == 0));
        assert_eq!(words[15], 24);
    }

    #[test]
    fn test_pad_spills_into_second_block() {
        // 56 bytes leave no room for the length field
        let tail = PackedBits::from_bytes(&[0u8; 56], WordOrder::BigEndian);
        let words = pad(tail, 448, 512);
        assert_eq!(words.len(), 32);
        assert_eq!(words[14], 0x8000_0000);
        assert_eq!(words[31], 448);
    }

    #[test]
    fn test_pad_partial_byte() {
        let tail = PackedBits::from_words(alloc::vec![0xa000_0000], 3, WordOrder::BigEndian);
        let words = pad(tail, 1027, 1024);
        assert_eq!(words.len(), 32);
        assert_eq!(words[0], 0xb000_0000);
        assert_eq!(words[30], 0);
        assert_eq!(words[31], 1027);
    }
}
