//! NIST SP 800-185 string encodings used by cSHAKE and KMAC.

use alloc::vec::Vec;

/// Big-endian bytes of `x` without leading zeros; `0` encodes as one byte.
fn minimal_be(x: u64) -> Vec<u8> {
    let bytes = x.to_be_bytes();
    let skip = bytes.iter().take(7).take_while(|&&b| b == 0).count();
    bytes[skip..].to_vec()
}

/// `left_encode(x)`: byte count followed by the big-endian value.
pub fn left_encode(x: u64) -> Vec<u8> {
    let value = minimal_be(x);
    let mut out = Vec::with_capacity(value.len() + 1);
    out.push(value.len() as u8);
    out.extend_from_slice(&value);
    out
}

/// `right_encode(x)`: big-endian value followed by its byte count.
pub fn right_encode(x: u64) -> Vec<u8> {
    let mut out = minimal_be(x);
    out.push(out.len() as u8);
    out
}

/// `encode_string(s)`: `left_encode` of the bit length, then `s`.
pub fn encode_string(s: &[u8]) -> Vec<u8> {
    let mut out = left_encode(s.len() as u64 * 8);
    out.extend_from_slice(s);
    out
}

/// `bytepad(x, w)`: `left_encode(w) || x`, zero-filled to a multiple of `w`.
pub fn bytepad(x: &[u8], w: usize) -> Vec<u8> {
    debug_assert!(w > 0);
    let mut out = left_encode(w as u64);
    out.extend_from_slice(x);
    let padded = out.len().div_ceil(w) * w;
    out.resize(padded, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_left_encode() {
        assert_eq!(left_encode(0), vec![0x01, 0x00]);
        assert_eq!(left_encode(255), vec![0x01, 0xff]);
        assert_eq!(left_encode(256), vec![0x02, 0x01, 0x00]);
        assert_eq!(left_encode(168), vec![0x01, 0xa8]);
        assert_eq!(
            left_encode(u64::MAX),
            vec![0x08, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_right_encode() {
        assert_eq!(right_encode(0), vec![0x00, 0x01]);
        assert_eq!(right_encode(256), vec![0x01, 0x00, 0x02]);
        assert_eq!(right_encode(512), vec![0x02, 0x00, 0x02]);
    }

    #[test]
    fn test_encode_string() {
        assert_eq!(encode_string(b""), vec![0x01, 0x00]);
        assert_eq!(encode_string(b"KMAC"), vec![0x01, 0x20, b'K', b'M', b'A', b'C']);
    }

    #[test]
    fn test_bytepad() {
        let padded = bytepad(&[0xaa, 0xbb], 8);
        assert_eq!(padded, vec![0x01, 0x08, 0xaa, 0xbb, 0, 0, 0, 0]);

        // exact fit adds no extra block
        let padded = bytepad(&[0x11; 6], 8);
        assert_eq!(padded.len(), 8);

        let padded = bytepad(&[0x11; 7], 8);
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..2], &[0x01, 0x08]);
    }
}
