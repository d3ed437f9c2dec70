//! Algorithm Variants
//!
//! Static per-variant parameters: block size, output length, word order and
//! the set of construction options each variant accepts.

use alloc::string::ToString;
use core::str::FromStr;

use bitflags::bitflags;

use crate::bits::WordOrder;
use crate::error::{Error, Result};

bitflags! {
    /// Options and behaviours a variant supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// Output length chosen by the caller
        const VARIABLE_OUTPUT = 1 << 0;
        /// Keyed with HMAC
        const HMAC = 1 << 1;
        /// Accepts `num_rounds`
        const NUM_ROUNDS = 1 << 2;
        /// Accepts a customization string
        const CUSTOMIZATION = 1 << 3;
        /// Accepts a function-name string
        const FUNCTION_NAME = 1 << 4;
        /// Requires a KMAC key
        const KMAC_KEY = 1 << 5;
    }
}

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Shake128,
    Shake256,
    CShake128,
    CShake256,
    Kmac128,
    Kmac256,
}

impl Variant {
    /// Every variant, in declaration order.
    pub const ALL: [Variant; 15] = [
        Variant::Sha1,
        Variant::Sha224,
        Variant::Sha256,
        Variant::Sha384,
        Variant::Sha512,
        Variant::Sha3_224,
        Variant::Sha3_256,
        Variant::Sha3_384,
        Variant::Sha3_512,
        Variant::Shake128,
        Variant::Shake256,
        Variant::CShake128,
        Variant::CShake256,
        Variant::Kmac128,
        Variant::Kmac256,
    ];

    /// Canonical algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Sha1 => "SHA-1",
            Variant::Sha224 => "SHA-224",
            Variant::Sha256 => "SHA-256",
            Variant::Sha384 => "SHA-384",
            Variant::Sha512 => "SHA-512",
            Variant::Sha3_224 => "SHA3-224",
            Variant::Sha3_256 => "SHA3-256",
            Variant::Sha3_384 => "SHA3-384",
            Variant::Sha3_512 => "SHA3-512",
            Variant::Shake128 => "SHAKE128",
            Variant::Shake256 => "SHAKE256",
            Variant::CShake128 => "CSHAKE128",
            Variant::CShake256 => "CSHAKE256",
            Variant::Kmac128 => "KMAC128",
            Variant::Kmac256 => "KMAC256",
        }
    }

    /// Block size (sponge rate for the Keccak family) in bits.
    pub const fn block_bits(self) -> usize {
        match self {
            Variant::Sha1 | Variant::Sha224 | Variant::Sha256 => 512,
            Variant::Sha384 | Variant::Sha512 => 1024,
            Variant::Sha3_224 => 1152,
            Variant::Sha3_256 => 1088,
            Variant::Sha3_384 => 832,
            Variant::Sha3_512 => 576,
            Variant::Shake128 | Variant::CShake128 | Variant::Kmac128 => 1344,
            Variant::Shake256 | Variant::CShake256 | Variant::Kmac256 => 1088,
        }
    }

    /// Fixed output length in bits, `None` when the caller chooses it.
    pub const fn output_bits(self) -> Option<usize> {
        match self {
            Variant::Sha1 => Some(160),
            Variant::Sha224 | Variant::Sha3_224 => Some(224),
            Variant::Sha256 | Variant::Sha3_256 => Some(256),
            Variant::Sha384 | Variant::Sha3_384 => Some(384),
            Variant::Sha512 | Variant::Sha3_512 => Some(512),
            _ => None,
        }
    }

    /// Whether the variant is built on the Keccak sponge.
    pub const fn is_sponge(self) -> bool {
        !matches!(
            self,
            Variant::Sha1 | Variant::Sha224 | Variant::Sha256 | Variant::Sha384 | Variant::Sha512
        )
    }

    pub const fn word_order(self) -> WordOrder {
        if self.is_sponge() {
            WordOrder::LittleEndian
        } else {
            WordOrder::BigEndian
        }
    }

    pub fn capabilities(self) -> Capabilities {
        match self {
            Variant::Shake128 | Variant::Shake256 => {
                Capabilities::VARIABLE_OUTPUT | Capabilities::NUM_ROUNDS
            }
            Variant::CShake128 | Variant::CShake256 => {
                Capabilities::VARIABLE_OUTPUT
                    | Capabilities::CUSTOMIZATION
                    | Capabilities::FUNCTION_NAME
            }
            Variant::Kmac128 | Variant::Kmac256 => {
                Capabilities::VARIABLE_OUTPUT | Capabilities::CUSTOMIZATION | Capabilities::KMAC_KEY
            }
            _ => Capabilities::HMAC | Capabilities::NUM_ROUNDS,
        }
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| Error::UnsupportedVariant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for variant in Variant::ALL {
            assert_eq!(variant.name().parse::<Variant>(), Ok(variant));
        }
        assert_eq!(
            "SHA-TEST".parse::<Variant>(),
            Err(Error::UnsupportedVariant("SHA-TEST".to_string()))
        );
    }

    #[test]
    fn test_sponge_rates() {
        // rate = 1600 - 2 * security strength
        assert_eq!(Variant::Sha3_256.block_bits(), 1600 - 2 * 256);
        assert_eq!(Variant::Shake128.block_bits(), 1600 - 2 * 128);
        assert_eq!(Variant::Kmac256.block_bits(), 1600 - 2 * 256);
    }

    #[test]
    fn test_capabilities() {
        assert!(Variant::Sha256.capabilities().contains(Capabilities::HMAC));
        assert!(!Variant::Shake128.capabilities().contains(Capabilities::HMAC));
        assert!(Variant::Kmac128.capabilities().contains(Capabilities::KMAC_KEY));
        assert!(!Variant::Kmac128.capabilities().contains(Capabilities::FUNCTION_NAME));
        assert!(Variant::CShake256.capabilities().contains(Capabilities::VARIABLE_OUTPUT));
        assert_eq!(Variant::Sha3_512.output_bits(), Some(512));
        assert_eq!(Variant::Shake256.output_bits(), None);
    }
}
