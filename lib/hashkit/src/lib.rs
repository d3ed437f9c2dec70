//! # Hashkit
//!
//! Pure Rust incremental hashing for the SHA-1, SHA-2 and SHA-3 families,
//! with HMAC, cSHAKE and KMAC keyed and customized constructions. Works in
//! `no_std` environments with an allocator.
//!
//! ## Algorithms
//!
//! - **SHA-1**: 160-bit output (legacy)
//! - **SHA-224 / SHA-256 / SHA-384 / SHA-512**: FIPS 180-4
//! - **SHA3-224 / SHA3-256 / SHA3-384 / SHA3-512**: FIPS 202
//! - **SHAKE128 / SHAKE256**: extendable output, FIPS 202
//! - **CSHAKE128 / CSHAKE256 / KMAC128 / KMAC256**: NIST SP 800-185
//! - **HMAC** over every fixed-output variant
//!
//! ## Design
//!
//! - Input arrives in any number of chunks; the result only depends on the
//!   concatenation
//! - Reading a digest never consumes the running state
//! - Inputs and outputs in TEXT, HEX, B64, BYTES or raw byte form
//! - No global state; each [`Hasher`] is independent
//!
//! ```
//! use hashkit::Variant;
//!
//! let digest = hashkit::digest(Variant::Sha3_256, b"abc").unwrap();
//! assert_eq!(digest.len(), 32);
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::vec::Vec;

mod backend;
pub mod bits;
pub mod error;
pub mod format;
pub mod hasher;
pub mod hmac;
pub mod keccak;
mod md;
pub mod options;
pub mod sha1;
pub mod sha256;
pub mod sha512;
pub mod sp800_185;
pub mod variant;

pub use bits::{PackedBits, WordOrder};
pub use error::{Error, Result};
pub use format::{Encoding, Format, Input, Output, OutputFormat, OutputOptions};
pub use hasher::{Hasher, MAX_OUTPUT_BITS};
pub use options::{KeyInput, Options};
pub use variant::{Capabilities, Variant};

/// One-shot digest of `data` with the variant's fixed output length.
///
/// Variable-length variants need an explicit length; use a [`Hasher`] and
/// [`Hasher::finalize_bytes`] for those.
pub fn digest(variant: Variant, data: &[u8]) -> Result<Vec<u8>> {
    let mut hasher = Hasher::new(variant, Format::Uint8Array, Options::default())?;
    hasher.update(data)?;
    hasher.finalize_bytes(None)
}

/// One-shot HMAC of `data` under `key`.
pub fn hmac(variant: Variant, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let options = Options::new().hmac_key(KeyInput::raw(key));
    let mut hasher = Hasher::new(variant, Format::Uint8Array, options)?;
    hasher.update(data)?;
    hasher.hmac_bytes()
}
