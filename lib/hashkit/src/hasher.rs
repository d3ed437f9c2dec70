//! Incremental Hashing Engine
//!
//! A [`Hasher`] buffers input into whole blocks, feeds them to the variant's
//! backend and keeps the tail for the next call. Reading a digest works on a
//! copy of the state, so `update` may continue after any number of reads.
//!
//! ```
//! use hashkit::{Format, Hasher, Options, OutputFormat, OutputOptions, Variant};
//!
//! let mut hasher = Hasher::new(Variant::Sha256, Format::Text, Options::default()).unwrap();
//! hasher.update("ab").unwrap();
//! hasher.update("c").unwrap();
//! let hash = hasher.get_hash(OutputFormat::Hex, &OutputOptions::default()).unwrap();
//! assert_eq!(
//!     hash.as_str(),
//!     Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
//! );
//! ```

use alloc::vec::Vec;

use crate::backend::{self, Backend};
use crate::bits::PackedBits;
use crate::error::{Error, Result};
use crate::format::{self, Encoding, Format, Input, Output, OutputFormat, OutputOptions};
use crate::hmac::HmacKey;
use crate::options::{KeyInput, Options};
use crate::sp800_185::{bytepad, encode_string, right_encode};
use crate::variant::{Capabilities, Variant};

/// Longest output, in bits, that SHAKE, cSHAKE and KMAC will squeeze (64 MiB).
pub const MAX_OUTPUT_BITS: usize = 1 << 29;

/// Incremental hash, HMAC, cSHAKE or KMAC computation.
#[derive(Clone)]
pub struct Hasher {
    variant: Variant,
    input_format: Format,
    encoding: Encoding,
    num_rounds: u32,
    state: Backend,
    remainder: PackedBits,
    /// Bits absorbed into `state` so far, including any key or prefix block
    processed_bits: u64,
    hmac: Option<HmacKey>,
    update_called: bool,
}

impl Hasher {
    /// Create a hasher, validating `options` against the variant.
    ///
    /// Keys and customization strings are decoded and absorbed here; nothing
    /// is kept for later except the derived HMAC outer pad.
    pub fn new(variant: Variant, input_format: Format, options: Options) -> Result<Self> {
        let caps = variant.capabilities();

        if options.encoding != Encoding::default() && input_format != Format::Text {
            return Err(Error::UnsupportedOption("encoding applies to TEXT input only"));
        }
        let num_rounds = match options.num_rounds {
            None => 1,
            Some(0) => return Err(Error::UnsupportedOption("numRounds must be an integer >= 1")),
            Some(_) if !caps.contains(Capabilities::NUM_ROUNDS) => {
                return Err(Error::UnsupportedOption("numRounds"));
            }
            Some(n) => n,
        };
        if options.hmac_key.is_some() {
            if !caps.contains(Capabilities::HMAC) {
                return Err(Error::UnsupportedOption("hmacKey"));
            }
            if num_rounds != 1 {
                return Err(Error::UnsupportedOption("numRounds cannot be combined with hmacKey"));
            }
        }
        if options.customization.is_some() && !caps.contains(Capabilities::CUSTOMIZATION) {
            return Err(Error::UnsupportedOption("customization"));
        }
        if options.func_name.is_some() && !caps.contains(Capabilities::FUNCTION_NAME) {
            return Err(Error::UnsupportedOption("funcName"));
        }
        if options.kmac_key.is_some() && !caps.contains(Capabilities::KMAC_KEY) {
            return Err(Error::UnsupportedOption("kmacKey"));
        }

        let hmac_key = decode_option(options.hmac_key.as_ref())?;
        let customization = decode_option(options.customization.as_ref())?.unwrap_or_default();
        let func_name = decode_option(options.func_name.as_ref())?.unwrap_or_default();
        let kmac_key = decode_option(options.kmac_key.as_ref())?;
        if caps.contains(Capabilities::KMAC_KEY) && kmac_key.as_ref().map_or(true, Vec::is_empty) {
            return Err(Error::MissingRequiredOption("kmacKey"));
        }

        let mut hasher = Self {
            variant,
            input_format,
            encoding: options.encoding,
            num_rounds,
            state: Backend::new(variant),
            remainder: PackedBits::new(variant.word_order()),
            processed_bits: 0,
            hmac: None,
            update_called: false,
        };

        if let Some(key) = kmac_key {
            hasher.absorb_prefix(b"KMAC", &customization);
            let rate_bytes = variant.block_bits() / 8;
            hasher.absorb_bytes(&bytepad(&encode_string(&key), rate_bytes));
        } else if !func_name.is_empty() || !customization.is_empty() {
            hasher.absorb_prefix(&func_name, &customization);
        }
        if let Some(key) = hmac_key {
            hasher.install_hmac_key(&key)?;
        }

        log::debug!(
            "{} hasher: input {}, block {} bits, num_rounds {}, keyed {}",
            variant,
            input_format,
            variant.block_bits(),
            num_rounds,
            hasher.hmac.is_some()
        );
        Ok(hasher)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn input_format(&self) -> Format {
        self.input_format
    }

    /// Whether an HMAC key has been installed.
    pub fn is_keyed(&self) -> bool {
        self.hmac.is_some()
    }

    /// Feed more input, in the format declared at construction.
    pub fn update<'a>(&mut self, input: impl Into<Input<'a>>) -> Result<()> {
        let bytes = format::decode(input.into(), self.input_format, self.encoding)?;
        let before = self.processed_bits;
        self.absorb_bytes(&bytes);
        self.update_called = true;

        log::trace!(
            "{} update: {} bytes in, {} bits absorbed, {} bits pending",
            self.variant,
            bytes.len(),
            self.processed_bits - before,
            self.remainder.bit_len()
        );
        Ok(())
    }

    /// Install an HMAC key after construction.
    ///
    /// Only allowed once, and only before the first [`Hasher::update`].
    pub fn set_hmac_key(&mut self, key: &KeyInput) -> Result<()> {
        if self.hmac.is_some() {
            return Err(Error::InvalidState("HMAC key already set"));
        }
        if self.update_called {
            return Err(Error::InvalidState("Cannot set HMAC key after calling update"));
        }
        if !self.variant.capabilities().contains(Capabilities::HMAC) {
            return Err(Error::UnsupportedOption("hmacKey"));
        }
        if self.num_rounds != 1 {
            return Err(Error::UnsupportedOption("numRounds cannot be combined with hmacKey"));
        }
        let key = key.to_bytes()?;
        self.install_hmac_key(&key)
    }

    /// Digest of everything absorbed so far.
    ///
    /// Fails with [`Error::InvalidState`] once an HMAC key is installed; use
    /// [`Hasher::get_hmac`] instead.
    pub fn get_hash(&self, format: OutputFormat, options: &OutputOptions) -> Result<Output> {
        let digest = self.hash_bits(options.output_len)?;
        Ok(format::encode(&digest.to_bytes(), format, options))
    }

    /// HMAC of everything absorbed so far.
    pub fn get_hmac(&self, format: OutputFormat, options: &OutputOptions) -> Result<Output> {
        let mac = self.hmac_bits(options.output_len)?;
        Ok(format::encode(&mac.to_bytes(), format, options))
    }

    /// [`Hasher::get_hash`] as raw bytes. `output_len` is in bits.
    pub fn finalize_bytes(&self, output_len: Option<usize>) -> Result<Vec<u8>> {
        Ok(self.hash_bits(output_len)?.to_bytes())
    }

    /// [`Hasher::get_hmac`] as raw bytes.
    pub fn hmac_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.hmac_bits(None)?.to_bytes())
    }

    fn hash_bits(&self, output_len: Option<usize>) -> Result<PackedBits> {
        if self.hmac.is_some() {
            return Err(Error::InvalidState("Cannot call getHash after setting HMAC key"));
        }
        let output_bits = self.output_bits(output_len)?;

        let mut digest = self.finish(output_bits);
        for _ in 1..self.num_rounds {
            digest = backend::digest(self.variant, digest, output_bits);
        }
        Ok(digest)
    }

    fn hmac_bits(&self, output_len: Option<usize>) -> Result<PackedBits> {
        let key = self.hmac.as_ref().ok_or(Error::NoKeySet)?;
        let output_bits = self.output_bits(output_len)?;
        Ok(key.finish(self.finish(output_bits), output_bits))
    }

    /// Resolve the requested output length against the variant.
    fn output_bits(&self, requested: Option<usize>) -> Result<usize> {
        if self.variant.capabilities().contains(Capabilities::VARIABLE_OUTPUT) {
            return match requested {
                Some(len) if len > 0 && len % 8 == 0 && len <= MAX_OUTPUT_BITS => Ok(len),
                len => Err(Error::UnsupportedOutputLength(len.unwrap_or(0))),
            };
        }
        match (self.variant.output_bits(), requested) {
            (Some(fixed), None) => Ok(fixed),
            (Some(fixed), Some(len)) if len == fixed => Ok(fixed),
            (_, len) => Err(Error::UnsupportedOutputLength(len.unwrap_or(0))),
        }
    }

    /// Finalize a copy of the running state.
    fn finish(&self, output_bits: usize) -> PackedBits {
        let mut remainder = self.remainder.clone();
        if self.variant.capabilities().contains(Capabilities::KMAC_KEY) {
            remainder.extend_from_bytes(&right_encode(output_bits as u64));
        }

        log::trace!(
            "{} finalize: {} bits pending, {} bits out, num_rounds {}",
            self.variant,
            remainder.bit_len(),
            output_bits,
            self.num_rounds
        );
        self.state
            .clone()
            .finalize(remainder, self.processed_bits, output_bits)
    }

    fn absorb_bytes(&mut self, bytes: &[u8]) {
        let order = self.variant.word_order();
        let mut remainder = core::mem::replace(&mut self.remainder, PackedBits::new(order));
        remainder.append(&PackedBits::from_bytes(bytes, order));

        let (blocks, rest) = remainder.take_blocks(self.variant.block_bits());
        self.state.absorb(&blocks);
        self.processed_bits += blocks.len() as u64 * 32;
        self.remainder = rest;
    }

    /// Absorb `bytepad(encode_string(N) || encode_string(S), rate)`.
    fn absorb_prefix(&mut self, func_name: &[u8], customization: &[u8]) {
        let mut encoded = encode_string(func_name);
        encoded.extend_from_slice(&encode_string(customization));
        let prefix = bytepad(&encoded, self.variant.block_bits() / 8);

        self.state.use_cshake_padding();
        self.absorb_bytes(&prefix);
        log::debug!(
            "{} prefix absorbed: function name {} bytes, customization {} bytes",
            self.variant,
            func_name.len(),
            customization.len()
        );
    }

    fn install_hmac_key(&mut self, key: &[u8]) -> Result<()> {
        let hmac = HmacKey::derive(self.variant, key)?;
        self.state.absorb(hmac.inner_pad());
        self.processed_bits += self.variant.block_bits() as u64;
        self.hmac = Some(hmac);

        log::debug!(
            "{} HMAC key installed: {} bytes, reduced {}",
            self.variant,
            key.len(),
            key.len() > self.variant.block_bits() / 8
        );
        Ok(())
    }
}

impl core::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hasher")
            .field("variant", &self.variant)
            .field("input_format", &self.input_format)
            .field("num_rounds", &self.num_rounds)
            .field("processed_bits", &self.processed_bits)
            .field("pending_bits", &self.remainder.bit_len())
            .field("keyed", &self.hmac.is_some())
            .finish()
    }
}

fn decode_option(value: Option<&KeyInput>) -> Result<Option<Vec<u8>>> {
    value.map(KeyInput::to_bytes).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn hex_hash(hasher: &Hasher, output_len: Option<usize>) -> String {
        let mut options = OutputOptions::default();
        options.output_len = output_len;
        hasher
            .get_hash(OutputFormat::Hex, &options)
            .unwrap()
            .into_string()
            .unwrap()
    }

    #[test]
    fn test_update_after_get_hash() {
        let mut hasher = Hasher::new(Variant::Sha1, Format::Text, Options::default()).unwrap();
        hasher.update("a").unwrap();
        let first = hex_hash(&hasher, None);
        assert_eq!(first, hex_hash(&hasher, None));

        hasher.update("bc").unwrap();
        assert_eq!(hex_hash(&hasher, None), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_clone_forks_state() {
        let mut hasher = Hasher::new(Variant::Sha3_256, Format::Text, Options::default()).unwrap();
        hasher.update("ab").unwrap();
        let mut fork = hasher.clone();
        fork.update("c").unwrap();
        hasher.update("x").unwrap();

        assert_eq!(
            hex_hash(&fork, None),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
        assert_ne!(hex_hash(&hasher, None), hex_hash(&fork, None));
    }

    #[test]
    fn test_output_length_rules() {
        let hasher = Hasher::new(Variant::Sha256, Format::Hex, Options::default()).unwrap();
        assert!(hasher.finalize_bytes(Some(256)).is_ok());
        assert_eq!(hasher.finalize_bytes(Some(128)), Err(Error::UnsupportedOutputLength(128)));

        let shake = Hasher::new(Variant::Shake128, Format::Hex, Options::default()).unwrap();
        assert_eq!(shake.finalize_bytes(None), Err(Error::UnsupportedOutputLength(0)));
        assert_eq!(shake.finalize_bytes(Some(12)), Err(Error::UnsupportedOutputLength(12)));
        assert_eq!(shake.finalize_bytes(Some(0)), Err(Error::UnsupportedOutputLength(0)));
        assert_eq!(shake.finalize_bytes(Some(16)).map(|b| b.len()), Ok(2));
    }

    #[test]
    fn test_oversized_output_rejected() {
        let huge = usize::MAX & !7;
        let over = MAX_OUTPUT_BITS + 8;
        let kmac = Options::new().kmac_key(KeyInput::text("key"));
        for hasher in [
            Hasher::new(Variant::Shake128, Format::Hex, Options::default()).unwrap(),
            Hasher::new(Variant::CShake256, Format::Hex, Options::default()).unwrap(),
            Hasher::new(Variant::Kmac128, Format::Hex, kmac).unwrap(),
        ] {
            assert_eq!(hasher.finalize_bytes(Some(huge)), Err(Error::UnsupportedOutputLength(huge)));
            assert_eq!(hasher.finalize_bytes(Some(over)), Err(Error::UnsupportedOutputLength(over)));
        }

        let rounds = Options::new().num_rounds(3);
        let shake = Hasher::new(Variant::Shake256, Format::Hex, rounds).unwrap();
        let out = OutputOptions::new().shake_len(huge);
        assert_eq!(
            shake.get_hash(OutputFormat::Hex, &out).err(),
            Some(Error::UnsupportedOutputLength(huge))
        );
    }

    #[test]
    fn test_hmac_key_state_rules() {
        let mut hasher = Hasher::new(Variant::Sha256, Format::Text, Options::default()).unwrap();
        assert_eq!(hasher.hmac_bytes(), Err(Error::NoKeySet));

        hasher.set_hmac_key(&KeyInput::text("key")).unwrap();
        assert!(hasher.is_keyed());
        assert!(matches!(
            hasher.set_hmac_key(&KeyInput::text("key")),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(hasher.finalize_bytes(None), Err(Error::InvalidState(_))));

        let mut late = Hasher::new(Variant::Sha256, Format::Text, Options::default()).unwrap();
        late.update("data").unwrap();
        assert!(matches!(
            late.set_hmac_key(&KeyInput::text("key")),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_setter_matches_constructor_key() {
        let key = KeyInput::hex("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
        let mut via_option =
            Hasher::new(Variant::Sha256, Format::Text, Options::new().hmac_key(key.clone())).unwrap();
        let mut via_setter = Hasher::new(Variant::Sha256, Format::Text, Options::default()).unwrap();
        via_setter.set_hmac_key(&key).unwrap();

        via_option.update("Sample message for keylen<blocklen").unwrap();
        via_setter.update("Sample message for keylen<blocklen").unwrap();
        assert_eq!(via_option.hmac_bytes(), via_setter.hmac_bytes());
        assert_eq!(
            hex::encode(via_setter.hmac_bytes().unwrap()),
            "a28cf43130ee696a98f14a37678b56bcfcbdd9e5cf69717fecf5480f0ebdf790"
        );
    }

    #[test]
    fn test_failed_update_leaves_state() {
        let mut hasher = Hasher::new(Variant::Sha256, Format::Hex, Options::default()).unwrap();
        hasher.update("6162").unwrap();
        assert!(hasher.update("6").is_err());
        assert!(hasher.update(&b"63"[..]).is_err());
        hasher.update("63").unwrap();
        assert_eq!(
            hex_hash(&hasher, None),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_num_rounds() {
        let options = Options::new().num_rounds(5);
        let mut hasher = Hasher::new(Variant::Sha256, Format::Text, options).unwrap();
        hasher.update("abc").unwrap();
        assert_eq!(
            hex_hash(&hasher, None),
            "184f6d6e82554c051b33f15e7ffffecb0cc0f461a29096c41c214e168e34c21d"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let options = Options::new().hmac_key(KeyInput::text("secret"));
        let hasher = Hasher::new(Variant::Sha1, Format::Text, options).unwrap();
        let debug = alloc::format!("{:?}", hasher);
        assert!(debug.contains("keyed: true"));
        assert!(!debug.contains("secret"));
    }
}
