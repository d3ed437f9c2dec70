//! Construction Options
//!
//! [`Options`] collects everything a [`Hasher`](crate::Hasher) can be
//! configured with. Each option is checked against the variant's
//! [`Capabilities`](crate::Capabilities) when the hasher is built.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::Result;
use crate::format::{self, Encoding, Format, Input};

/// Owned key or string value.
#[derive(Clone, PartialEq, Eq)]
enum KeyValue {
    Str(String),
    Bytes(Vec<u8>),
}

/// A key, customization string or function name with its declared format.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyInput {
    value: KeyValue,
    format: Format,
    encoding: Encoding,
}

impl KeyInput {
    /// Value in any format. `encoding` only applies to TEXT.
    pub fn new<'a>(value: impl Into<Input<'a>>, format: Format, encoding: Encoding) -> Self {
        let value = match value.into() {
            Input::Str(s) => KeyValue::Str(String::from(s)),
            Input::Bytes(b) => KeyValue::Bytes(b.to_vec()),
        };
        Self {
            value,
            format,
            encoding,
        }
    }

    /// UTF-8 text.
    pub fn text(s: &str) -> Self {
        Self::new(s, Format::Text, Encoding::Utf8)
    }

    pub fn text_with(s: &str, encoding: Encoding) -> Self {
        Self::new(s, Format::Text, encoding)
    }

    pub fn hex(s: &str) -> Self {
        Self::new(s, Format::Hex, Encoding::Utf8)
    }

    pub fn b64(s: &str) -> Self {
        Self::new(s, Format::B64, Encoding::Utf8)
    }

    /// BYTES string: one byte per char.
    pub fn bytes(s: &str) -> Self {
        Self::new(s, Format::Bytes, Encoding::Utf8)
    }

    /// Raw byte buffer.
    pub fn raw(b: &[u8]) -> Self {
        Self::new(b, Format::Uint8Array, Encoding::Utf8)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Decode to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let input = match &self.value {
            KeyValue::Str(s) => Input::Str(s),
            KeyValue::Bytes(b) => Input::Bytes(b),
        };
        format::decode(input, self.format, self.encoding)
    }
}

impl core::fmt::Debug for KeyInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyInput")
            .field("value", &"<redacted>")
            .field("format", &self.format)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Hasher construction options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Character encoding for TEXT input
    pub encoding: Encoding,
    /// Number of times the digest is iterated (default 1)
    pub num_rounds: Option<u32>,
    /// HMAC key
    pub hmac_key: Option<KeyInput>,
    /// cSHAKE/KMAC customization string
    pub customization: Option<KeyInput>,
    /// cSHAKE function name
    pub func_name: Option<KeyInput>,
    /// KMAC key
    pub kmac_key: Option<KeyInput>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn num_rounds(mut self, rounds: u32) -> Self {
        self.num_rounds = Some(rounds);
        self
    }

    pub fn hmac_key(mut self, key: KeyInput) -> Self {
        self.hmac_key = Some(key);
        self
    }

    pub fn customization(mut self, customization: KeyInput) -> Self {
        self.customization = Some(customization);
        self
    }

    pub fn func_name(mut self, func_name: KeyInput) -> Self {
        self.func_name = Some(func_name);
        self
    }

    pub fn kmac_key(mut self, key: KeyInput) -> Self {
        self.kmac_key = Some(key);
        self
    }
}
