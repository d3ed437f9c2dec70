//! External Representations
//!
//! Conversion between the caller-facing formats (TEXT, HEX, B64, BYTES and
//! raw buffers) and the byte sequences the engine packs into words.

use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::error::{Error, Result};

const B64_TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Input format declared at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Unicode text, encoded per [`Encoding`]
    Text,
    /// Hexadecimal string
    Hex,
    /// Base64 string
    B64,
    /// String of raw byte values (U+0000..U+00FF)
    Bytes,
    /// Byte buffer
    ArrayBuffer,
    /// Byte buffer
    Uint8Array,
}

impl Format {
    pub const fn name(self) -> &'static str {
        match self {
            Format::Text => "TEXT",
            Format::Hex => "HEX",
            Format::B64 => "B64",
            Format::Bytes => "BYTES",
            Format::ArrayBuffer => "ARRAYBUFFER",
            Format::Uint8Array => "UINT8ARRAY",
        }
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "TEXT" => Ok(Format::Text),
            "HEX" => Ok(Format::Hex),
            "B64" => Ok(Format::B64),
            "BYTES" => Ok(Format::Bytes),
            "ARRAYBUFFER" => Ok(Format::ArrayBuffer),
            "UINT8ARRAY" => Ok(Format::Uint8Array),
            _ => Err(Error::UnsupportedOption(
                "format must be TEXT, HEX, B64, BYTES, ARRAYBUFFER, or UINT8ARRAY",
            )),
        }
    }
}

/// Output format for digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Hex,
    B64,
    Bytes,
    ArrayBuffer,
    Uint8Array,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HEX" => Ok(OutputFormat::Hex),
            "B64" => Ok(OutputFormat::B64),
            "BYTES" => Ok(OutputFormat::Bytes),
            "ARRAYBUFFER" => Ok(OutputFormat::ArrayBuffer),
            "UINT8ARRAY" => Ok(OutputFormat::Uint8Array),
            _ => Err(Error::UnsupportedOption(
                "format must be HEX, B64, BYTES, ARRAYBUFFER, or UINT8ARRAY",
            )),
        }
    }
}

/// Character encoding for TEXT input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Be,
    Utf16Le,
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UTF8" => Ok(Encoding::Utf8),
            "UTF16BE" => Ok(Encoding::Utf16Be),
            "UTF16LE" => Ok(Encoding::Utf16Le),
            _ => Err(Error::UnsupportedOption("encoding must be UTF8, UTF16BE, or UTF16LE")),
        }
    }
}

/// A borrowed input value in its host representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// TEXT, HEX, B64 and BYTES values
    Str(&'a str),
    /// ARRAYBUFFER and UINT8ARRAY values
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(value: &'a str) -> Self {
        Input::Str(value)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(value: &'a String) -> Self {
        Input::Str(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(value: &'a [u8]) -> Self {
        Input::Bytes(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Input::Bytes(value.as_slice())
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Input::Bytes(value.as_slice())
    }
}

/// A formatted digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// HEX, B64 and BYTES results
    Text(String),
    /// ARRAYBUFFER and UINT8ARRAY results
    Bytes(Vec<u8>),
}

impl Output {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Output::Text(s) => Some(s),
            Output::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Output::Text(_) => None,
            Output::Bytes(b) => Some(b),
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Output::Text(s) => Some(s),
            Output::Bytes(_) => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Output::Text(_) => None,
            Output::Bytes(b) => Some(b),
        }
    }
}

/// Digest formatting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Upper-case HEX digits
    pub output_upper: bool,
    /// Padding emitted by B64 output
    pub b64_pad: String,
    /// Requested output length in bits (required for SHAKE, cSHAKE and KMAC)
    pub output_len: Option<usize>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_upper: false,
            b64_pad: String::from("="),
            output_len: None,
        }
    }
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_upper(mut self, upper: bool) -> Self {
        self.output_upper = upper;
        self
    }

    pub fn b64_pad(mut self, pad: &str) -> Self {
        self.b64_pad = String::from(pad);
        self
    }

    pub fn output_len(mut self, bits: usize) -> Self {
        self.output_len = Some(bits);
        self
    }

    /// Alias of [`OutputOptions::output_len`].
    pub fn shake_len(self, bits: usize) -> Self {
        self.output_len(bits)
    }
}

/// Convert an input value to bytes.
pub fn decode(input: Input<'_>, format: Format, encoding: Encoding) -> Result<Vec<u8>> {
    match (format, input) {
        (Format::Text, Input::Str(s)) => Ok(encode_text(s, encoding)),
        (Format::Hex, Input::Str(s)) => {
            hex::decode(s).map_err(|err| match err {
                hex::FromHexError::OddLength => {
                    Error::InvalidInput("String of HEX type must be in byte increments")
                }
                _ => Error::InvalidInput("String of HEX type contains invalid characters"),
            })
        }
        (Format::B64, Input::Str(s)) => b64_decode(s),
        (Format::Bytes, Input::Str(s)) => s
            .chars()
            .map(|c| {
                u8::try_from(u32::from(c))
                    .map_err(|_| Error::InvalidInput("String of BYTES type contains a non-byte character"))
            })
            .collect(),
        (Format::ArrayBuffer | Format::Uint8Array, Input::Bytes(b)) => Ok(b.to_vec()),
        (expected, _) => Err(Error::FormatMismatch { expected }),
    }
}

/// Format digest bytes.
pub fn encode(bytes: &[u8], format: OutputFormat, options: &OutputOptions) -> Output {
    match format {
        OutputFormat::Hex if options.output_upper => Output::Text(hex::encode_upper(bytes)),
        OutputFormat::Hex => Output::Text(hex::encode(bytes)),
        OutputFormat::B64 => Output::Text(b64_encode(bytes, &options.b64_pad)),
        OutputFormat::Bytes => Output::Text(bytes.iter().map(|&b| char::from(b)).collect()),
        OutputFormat::ArrayBuffer | OutputFormat::Uint8Array => Output::Bytes(bytes.to_vec()),
    }
}

fn encode_text(s: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => s.as_bytes().to_vec(),
        Encoding::Utf16Be => s.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        Encoding::Utf16Le => s.encode_utf16().flat_map(u16::to_le_bytes).collect(),
    }
}

fn b64_encode(bytes: &[u8], pad: &str) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);

    for chunk in bytes.chunks(3) {
        let triplet = (u32::from(chunk[0]) << 16)
            | (u32::from(chunk.get(1).copied().unwrap_or(0)) << 8)
            | u32::from(chunk.get(2).copied().unwrap_or(0));

        for j in 0..4 {
            if j <= chunk.len() {
                out.push(char::from(B64_TABLE[((triplet >> (6 * (3 - j))) & 0x3f) as usize]));
            } else {
                out.push_str(pad);
            }
        }
    }
    out
}

fn b64_value(c: u8) -> Option<u32> {
    B64_TABLE.iter().position(|&t| t == c).map(|p| p as u32)
}

fn b64_decode(s: &str) -> Result<Vec<u8>> {
    let raw = s.as_bytes();
    if raw.iter().any(|&c| c != b'=' && b64_value(c).is_none()) {
        return Err(Error::InvalidInput("Invalid character in base-64 string"));
    }

    let stripped: Vec<u8> = raw.iter().copied().filter(|&c| c != b'=').collect();
    if let Some(first_pad) = raw.iter().position(|&c| c == b'=') {
        if first_pad < stripped.len() {
            return Err(Error::InvalidInput("Invalid '=' found in base-64 string"));
        }
    }

    let mut out = Vec::with_capacity(stripped.len() * 3 / 4);
    for part in stripped.chunks(4) {
        let mut group = 0u32;
        for (j, &c) in part.iter().enumerate() {
            // Characters were validated above.
            group |= b64_value(c).unwrap_or(0) << (18 - 6 * j);
        }
        for j in 0..part.len().saturating_sub(1) {
            out.push((group >> (16 - 8 * j)) as u8);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_text_encodings() {
        assert_eq!(decode(Input::Str("aé"), Format::Text, Encoding::Utf8).unwrap(), vec![0x61, 0xc3, 0xa9]);
        assert_eq!(
            decode(Input::Str("aé"), Format::Text, Encoding::Utf16Be).unwrap(),
            vec![0x00, 0x61, 0x00, 0xe9]
        );
        assert_eq!(
            decode(Input::Str("aé"), Format::Text, Encoding::Utf16Le).unwrap(),
            vec![0x61, 0x00, 0xe9, 0x00]
        );
    }

    #[test]
    fn test_hex_decode() {
        assert_eq!(decode(Input::Str("00Ff10"), Format::Hex, Encoding::Utf8).unwrap(), vec![0x00, 0xff, 0x10]);
        assert_eq!(
            decode(Input::Str("abc"), Format::Hex, Encoding::Utf8),
            Err(Error::InvalidInput("String of HEX type must be in byte increments"))
        );
        assert_eq!(
            decode(Input::Str("zz"), Format::Hex, Encoding::Utf8),
            Err(Error::InvalidInput("String of HEX type contains invalid characters"))
        );
    }

    #[test]
    fn test_b64_round_trip() {
        let opts = OutputOptions::default();
        let cases: [&[u8]; 7] = [b"", b"f", b"fo", b"foo", b"foob", b"fooba", b"foobar"];
        for bytes in cases {
            let text = encode(bytes, OutputFormat::B64, &opts).into_string().unwrap();
            assert_eq!(decode(Input::Str(&text), Format::B64, Encoding::Utf8).unwrap(), bytes);
        }
        assert_eq!(encode(b"fo", OutputFormat::B64, &opts).as_str(), Some("Zm8="));
        assert_eq!(
            encode(b"f", OutputFormat::B64, &OutputOptions::new().b64_pad("")).as_str(),
            Some("Zg")
        );
    }

    #[test]
    fn test_b64_rejects_bad_input() {
        assert_eq!(
            decode(Input::Str("Zm9v!"), Format::B64, Encoding::Utf8),
            Err(Error::InvalidInput("Invalid character in base-64 string"))
        );
        assert_eq!(
            decode(Input::Str("Zg=v"), Format::B64, Encoding::Utf8),
            Err(Error::InvalidInput("Invalid '=' found in base-64 string"))
        );
    }

    #[test]
    fn test_bytes_format() {
        assert_eq!(decode(Input::Str("a\u{ff}"), Format::Bytes, Encoding::Utf8).unwrap(), vec![0x61, 0xff]);
        assert!(decode(Input::Str("\u{100}"), Format::Bytes, Encoding::Utf8).is_err());
        assert_eq!(
            encode(&[0x61, 0xff], OutputFormat::Bytes, &OutputOptions::default()).as_str(),
            Some("a\u{ff}")
        );
    }

    #[test]
    fn test_host_representation_mismatch() {
        assert_eq!(
            decode(Input::Bytes(b"abc"), Format::Hex, Encoding::Utf8),
            Err(Error::FormatMismatch { expected: Format::Hex })
        );
        assert_eq!(
            decode(Input::Str("abc"), Format::Uint8Array, Encoding::Utf8),
            Err(Error::FormatMismatch { expected: Format::Uint8Array })
        );
    }

    #[test]
    fn test_hex_output_case() {
        let upper = OutputOptions::new().output_upper(true);
        assert_eq!(encode(&[0xab, 0x01], OutputFormat::Hex, &upper).as_str(), Some("AB01"));
        assert_eq!(encode(&[0xab, 0x01], OutputFormat::Hex, &OutputOptions::new()).as_str(), Some("ab01"));
    }
}
