//! Error type shared by every fallible operation in the crate.

use alloc::string::String;

use crate::format::Format;

/// Hashing errors.
///
/// Every error is raised before the engine state is touched, so a failed call
/// leaves the instance exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Algorithm name not recognized
    UnsupportedVariant(String),
    /// Option not valid for the chosen variant or input format
    UnsupportedOption(&'static str),
    /// Option the variant cannot work without
    MissingRequiredOption(&'static str),
    /// Operation not allowed in the current engine state
    InvalidState(&'static str),
    /// Output length not usable with the variant (bits)
    UnsupportedOutputLength(usize),
    /// HMAC requested without a key
    NoKeySet,
    /// Input supplied in a host representation that does not match the format
    FormatMismatch {
        /// Format declared at construction
        expected: Format,
    },
    /// Malformed HEX, B64 or BYTES text
    InvalidInput(&'static str),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnsupportedVariant(name) => write!(f, "Unsupported hash variant: {}", name),
            Error::UnsupportedOption(what) => write!(f, "Unsupported option: {}", what),
            Error::MissingRequiredOption(what) => write!(f, "Missing required option: {}", what),
            Error::InvalidState(why) => write!(f, "Invalid state: {}", why),
            Error::UnsupportedOutputLength(bits) => {
                write!(f, "Unsupported output length: {} bits", bits)
            }
            Error::NoKeySet => write!(f, "Cannot compute HMAC without first setting a key"),
            Error::FormatMismatch { expected } => {
                write!(f, "Input does not match the declared {} format", expected)
            }
            Error::InvalidInput(why) => write!(f, "Invalid input: {}", why),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::UnsupportedVariant("MD5".into()).to_string(),
            "Unsupported hash variant: MD5"
        );
        assert_eq!(
            Error::UnsupportedOutputLength(12).to_string(),
            "Unsupported output length: 12 bits"
        );
        assert_eq!(
            Error::FormatMismatch { expected: Format::Hex }.to_string(),
            "Input does not match the declared HEX format"
        );
    }
}
