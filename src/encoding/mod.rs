// Digest output encodings
// Renders raw digest bytes as text and parses them back

mod bubble_babble;

use base64::{engine::general_purpose::STANDARD as base64_engine, Engine};

use crate::hash::error::HashError;

/// Supported digest text encodings
///
/// All four are pure functions of the byte string: encoding is deterministic
/// and decoding an encoded digest returns the original bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    /// Lowercase hexadecimal (the default)
    #[default]
    Hex,
    /// Uppercase hexadecimal
    HexUpper,
    /// RFC 4648 Base64 with padding
    Base64,
    /// Bubble Babble
    BubbleBabble,
}

impl OutputEncoding {
    /// Resolve an encoding identifier ("hex", "hexcaps", "base64", "bubbab")
    pub fn from_token(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "hex" => Some(OutputEncoding::Hex),
            "hexcaps" | "hexupper" => Some(OutputEncoding::HexUpper),
            "base64" => Some(OutputEncoding::Base64),
            "bubbab" | "bubblebabble" => Some(OutputEncoding::BubbleBabble),
            _ => None,
        }
    }

    /// Lowercase identifier used on the command line
    pub fn token(&self) -> &'static str {
        match self {
            OutputEncoding::Hex => "hex",
            OutputEncoding::HexUpper => "hexcaps",
            OutputEncoding::Base64 => "base64",
            OutputEncoding::BubbleBabble => "bubbab",
        }
    }

    /// Human-readable encoding name
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputEncoding::Hex => "hex",
            OutputEncoding::HexUpper => "uppercase hex",
            OutputEncoding::Base64 => "Base64",
            OutputEncoding::BubbleBabble => "Bubble Babble",
        }
    }

    /// Encode raw digest bytes as text
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            OutputEncoding::Hex => hex::encode(bytes),
            OutputEncoding::HexUpper => hex::encode_upper(bytes),
            OutputEncoding::Base64 => base64_engine.encode(bytes),
            OutputEncoding::BubbleBabble => bubble_babble::encode(bytes),
        }
    }

    /// Decode digest text back to raw bytes
    ///
    /// Hex decoding accepts either letter case. Input that is not valid for
    /// the claimed encoding is a MalformedEncodedInput error.
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, HashError> {
        match self {
            OutputEncoding::Hex | OutputEncoding::HexUpper => {
                hex::decode(text).map_err(|e| HashError::MalformedEncodedInput {
                    encoding: self.display_name().to_string(),
                    reason: e.to_string(),
                })
            }
            OutputEncoding::Base64 => {
                base64_engine
                    .decode(text)
                    .map_err(|e| HashError::MalformedEncodedInput {
                        encoding: self.display_name().to_string(),
                        reason: e.to_string(),
                    })
            }
            OutputEncoding::BubbleBabble => bubble_babble::decode(text),
        }
    }
}

/// Re-encode digest text from one encoding to another
pub fn reencode(
    from: OutputEncoding,
    text: &str,
    to: OutputEncoding,
) -> Result<String, HashError> {
    Ok(to.encode(&from.decode(text)?))
}

// Tests live in tests/encoding_tests.rs
