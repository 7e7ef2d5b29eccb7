// Text input encodings
// Converts caller strings to the bytes that get hashed; no byte-order marks

use std::fmt;

/// Character encoding applied to text input before hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8 (the default)
    #[default]
    Utf8,
    /// UTF-16, little-endian, without a byte-order mark
    Utf16Le,
    /// UTF-16, big-endian, without a byte-order mark
    Utf16Be,
}

impl TextEncoding {
    /// Resolve a text encoding identifier ("utf8", "utf16le", "utf16be")
    pub fn from_token(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "utf8" | "utf-8" => Some(TextEncoding::Utf8),
            "utf16le" | "utf-16le" => Some(TextEncoding::Utf16Le),
            "utf16be" | "utf-16be" => Some(TextEncoding::Utf16Be),
            _ => None,
        }
    }

    /// Lowercase identifier used on the command line
    pub fn token(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Utf16Le => "utf16le",
            TextEncoding::Utf16Be => "utf16be",
        }
    }

    /// Encode a string into bytes
    pub fn encode_str(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect(),
            TextEncoding::Utf16Be => text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("UTF-8"),
            TextEncoding::Utf16Le => f.write_str("UTF-16LE"),
            TextEncoding::Utf16Be => f.write_str("UTF-16BE"),
        }
    }
}
