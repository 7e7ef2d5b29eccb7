// Bubble Babble digest encoding
// Pronounceable rendering with an embedded mod-36 checksum

use crate::hash::error::HashError;

const VOWELS: &[u8; 6] = b"aeiouy";
const CONSONANTS: &[u8; 17] = b"bcdfghklmnprstvzx";

// CONSONANTS[16]; marks the checksum-only tuple and never appears in data
const SENTINEL: u32 = 16;

/// Encode bytes as a Bubble Babble string
///
/// The output is wrapped in 'x' delimiters and grouped into hyphen-separated
/// five-letter tuples, two input bytes per tuple. A running checksum is
/// folded into the vowel positions; an empty input encodes as "xexax".
pub fn encode(bytes: &[u8]) -> String {
    let mut word = String::with_capacity(bytes.len() / 2 * 6 + 5);
    word.push('x');

    let mut checksum: u32 = 1;
    let rounds = bytes.len() / 2 + 1;

    for i in 0..rounds {
        if i + 1 < rounds || bytes.len() % 2 != 0 {
            let b1 = u32::from(bytes[i * 2]);
            let v1 = ((((b1 >> 6) & 3) + checksum) % 6) as usize;
            let c1 = ((b1 >> 2) & 15) as usize;
            let v2 = (((b1 & 3) + checksum / 6) % 6) as usize;
            word.push(VOWELS[v1] as char);
            word.push(CONSONANTS[c1] as char);
            word.push(VOWELS[v2] as char);

            if i + 1 < rounds {
                let b2 = u32::from(bytes[i * 2 + 1]);
                let c2 = ((b2 >> 4) & 15) as usize;
                let c3 = (b2 & 15) as usize;
                word.push(CONSONANTS[c2] as char);
                word.push('-');
                word.push(CONSONANTS[c3] as char);
                checksum = (checksum * 5 + b1 * 7 + b2) % 36;
            }
        } else {
            // Even-length input ends with a checksum-only tuple
            word.push(VOWELS[(checksum % 6) as usize] as char);
            word.push('x');
            word.push(VOWELS[(checksum / 6) as usize] as char);
        }
    }

    word.push('x');
    word
}

/// Decode a Bubble Babble string back to bytes
///
/// Verifies the delimiters, the tuple structure, the character alphabet and
/// the embedded checksum; any violation is a MalformedEncodedInput error.
pub fn decode(text: &str) -> Result<Vec<u8>, HashError> {
    let raw = text.as_bytes();

    if raw.len() < 5 || raw.first() != Some(&b'x') || raw.last() != Some(&b'x') {
        return Err(malformed("must be delimited by 'x' at both ends"));
    }

    let inner = &raw[1..raw.len() - 1];
    if inner.len() % 6 != 3 {
        return Err(malformed("truncated or padded tuple stream"));
    }

    let mut bytes = Vec::with_capacity(inner.len() / 3);
    let mut checksum: u32 = 1;
    let full_tuples = inner.len() / 6;

    for i in 0..full_tuples {
        let tuple = &inner[i * 6..i * 6 + 6];

        if tuple[4] != b'-' {
            return Err(malformed(format!("expected '-' in tuple {}", i + 1)));
        }

        let b1 = data_byte(tuple[0], tuple[1], tuple[2], checksum, i + 1)?;

        let c2 = consonant(tuple[3], i + 1)?;
        let c3 = consonant(tuple[5], i + 1)?;
        if c2 == SENTINEL || c3 == SENTINEL {
            return Err(malformed(format!("unexpected 'x' in tuple {}", i + 1)));
        }
        let b2 = (c2 << 4) | c3;

        checksum = (checksum * 5 + u32::from(b1) * 7 + b2) % 36;
        bytes.push(b1);
        bytes.push(b2 as u8);
    }

    // Final tuple: either the checksum terminator or a trailing odd byte
    let tail = &inner[full_tuples * 6..];
    if tail[1] == b'x' {
        let v1 = vowel(tail[0], full_tuples + 1)?;
        let v2 = vowel(tail[2], full_tuples + 1)?;
        if v1 != checksum % 6 || v2 != checksum / 6 {
            return Err(malformed("checksum mismatch"));
        }
    } else {
        bytes.push(data_byte(tail[0], tail[1], tail[2], checksum, full_tuples + 1)?);
    }

    Ok(bytes)
}

/// Rebuild one data byte from a vowel-consonant-vowel triple
fn data_byte(v1: u8, c1: u8, v2: u8, checksum: u32, tuple: usize) -> Result<u8, HashError> {
    let high = vowel(v1, tuple)?;
    let mid = consonant(c1, tuple)?;
    let low = vowel(v2, tuple)?;

    if mid == SENTINEL {
        return Err(malformed(format!("unexpected 'x' in tuple {}", tuple)));
    }

    // Undo the checksum offset; the two-bit fields must land in range
    let high2 = (high + 6 - checksum % 6) % 6;
    let low2 = (low + 6 - checksum / 6) % 6;
    if high2 > 3 || low2 > 3 {
        return Err(malformed(format!("tuple {} does not match its checksum", tuple)));
    }

    Ok(((high2 << 6) | (mid << 2) | low2) as u8)
}

fn vowel(ch: u8, tuple: usize) -> Result<u32, HashError> {
    VOWELS
        .iter()
        .position(|&v| v == ch)
        .map(|index| index as u32)
        .ok_or_else(|| {
            malformed(format!("expected a vowel in tuple {}, found '{}'", tuple, ch as char))
        })
}

fn consonant(ch: u8, tuple: usize) -> Result<u32, HashError> {
    CONSONANTS
        .iter()
        .position(|&c| c == ch)
        .map(|index| index as u32)
        .ok_or_else(|| {
            malformed(format!("expected a consonant in tuple {}, found '{}'", tuple, ch as char))
        })
}

fn malformed(reason: impl Into<String>) -> HashError {
    HashError::MalformedEncodedInput {
        encoding: "Bubble Babble".to_string(),
        reason: reason.into(),
    }
}
