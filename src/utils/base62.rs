//! Base-62 short code generation and decoding.
//!
//! Codes are rendered from a time-biased identifier: unix milliseconds scaled
//! by 10 000 plus a random component in `[0, 10 000)` to spread ids generated
//! within the same millisecond. The rendered string is padded to 6 characters
//! and truncated to 8, so distinct identifiers can still collide; the registry
//! resolves collisions through its bounded retry loop.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Fixed alphabet: digits, then lowercase, then uppercase.
const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const MIN_CODE_LEN: usize = 6;
const MAX_CODE_LEN: usize = 8;

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{6,8}$").unwrap());

/// Errors produced when decoding a base-62 string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Base62Error {
    #[error("invalid character '{0}' in base62 string")]
    InvalidCharacter(char),
}

/// Produces a time-biased identifier for code generation.
fn unique_id() -> u128 {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u128;
    let counter = rand::rng().random_range(0..10_000u128);
    millis * 10_000 + counter
}

/// Encodes an identifier as a 6-8 character base-62 string.
///
/// Left-pads with the zero symbol to 6 characters; values that render wider
/// than 8 characters keep only their 8 high-order digits.
pub fn encode(mut n: u128) -> String {
    let mut digits = Vec::new();

    if n == 0 {
        digits.push(ALPHABET[0]);
    }

    while n > 0 {
        digits.push(ALPHABET[(n % 62) as usize]);
        n /= 62;
    }

    digits.reverse();

    while digits.len() < MIN_CODE_LEN {
        digits.insert(0, ALPHABET[0]);
    }

    digits.truncate(MAX_CODE_LEN);

    String::from_utf8(digits).expect("alphabet is ASCII")
}

/// Decodes a base-62 string back to its integer value.
///
/// # Errors
///
/// Returns [`Base62Error::InvalidCharacter`] for any character outside the
/// alphabet.
pub fn decode(s: &str) -> Result<u128, Base62Error> {
    let mut result: u128 = 0;

    for c in s.chars() {
        let value = ALPHABET
            .iter()
            .position(|&a| a as char == c)
            .ok_or(Base62Error::InvalidCharacter(c))?;
        result = result * 62 + value as u128;
    }

    Ok(result)
}

/// Generates a fresh short code candidate.
///
/// Outputs are roughly time-ordered and NOT guaranteed collision-free; the
/// registry treats a unique-constraint violation as the collision signal and
/// regenerates.
pub fn generate() -> String {
    encode(unique_id())
}

/// Validates a user-supplied custom code: 6-8 alphanumeric characters,
/// nothing else. Custom codes need not decode to anything meaningful.
pub fn is_valid_custom_code(code: &str) -> bool {
    CUSTOM_CODE_REGEX.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode(0), "000000");
    }

    #[test]
    fn test_encode_pads_to_six() {
        // 61 renders as a single 'Z' before padding.
        assert_eq!(encode(61), "00000Z");
    }

    #[test]
    fn test_encode_truncates_to_eight() {
        let code = encode(u128::MAX);
        assert_eq!(code.len(), 8);
    }

    #[test]
    fn test_encode_decode_roundtrip_small_values() {
        for n in [0u128, 1, 61, 62, 3843, 3844, 916_132_831] {
            let encoded = encode(n);
            // Small values are not truncated, only padded; padding with the
            // zero symbol does not change the decoded value.
            assert_eq!(decode(&encoded).unwrap(), n);
        }
    }

    #[test]
    fn test_decode_rejects_invalid_character() {
        assert_eq!(decode("abc-12"), Err(Base62Error::InvalidCharacter('-')));
        assert_eq!(decode("héllo1"), Err(Base62Error::InvalidCharacter('é')));
    }

    #[test]
    fn test_generate_shape() {
        for _ in 0..100 {
            let code = generate();
            assert!(
                code.len() >= 6 && code.len() <= 8,
                "unexpected length: {code}"
            );
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generated_codes_decode() {
        for _ in 0..100 {
            let code = generate();
            assert!(decode(&code).is_ok(), "generated code failed to decode");
        }
    }

    #[test]
    fn test_generate_mostly_unique() {
        // Truncation makes collisions possible in principle; within a single
        // run over a short interval they should stay rare enough that the
        // registry's 5-attempt retry absorbs them.
        let mut codes = HashSet::new();
        for _ in 0..1000 {
            codes.insert(generate());
        }
        assert!(codes.len() > 900, "collision rate too high: {}", codes.len());
    }

    #[test]
    fn test_custom_code_valid_shapes() {
        for code in ["short1", "abc123", "ABCdef12", "00000000", "zZ9wX3"] {
            assert!(is_valid_custom_code(code), "expected valid: {code}");
        }
    }

    #[test]
    fn test_custom_code_invalid_shapes() {
        for code in [
            "short", "toolong123", "has-dash", "has_under", "with space", "", "héllo1",
        ] {
            assert!(!is_valid_custom_code(code), "expected invalid: {code}");
        }
    }
}
