//! Bijective numeral encoding for short codes.
//!
//! Short codes are the link's numeric id written in a bijective numeral
//! system over [`ALPHABET`]. There is no zero digit, so every positive
//! integer has exactly one representation and no code has a "leading zero"
//! twin.
//!
//! ```ignore
//! assert_eq!(encode(1), "1");
//! assert_eq!(encode(35), "z");
//! assert_eq!(encode(36), "11");
//! assert_eq!(decode("11").unwrap(), 36);
//! ```

/// Symbols used for short codes, least significant value first.
pub const ALPHABET: &[u8] = b"123456789abcdefghijklmnopqrstuvwxyz";

const BASE: i64 = ALPHABET.len() as i64;

/// Errors returned when a string cannot be turned back into an id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Invalid character in short code: {character:?}")]
    InvalidEncoding { character: char },

    #[error("Short code is too long to represent an id")]
    Overflow,
}

/// Encodes a positive id as a short code.
///
/// Values `<= 0` have no representation and produce an empty string.
pub fn encode(mut n: i64) -> String {
    let mut digits = Vec::new();

    while n > 0 {
        let remainder = (n - 1) % BASE;
        digits.push(ALPHABET[remainder as usize]);
        n = (n - 1) / BASE;
    }

    digits.reverse();
    // ALPHABET is ASCII
    String::from_utf8(digits).unwrap_or_default()
}

/// Decodes a short code back to the id it was produced from.
///
/// # Errors
///
/// Returns [`CodecError::InvalidEncoding`] naming the first character that is
/// not part of [`ALPHABET`], or [`CodecError::Overflow`] if the value does not
/// fit in an `i64`.
pub fn decode(code: &str) -> Result<i64, CodecError> {
    code.chars().try_fold(0i64, |num, character| {
        let position = position_of(character).ok_or(CodecError::InvalidEncoding { character })?;

        num.checked_mul(BASE)
            .and_then(|n| n.checked_add(position as i64 + 1))
            .ok_or(CodecError::Overflow)
    })
}

/// Returns true if `code` is non-empty and made only of [`ALPHABET`] symbols.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| position_of(c).is_some())
}

fn position_of(character: char) -> Option<usize> {
    if !character.is_ascii() {
        return None;
    }
    ALPHABET.iter().position(|&b| b == character as u8)
}
