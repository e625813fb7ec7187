use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

/// The canonical base58 alphabet: digits and ASCII letters minus the visually
/// ambiguous 0, O, I and l. Existing addresses depend on this exact table.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Base58Error {
    #[error("Invalid base58 character: '{0}'")]
    InvalidCharacter(char),
}

/// Encodes bytes as base58 text.
///
/// The byte sequence is read as one big-endian integer and converted to
/// radix 58. Each leading zero byte maps to one leading '1' so the zero run
/// survives the integer conversion. Empty input encodes to empty text.
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|byte| **byte == 0).count();
    let value = BigUint::from_bytes_be(bytes);

    let mut text = String::with_capacity(zeros + bytes.len() * 2);
    for _ in 0..zeros {
        text.push(ALPHABET[0] as char);
    }
    if !value.is_zero() {
        for digit in value.to_radix_be(58) {
            text.push(ALPHABET[digit as usize] as char);
        }
    }
    text
}

/// Decodes base58 text back to bytes.
///
/// Fails on the first character outside the alphabet. Leading '1' characters
/// are restored as zero bytes that the minimal integer representation would
/// otherwise drop. Empty text decodes to empty bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, Base58Error> {
    let mut digits = Vec::with_capacity(text.len());
    for character in text.chars() {
        let digit = ALPHABET
            .iter()
            .position(|symbol| *symbol as char == character)
            .ok_or(Base58Error::InvalidCharacter(character))?;
        digits.push(digit as u8);
    }

    let zeros = digits.iter().take_while(|digit| **digit == 0).count();
    let mut bytes = vec![0u8; zeros];
    // All digits are < 58 at this point, so the conversion cannot fail.
    if let Some(value) = BigUint::from_radix_be(&digits, 58) {
        if !value.is_zero() {
            bytes.extend(value.to_bytes_be());
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn round_trips_all_lengths_up_to_64() {
        for len in 0..=64usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            assert_eq!(decode(&encode(&bytes)).unwrap(), bytes, "length {}", len);
        }
    }

    #[test]
    fn round_trips_text() {
        for text in ["", "1", "11z", "StV1DL6CwTryKyV", "2k6VZBtUCXsLi8aPSajExBPgZyNidT2wBZQqiqiVfR7E"] {
            assert_eq!(encode(&decode(text).unwrap()), text);
        }
    }

    #[test]
    fn encodes_known_vector() {
        assert_eq!(encode(b"hello world"), "StV1DL6CwTryKyV");
    }

    #[test]
    fn preserves_leading_zero_run() {
        let encoded = encode(&[0, 0, 7]);
        assert_eq!(encoded, "118");
        assert_eq!(decode(&encoded).unwrap(), vec![0, 0, 7]);
    }

    #[test]
    fn all_zero_input_is_all_ones() {
        assert_eq!(encode(&[0, 0, 0]), "111");
        assert_eq!(decode("111").unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn empty_round_trip() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[rstest]
    #[case('0')]
    #[case('O')]
    #[case('I')]
    #[case('l')]
    #[case('!')]
    fn rejects_characters_outside_alphabet(#[case] character: char) {
        let text = format!("abc{}def", character);
        assert_eq!(
            decode(&text),
            Err(Base58Error::InvalidCharacter(character))
        );
    }
}
