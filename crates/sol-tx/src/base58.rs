//! Base-58 encoding for 32- and 64-byte identifiers.
//!
//! Uses the Bitcoin alphabet (no `0`, `O`, `I` or `l`) with no checksum
//! byte. Leading zero bytes map one-to-one onto leading `'1'` characters;
//! the rest of the buffer is converted as a big-endian unsigned integer by
//! repeated division (encode) or multiply-and-add (decode).

use crate::error::CodecError;

/// The 58 symbols, in digit order.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const INVALID: u8 = 0xff;

/// ASCII code point -> digit value, `INVALID` for characters outside the alphabet.
const DECODE_MAP: [u8; 128] = {
    let mut map = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
};

fn digit_value(ch: char) -> Option<u8> {
    let code = ch as usize;
    if code >= DECODE_MAP.len() {
        return None;
    }
    match DECODE_MAP[code] {
        INVALID => None,
        value => Some(value),
    }
}

/// Encode `input` as a base-58 string. An empty slice encodes to `""`.
pub fn encode(input: &[u8]) -> String {
    let zeros = input.iter().take_while(|&&b| b == 0).count();

    // log(256) / log(58) ~= 1.38 digits per input byte.
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 138 / 100 + 1);

    for &byte in &input[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat('1').take(zeros));
    out.extend(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char));
    out
}

/// Decode a base-58 string that must yield exactly `expected_len` bytes.
///
/// Every character is validated before any arithmetic, so
/// [`CodecError::InvalidCharacter`] takes precedence over a length problem.
/// Decoding stops as soon as the output outgrows `expected_len`; in that
/// case the `actual` field of [`CodecError::LengthMismatch`] is the count
/// reached so far, not the full decoded length.
///
/// A string made only of `'1'` characters decodes to that many zero bytes.
pub fn decode(input: &str, expected_len: usize) -> Result<Vec<u8>, CodecError> {
    if input.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let mut values = Vec::with_capacity(input.len());
    for (index, character) in input.char_indices() {
        let value =
            digit_value(character).ok_or(CodecError::InvalidCharacter { character, index })?;
        values.push(value);
    }

    let ones = values.iter().take_while(|&&v| v == 0).count();
    let mismatch = |actual: usize| CodecError::LengthMismatch {
        expected: expected_len,
        actual,
    };
    if ones > expected_len {
        return Err(mismatch(ones));
    }

    // Little-endian accumulator, reversed at the end.
    let mut bytes: Vec<u8> = Vec::with_capacity(expected_len - ones);
    for &value in &values[ones..] {
        let mut carry = value as u32;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
        if ones + bytes.len() > expected_len {
            return Err(mismatch(ones + bytes.len()));
        }
    }

    if ones + bytes.len() != expected_len {
        return Err(mismatch(ones + bytes.len()));
    }

    let mut out = vec![0u8; ones];
    out.extend(bytes.iter().rev());
    Ok(out)
}

/// Decode a base-58 string into a fixed-size array of exactly `N` bytes.
pub fn decode_array<const N: usize>(input: &str) -> Result<[u8; N], CodecError> {
    let bytes = decode(input, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    // Reference vectors shared by the Bitcoin base58 implementations.
    const VECTORS: &[(&str, &str)] = &[
        ("61", "2g"),
        ("626262", "a3gV"),
        ("636363", "aPEr"),
        (
            "73696d706c792061206c6f6e6720737472696e67",
            "2cFupjhnEsSn59qHXstmK2ffpLv2",
        ),
        (
            "00eb15231dfceb60925886b67d065299925915aeb172c06647",
            "1NS17iag9jJgTHD1VXjvLCEnZuQ3rJDE9L",
        ),
        ("516b6fcd0f", "ABnLTmg"),
        ("bf4f89001e670274dd", "3SEo3LWLoPntC"),
        ("572e4794", "3EFU7m"),
        ("ecac89cad93923c02321", "EJDM8drfXA6uyA"),
        ("10c8511e", "Rt5zm"),
        ("00000000000000000000", "1111111111"),
    ];

    #[test]
    fn reference_vectors_encode() {
        for (hex_input, expected) in VECTORS {
            let bytes = hex::decode(hex_input).unwrap();
            assert_eq!(encode(&bytes), *expected, "encoding {hex_input}");
        }
    }

    #[test]
    fn reference_vectors_decode() {
        for (hex_input, text) in VECTORS {
            let bytes = hex::decode(hex_input).unwrap();
            assert_eq!(decode(text, bytes.len()).unwrap(), bytes, "decoding {text}");
        }
    }

    #[test]
    fn empty_buffer_encodes_to_empty_string() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn all_zero_key_is_all_ones() {
        let encoded = encode(&[0u8; 32]);
        assert_eq!(encoded, "11111111111111111111111111111111");
        assert_eq!(encoded.len(), 32);
        assert_eq!(decode(&encoded, 32).unwrap(), vec![0u8; 32]);
    }

    #[test]
    fn all_ones_string_decodes_to_its_own_length() {
        assert_eq!(decode("111", 3).unwrap(), vec![0u8; 3]);
        assert_eq!(
            decode(&"1".repeat(33), 32),
            Err(CodecError::LengthMismatch {
                expected: 32,
                actual: 33
            })
        );
        assert_eq!(
            decode(&"1".repeat(31), 32),
            Err(CodecError::LengthMismatch {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn all_ff_buffers_roundtrip() {
        for len in [32usize, 64] {
            let bytes = vec![0xffu8; len];
            let encoded = encode(&bytes);
            assert_eq!(decode(&encoded, len).unwrap(), bytes);
        }
    }

    #[test]
    fn random_buffers_roundtrip_and_match_bs58() {
        let mut rng = rand::thread_rng();
        for len in [32usize, 64] {
            for _ in 0..200 {
                let mut bytes = vec![0u8; len];
                rng.fill_bytes(&mut bytes);
                // Exercise the leading-zero path on a fraction of inputs.
                let zeros = (bytes[0] % 4) as usize;
                bytes[..zeros].fill(0);

                let encoded = encode(&bytes);
                assert_eq!(encoded, bs58::encode(&bytes).into_string());
                assert!(encoded.bytes().all(|c| ALPHABET.contains(&c)));
                assert!(encoded.starts_with(&"1".repeat(zeros)));
                assert_eq!(decode(&encoded, len).unwrap(), bytes);
            }
        }
    }

    #[test]
    fn same_length_buffers_encode_distinctly() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        a[31] = 1;
        b[0] = 1;
        assert_ne!(encode(&a), encode(&b));
        assert_ne!(encode(&a), encode(&[0u8; 32]));
    }

    #[test]
    fn rejects_excluded_characters() {
        for bad in ['0', 'O', 'I', 'l'] {
            let input = format!("{}{bad}", "2".repeat(10));
            assert_eq!(
                decode(&input, 32),
                Err(CodecError::InvalidCharacter {
                    character: bad,
                    index: 10
                })
            );
        }
        assert!(matches!(
            decode("0OIl", 32),
            Err(CodecError::InvalidCharacter { character: '0', index: 0 })
        ));
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(matches!(
            decode("abc\u{e9}", 32),
            Err(CodecError::InvalidCharacter { character: '\u{e9}', index: 3 })
        ));
    }

    #[test]
    fn invalid_character_wins_over_length() {
        // Far too long for 32 bytes and also malformed.
        let input = format!("{}0", "z".repeat(200));
        assert!(matches!(
            decode(&input, 32),
            Err(CodecError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(decode("", 32), Err(CodecError::EmptyInput));
    }

    #[test]
    fn rejects_single_character_for_key() {
        assert_eq!(
            decode("2", 32),
            Err(CodecError::LengthMismatch {
                expected: 32,
                actual: 1
            })
        );
    }

    #[test]
    fn oversized_input_stops_early() {
        let input = "z".repeat(10_000);
        match decode(&input, 32) {
            Err(CodecError::LengthMismatch { expected, actual }) => {
                assert_eq!(expected, 32);
                assert!(actual > 32 && actual < 40);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn decode_array_fixed_size() {
        let arr: [u8; 32] = decode_array("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap();
        assert_eq!(arr[0], 0x06);
        assert_eq!(arr[31], 0xa9);
        assert!(decode_array::<64>("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").is_err());
    }
}
