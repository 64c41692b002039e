//! Shared parsing for `$`-delimited hash tokens.
//!
//! ```text
//! argon2: VERSION $ MEMORY $ TIME $ PARALLELISM $ hex(SALT) $ hex(KEY)
//! scrypt: N $ R $ P $ hex(SALT) $ hex(KEY)
//! ```

use std::str::FromStr;

use const_hex::FromHexError;

use crate::error::{Error, Result};

pub const SEPARATOR: char = '$';

/// Split `token` into exactly `N` fields.
pub fn split<const N: usize>(token: &str) -> Result<[&str; N]> {
    let fields: Vec<&str> = token.split(SEPARATOR).collect();
    let found = fields.len();

    fields
        .try_into()
        .map_err(|_| Error::InvalidHashLength { expected: N, found })
}

/// Parse a decimal field, keeping the literal text on failure.
pub fn parse_number<T>(field: &'static str, literal: &str) -> Result<T>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    literal.parse().map_err(|source| Error::Parse {
        field,
        literal: literal.to_string(),
        source,
    })
}

/// Decode a hex field, reporting the first non-hex character before any length check.
pub fn decode_hex(field: &'static str, literal: &str) -> Result<Vec<u8>> {
    if let Some((index, c)) = literal.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(Error::HexDecode {
            field,
            source: FromHexError::InvalidHexCharacter { c, index },
        });
    }

    const_hex::decode(literal).map_err(|source| Error::HexDecode { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_exact_field_count() {
        let [a, b, c] = split::<3>("1$2$3").unwrap();
        assert_eq!((a, b, c), ("1", "2", "3"));
    }

    #[test]
    fn split_wrong_field_count_fails() {
        match split::<6>("19$") {
            Err(Error::InvalidHashLength { expected, found }) => {
                assert_eq!(expected, 6);
                assert_eq!(found, 2);
            }
            other => panic!("expected InvalidHashLength, got: {other:?}"),
        }
        assert!(split::<5>("1$2$3$4$5$6").is_err());
    }

    #[test]
    fn parse_number_keeps_literal() {
        match parse_number::<u32>("time cost", "3x") {
            Err(Error::Parse { field, literal, .. }) => {
                assert_eq!(field, "time cost");
                assert_eq!(literal, "3x");
            }
            other => panic!("expected Parse, got: {other:?}"),
        }
    }

    #[test]
    fn parse_number_rejects_negative() {
        assert!(parse_number::<u32>("parallelism", "-1").is_err());
    }

    #[test]
    fn decode_hex_reports_bad_byte() {
        match decode_hex("salt", "73_6c") {
            Err(Error::HexDecode {
                field,
                source: FromHexError::InvalidHexCharacter { c, index },
            }) => {
                assert_eq!(field, "salt");
                assert_eq!(c, '_');
                assert_eq!(index, 2);
            }
            other => panic!("expected HexDecode, got: {other:?}"),
        }
    }

    #[test]
    fn decode_hex_odd_length_fails() {
        assert!(matches!(
            decode_hex("derived key", "abc"),
            Err(Error::HexDecode { .. })
        ));
    }

    #[test]
    fn decode_hex_valid() {
        assert_eq!(decode_hex("salt", "73616c74").unwrap(), b"salt");
    }
}
