//! RLP (Recursive Length Prefix) decoder.
//!
//! Decodes one length-prefixed element at a time into a borrowed view
//! of the input buffer. This is the only place attacker-controlled
//! length fields are turned into slice bounds, so every computed range
//! is checked before a view is returned.
//!
//! # Specification
//!
//! RLP prefix rules, first byte `b`:
//! - Single byte [0x00, 0x7f]: itself
//! - String [0x80, 0xb7]: 0x80 + len, then data
//! - String [0xb8, 0xbf]: 0xb7 + len_of_len, then len, then data
//! - List [0xc0, 0xf7]: 0xc0 + len, then items
//! - List [0xf8, 0xff]: 0xf7 + len_of_len, then len, then items
//!
//! Non-canonical encodings are accepted; the wire format this decoder
//! consumes does not guarantee canonical prefixes.

use crate::uint256::Uint256;
use manapp_common::ParserError;

/// Element kind, per prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlpKind {
    /// A single byte that is both tag and payload.
    Byte,
    /// A byte string (may be empty).
    String,
    /// A list of nested elements.
    List,
}

/// A decoded RLP element: a borrowed, never-copied view of the input.
///
/// The view dies with the buffer it was decoded from; nothing here
/// owns payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpElem<'a> {
    kind: RlpKind,
    payload: &'a [u8],
}

impl<'a> RlpElem<'a> {
    /// Placeholder element used to fill fixed-capacity tables.
    pub const EMPTY: RlpElem<'static> = RlpElem {
        kind: RlpKind::String,
        payload: &[],
    };

    #[inline]
    pub fn kind(&self) -> RlpKind {
        self.kind
    }

    /// Raw payload bytes. For a `Byte` element this is the byte itself.
    #[inline]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Payload as seen by the paged display routines.
    ///
    /// A `Byte` element has display length zero, matching the
    /// reference convention that single-byte placeholders page as
    /// empty fields.
    pub fn display_bytes(&self) -> &'a [u8] {
        match self.kind {
            RlpKind::Byte => &[],
            _ => self.payload,
        }
    }

    /// The tag byte of a `Byte` element.
    pub fn byte_value(&self) -> Result<u8, ParserError> {
        if self.kind != RlpKind::Byte {
            return Err(ParserError::UnexpectedType);
        }
        self.payload
            .first()
            .copied()
            .ok_or(ParserError::UnexpectedError)
    }

    /// Reads the element as a big-endian 256-bit unsigned integer.
    ///
    /// Requires a `Byte` or a `String` of at most 32 bytes.
    pub fn as_u256(&self) -> Result<Uint256, ParserError> {
        match self.kind {
            RlpKind::Byte => {
                let b = self
                    .payload
                    .first()
                    .copied()
                    .ok_or(ParserError::UnexpectedError)?;
                Ok(Uint256::from_u64(b as u64))
            }
            RlpKind::String => Uint256::from_be_bytes(self.payload),
            RlpKind::List => Err(ParserError::UnexpectedType),
        }
    }
}

/// Decodes one element from the front of `input`.
///
/// Returns the element and the number of bytes it consumed. Fails with
/// a bounds error whenever a declared length extends past the slice.
pub fn decode(input: &[u8]) -> Result<(RlpElem<'_>, usize), ParserError> {
    let first = *input.first().ok_or(ParserError::NoData)?;

    match first {
        // Single byte: tag and payload in one
        0x00..=0x7f => Ok((
            RlpElem {
                kind: RlpKind::Byte,
                payload: &input[..1],
            },
            1,
        )),

        // Short string (0-55 bytes)
        0x80..=0xb7 => {
            let len = (first - 0x80) as usize;
            let payload = input
                .get(1..1 + len)
                .ok_or(ParserError::UnexpectedBufferEnd)?;
            Ok((
                RlpElem {
                    kind: RlpKind::String,
                    payload,
                },
                1 + len,
            ))
        }

        // Long string
        0xb8..=0xbf => {
            let (payload, consumed) = long_form(input, first - 0xb7)?;
            Ok((
                RlpElem {
                    kind: RlpKind::String,
                    payload,
                },
                consumed,
            ))
        }

        // Short list (0-55 payload bytes)
        0xc0..=0xf7 => {
            let len = (first - 0xc0) as usize;
            let payload = input
                .get(1..1 + len)
                .ok_or(ParserError::UnexpectedBufferEnd)?;
            Ok((
                RlpElem {
                    kind: RlpKind::List,
                    payload,
                },
                1 + len,
            ))
        }

        // Long list
        0xf8..=0xff => {
            let (payload, consumed) = long_form(input, first - 0xf7)?;
            Ok((
                RlpElem {
                    kind: RlpKind::List,
                    payload,
                },
                consumed,
            ))
        }
    }
}

/// Resolves a long-form length: `len_of_len` big-endian bytes follow
/// the tag, then the payload.
fn long_form(input: &[u8], len_of_len: u8) -> Result<(&[u8], usize), ParserError> {
    let len_of_len = len_of_len as usize;
    let len_bytes = input
        .get(1..1 + len_of_len)
        .ok_or(ParserError::UnexpectedBufferEnd)?;

    let mut len = 0usize;
    for &b in len_bytes {
        len = len
            .checked_mul(256)
            .and_then(|l| l.checked_add(b as usize))
            .ok_or(ParserError::ValueOutOfRange)?;
    }

    let start = 1 + len_of_len;
    let end = start
        .checked_add(len)
        .ok_or(ParserError::UnexpectedBufferEnd)?;
    let payload = input
        .get(start..end)
        .ok_or(ParserError::UnexpectedBufferEnd)?;
    Ok((payload, end))
}

/// Splits a list element into its immediate children.
///
/// Decodes successive elements until the list's declared payload is
/// exhausted. Fails if more than `N` children are found or if any
/// child overruns the declared payload (truncated nesting).
pub fn read_list<'a, const N: usize>(
    list: &RlpElem<'a>,
) -> Result<([RlpElem<'a>; N], usize), ParserError> {
    if list.kind != RlpKind::List {
        return Err(ParserError::UnexpectedType);
    }

    let mut children = [RlpElem::EMPTY; N];
    let mut count = 0;
    let mut rest = list.payload;
    while !rest.is_empty() {
        let (child, consumed) = decode(rest)?;
        if count == N {
            return Err(ParserError::UnexpectedNumberItems);
        }
        children[count] = child;
        count += 1;
        rest = &rest[consumed..];
    }

    Ok((children, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decodes a prefix sitting in a buffer large enough to hold the
    /// claimed payload, mirroring the reference decoder's test table.
    fn decode_padded(prefix: &[u8], total: usize) -> (RlpKind, usize, usize) {
        let mut buf = vec![0u8; total.max(prefix.len())];
        buf[..prefix.len()].copy_from_slice(prefix);
        let (elem, consumed) = decode(&buf).unwrap();
        (elem.kind(), elem.display_bytes().len(), consumed)
    }

    #[test]
    fn test_decode_single_bytes() {
        assert_eq!(decode_padded(&[0x00], 1), (RlpKind::Byte, 0, 1));
        assert_eq!(decode_padded(&[0x01], 1), (RlpKind::Byte, 0, 1));
        assert_eq!(decode_padded(&[0x7f], 1), (RlpKind::Byte, 0, 1));
    }

    #[test]
    fn test_decode_strings() {
        assert_eq!(decode_padded(&[0x80], 1), (RlpKind::String, 0, 1));
        assert_eq!(decode_padded(&[0xb7], 56), (RlpKind::String, 55, 56));
        assert_eq!(
            decode_padded(&[0xb9, 0x04, 0x00], 1027),
            (RlpKind::String, 1024, 1027)
        );
    }

    #[test]
    fn test_decode_lists() {
        assert_eq!(decode_padded(&[0xc0], 1), (RlpKind::List, 0, 1));
        assert_eq!(decode_padded(&[0xc8], 9), (RlpKind::List, 8, 9));
        assert_eq!(decode_padded(&[0xf7], 56), (RlpKind::List, 55, 56));
        assert_eq!(
            decode_padded(&[0xf9, 0x04, 0x00], 1027),
            (RlpKind::List, 1024, 1027)
        );
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode(&[]), Err(ParserError::NoData));
    }

    #[test]
    fn test_decode_truncated_payloads() {
        // Claimed length runs past the slice end.
        assert_eq!(
            decode(&[0x85, 0x01, 0x02]),
            Err(ParserError::UnexpectedBufferEnd)
        );
        assert_eq!(decode(&[0xb9, 0x04]), Err(ParserError::UnexpectedBufferEnd));
        assert_eq!(
            decode(&[0xb9, 0x04, 0x00, 0xaa]),
            Err(ParserError::UnexpectedBufferEnd)
        );
        assert_eq!(decode(&[0xc5, 0x01]), Err(ParserError::UnexpectedBufferEnd));
        assert_eq!(decode(&[0xf8]), Err(ParserError::UnexpectedBufferEnd));
    }

    #[test]
    fn test_decode_never_reads_past_slice() {
        // Every prefix byte against every truncation of a small
        // buffer: decode must either fail or stay inside the slice.
        for first in 0u8..=255 {
            for extra in 0..4usize {
                let mut buf = vec![first];
                buf.extend(core::iter::repeat(0x01).take(extra));
                if let Ok((elem, consumed)) = decode(&buf) {
                    assert!(consumed <= buf.len());
                    assert!(elem.payload().len() <= buf.len());
                }
            }
        }
    }

    #[test]
    fn test_read_list_children() {
        // [0x05, "444"]
        let data = [0xc5, 0x05, 0x83, 0x34, 0x34, 0x34];
        let (list, consumed) = decode(&data).unwrap();
        assert_eq!(consumed, data.len());
        let (children, count) = read_list::<4>(&list).unwrap();
        assert_eq!(count, 2);
        assert_eq!(children[0].kind(), RlpKind::Byte);
        assert_eq!(children[0].byte_value(), Ok(0x05));
        assert_eq!(children[1].payload(), b"444");
    }

    #[test]
    fn test_read_list_nested() {
        // [0x01, [0x02, [0x03, []]]]
        let data = [0xc6, 0x01, 0xc4, 0x02, 0xc2, 0x03, 0xc0];
        let (list, _) = decode(&data).unwrap();
        let (children, count) = read_list::<4>(&list).unwrap();
        assert_eq!(count, 2);
        assert_eq!(children[1].kind(), RlpKind::List);
        let (inner, inner_count) = read_list::<4>(&children[1]).unwrap();
        assert_eq!(inner_count, 2);
        assert_eq!(inner[1].kind(), RlpKind::List);
    }

    #[test]
    fn test_read_list_capacity_guard() {
        let data = [0xc4, 0x01, 0x02, 0x03, 0x04];
        let (list, _) = decode(&data).unwrap();
        assert_eq!(
            read_list::<3>(&list).map(|(_, n)| n),
            Err(ParserError::UnexpectedNumberItems)
        );
        assert_eq!(read_list::<4>(&list).map(|(_, n)| n), Ok(4));
    }

    #[test]
    fn test_read_list_truncated_child() {
        // List claims 2 payload bytes but the child claims 3.
        let data = [0xc2, 0x83, 0x61];
        let (list, _) = decode(&data).unwrap();
        assert_eq!(
            read_list::<4>(&list).map(|(_, n)| n),
            Err(ParserError::UnexpectedBufferEnd)
        );
    }

    #[test]
    fn test_read_list_wrong_kind() {
        let data = [0x83, 0x61, 0x62, 0x63];
        let (elem, _) = decode(&data).unwrap();
        assert_eq!(
            read_list::<4>(&elem).map(|(_, n)| n),
            Err(ParserError::UnexpectedType)
        );
    }

    #[test]
    fn test_as_u256() {
        let (elem, _) = decode(&[0x05]).unwrap();
        assert_eq!(elem.as_u256().unwrap().low_u64(), 5);

        let (elem, _) = decode(&[0x80]).unwrap();
        assert_eq!(elem.as_u256().unwrap().low_u64(), 0);

        let (elem, _) = decode(&[0x87, 0x10, 0, 0, 0, 0, 0, 0x40]).unwrap();
        assert_eq!(elem.as_u256().unwrap().low_u64(), 4503599627370560);

        // 33-byte integers are out of range.
        let mut long = vec![0xa1];
        long.extend([0xff; 33]);
        let (elem, _) = decode(&long).unwrap();
        assert_eq!(elem.as_u256(), Err(ParserError::ValueOutOfRange));

        let (elem, _) = decode(&[0xc0]).unwrap();
        assert_eq!(elem.as_u256(), Err(ParserError::UnexpectedType));
    }
}
