//! MAN transaction schema walk.
//!
//! A transaction is a 13-field root list. Field 12 wraps a single
//! 3-field extra list `[txType, lockHeight, extraToList]`, and the
//! extra-to list holds up to ten `[recipient, amount, payload]`
//! groups. The walk fills fixed-capacity tables of borrowed views and
//! validates every count along the way.

use crate::parsing::rlp::{self, RlpElem, RlpKind};
use manapp_common::{
    ParserError, TxType, EXTRA_FIELD_COUNT, EXTRA_TO_FIELD_COUNT, EXTRA_TO_GROUP_MAX,
    ROOT_FIELD_COUNT,
};

/// Root field positions, in wire order.
pub const FIELD_NONCE: usize = 0;
pub const FIELD_GAS_PRICE: usize = 1;
pub const FIELD_GAS_LIMIT: usize = 2;
pub const FIELD_TO: usize = 3;
pub const FIELD_VALUE: usize = 4;
pub const FIELD_DATA: usize = 5;
pub const FIELD_CHAIN_ID: usize = 6;
pub const FIELD_ENTER_TYPE: usize = 7;
pub const FIELD_IS_ENTRUST: usize = 10;
pub const FIELD_COMMIT_TIME: usize = 11;

/// Extra-list field positions.
pub const EXTRA_TX_TYPE: usize = 0;
pub const EXTRA_LOCK_HEIGHT: usize = 1;
pub const EXTRA_TO_LIST: usize = 2;

/// A fully walked transaction, borrowing from the input buffer.
///
/// Construction only succeeds if every structural constraint held, so
/// holders can index the fixed tables without re-validating counts.
pub struct ParsedTransaction<'a> {
    fields: [RlpElem<'a>; ROOT_FIELD_COUNT],
    extra_fields: [RlpElem<'a>; EXTRA_FIELD_COUNT],
    extra_to: [RlpElem<'a>; EXTRA_TO_GROUP_MAX],
    extra_to_count: u8,
    tx_type: TxType,
}

impl<'a> ParsedTransaction<'a> {
    /// A root-list field by wire position.
    pub fn root_field(&self, idx: usize) -> Result<&RlpElem<'a>, ParserError> {
        self.fields.get(idx).ok_or(ParserError::UnexpectedError)
    }

    /// An extra-list field by wire position.
    pub fn extra_field(&self, idx: usize) -> Result<&RlpElem<'a>, ParserError> {
        self.extra_fields
            .get(idx)
            .ok_or(ParserError::UnexpectedError)
    }

    /// The i-th recipient group, still in list form.
    pub fn extra_to_group(&self, idx: usize) -> Result<&RlpElem<'a>, ParserError> {
        if idx >= self.extra_to_count as usize {
            return Err(ParserError::UnexpectedError);
        }
        self.extra_to.get(idx).ok_or(ParserError::UnexpectedError)
    }

    /// Number of recipient groups present.
    #[inline]
    pub fn extra_to_count(&self) -> u8 {
        self.extra_to_count
    }

    /// Validated transaction subtype.
    #[inline]
    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }
}

/// Walks the full transaction structure in `input`.
///
/// The input must contain exactly one root list and nothing after it.
pub fn parse(input: &[u8]) -> Result<ParsedTransaction<'_>, ParserError> {
    if input.is_empty() {
        return Err(ParserError::InitContextEmpty);
    }

    let (root, consumed) = rlp::decode(input)?;
    if consumed < input.len() {
        return Err(ParserError::UnexpectedUnparsedBytes);
    }
    if root.kind() != RlpKind::List {
        return Err(ParserError::UnexpectedType);
    }

    let (fields, count) = rlp::read_list::<ROOT_FIELD_COUNT>(&root)?;
    if count != ROOT_FIELD_COUNT {
        return Err(ParserError::UnexpectedNumberItems);
    }

    // Field 12 is a one-element wrapper around the extra list.
    let (wrapper, wrapper_count) = rlp::read_list::<1>(&fields[ROOT_FIELD_COUNT - 1])?;
    if wrapper_count != 1 {
        return Err(ParserError::UnexpectedNumberItems);
    }

    let (extra_fields, extra_count) = rlp::read_list::<EXTRA_FIELD_COUNT>(&wrapper[0])?;
    if extra_count != EXTRA_FIELD_COUNT {
        return Err(ParserError::UnexpectedNumberItems);
    }

    // Only the least-significant byte of the subtype field carries
    // the code; any higher bytes are ignored on the wire.
    let raw_type = extra_fields[EXTRA_TX_TYPE].as_u256()?;
    let tx_type = TxType::from_code(raw_type.low_u64() as u8)?;

    let mut extra_to = [RlpElem::EMPTY; EXTRA_TO_GROUP_MAX];
    let mut extra_to_count = 0u8;
    let to_list = &extra_fields[EXTRA_TO_LIST];
    if to_list.kind() == RlpKind::List && !to_list.payload().is_empty() {
        let (groups, group_count) = rlp::read_list::<EXTRA_TO_GROUP_MAX>(to_list)?;
        // Each group must be a well-formed 3-field list up front, so a
        // malformed group is rejected at parse time rather than when
        // its display row is first requested.
        for group in groups.iter().take(group_count) {
            let (_, n) = rlp::read_list::<EXTRA_TO_FIELD_COUNT>(group)?;
            if n != EXTRA_TO_FIELD_COUNT {
                return Err(ParserError::UnexpectedValue);
            }
        }
        extra_to = groups;
        extra_to_count = group_count as u8;
    }

    log::debug!(
        "parsed tx type={:?} extra_to_count={}",
        tx_type,
        extra_to_count
    );

    Ok(ParsedTransaction {
        fields,
        extra_fields,
        extra_to,
        extra_to_count,
        tx_type,
    })
}
