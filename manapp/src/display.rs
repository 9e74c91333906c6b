//! Review-screen item rendering.
//!
//! Each logical display item is a key/value pair; long values are
//! split into pages sized to the value buffer. The item order is fixed
//! by the review flow and does not match wire order one-for-one: the
//! R and S slots are never shown, so the rows after Data read their
//! source fields at an offset.

use crate::parsing::rlp::{self, RlpKind};
use crate::parsing::transaction::{
    self, ParsedTransaction, EXTRA_LOCK_HEIGHT,
};
use crate::uint256::Uint256;
use crate::utils;
use manapp_common::{
    ParserError, PayloadMode, EXTRA_TO_FIELD_COUNT, FIXED_DISPLAY_COUNT, KEY_BUFFER_LEN,
    VALUE_BUFFER_LEN,
};

/// Display row positions, in review order.
pub const ITEM_NONCE: u8 = 0;
pub const ITEM_GAS_PRICE: u8 = 1;
pub const ITEM_GAS_LIMIT: u8 = 2;
pub const ITEM_TO: u8 = 3;
pub const ITEM_VALUE: u8 = 4;
pub const ITEM_DATA: u8 = 5;
pub const ITEM_CHAIN_ID: u8 = 6;
pub const ITEM_ENTER_TYPE: u8 = 7;
pub const ITEM_IS_ENTRUST: u8 = 8;
pub const ITEM_COMMIT_TIME: u8 = 9;
pub const ITEM_TX_TYPE: u8 = 10;
pub const ITEM_LOCK_HEIGHT: u8 = 11;

/// Total number of display rows for this transaction.
pub fn num_items(tx: &ParsedTransaction<'_>) -> u8 {
    FIXED_DISPLAY_COUNT + tx.extra_to_count() * EXTRA_TO_FIELD_COUNT as u8
}

/// Renders every row once to prove the whole transaction can be
/// shown. Anything unrenderable rejects the transaction before the
/// user sees a single screen.
pub fn validate(tx: &ParsedTransaction<'_>) -> Result<(), ParserError> {
    let mut key = [0u8; KEY_BUFFER_LEN];
    let mut val = [0u8; VALUE_BUFFER_LEN];
    for idx in 0..num_items(tx) {
        get_item(tx, idx, &mut key, &mut val, 0)?;
    }
    Ok(())
}

/// Renders one page of one display row and returns the page count.
pub fn get_item(
    tx: &ParsedTransaction<'_>,
    display_idx: u8,
    out_key: &mut [u8],
    out_val: &mut [u8],
    page_idx: u8,
) -> Result<u8, ParserError> {
    if display_idx >= num_items(tx) {
        return Err(ParserError::DisplayIdxOutOfRange);
    }
    utils::clean_output(out_key, out_val);

    match display_idx {
        ITEM_NONCE => print_decimal_row(tx, display_idx as usize, "Nonce", out_key, out_val),
        ITEM_GAS_PRICE => {
            print_decimal_row(tx, display_idx as usize, "Gas Price", out_key, out_val)
        }
        ITEM_GAS_LIMIT => {
            print_decimal_row(tx, display_idx as usize, "Gas Limit", out_key, out_val)
        }
        ITEM_TO => {
            utils::write_text(out_key, format_args!("To"))?;
            let to = tx.root_field(transaction::FIELD_TO)?;
            utils::page_string(out_val, to.display_bytes(), page_idx)
        }
        ITEM_VALUE => print_decimal_row(tx, display_idx as usize, "Value", out_key, out_val),
        ITEM_DATA => {
            utils::write_text(out_key, format_args!("Data"))?;
            print_data(tx, out_val, page_idx)
        }
        ITEM_CHAIN_ID => {
            utils::write_text(out_key, format_args!("ChainID"))?;
            let chain_id = tx.root_field(transaction::FIELD_CHAIN_ID)?;
            if chain_id.kind() != RlpKind::Byte {
                return Err(ParserError::UnexpectedValue);
            }
            utils::write_text(out_val, format_args!("{}", chain_id.byte_value()?))?;
            Ok(1)
        }
        // EnterType through CommitTime sit two wire slots past their
        // display position once R and S are skipped. EnterType itself
        // keeps reading the R slot; the review flow has always shown
        // that slot under this label.
        ITEM_ENTER_TYPE => {
            print_decimal_row(tx, transaction::FIELD_ENTER_TYPE, "EnterType", out_key, out_val)
        }
        ITEM_IS_ENTRUST => {
            print_decimal_row(tx, transaction::FIELD_IS_ENTRUST, "IsEntrustTx", out_key, out_val)
        }
        ITEM_COMMIT_TIME => {
            utils::write_text(out_key, format_args!("CommitTime"))?;
            let value = tx.root_field(transaction::FIELD_COMMIT_TIME)?.as_u256()?;
            if !value.fits_u64() {
                return Err(ParserError::ValueOutOfRange);
            }
            utils::print_time(out_val, value.low_u64())?;
            Ok(1)
        }
        ITEM_TX_TYPE => {
            utils::write_text(out_key, format_args!("TxType"))?;
            let name = tx
                .tx_type()
                .display_name()
                .ok_or(ParserError::UnexpectedType)?;
            utils::write_text(out_val, format_args!("{}", name))?;
            Ok(1)
        }
        ITEM_LOCK_HEIGHT => {
            utils::write_text(out_key, format_args!("LockHeight"))?;
            let value = tx.extra_field(EXTRA_LOCK_HEIGHT)?.as_u256()?;
            print_decimal(&value, out_val)?;
            Ok(1)
        }
        _ => print_extra_to(tx, display_idx, out_key, out_val, page_idx),
    }
}

/// Rows whose value is the decimal rendering of a root field.
fn print_decimal_row(
    tx: &ParsedTransaction<'_>,
    field_idx: usize,
    label: &str,
    out_key: &mut [u8],
    out_val: &mut [u8],
) -> Result<u8, ParserError> {
    utils::write_text(out_key, format_args!("{}", label))?;
    let value = tx.root_field(field_idx)?.as_u256()?;
    print_decimal(&value, out_val)?;
    Ok(1)
}

fn print_decimal(value: &Uint256, out_val: &mut [u8]) -> Result<(), ParserError> {
    value.write_decimal(out_val).map(|_| ())
}

/// The Data row renders per subtype: entrust payloads are copied as
/// raw characters, transfer payloads are shown as hex. Subtypes the
/// device cannot review have no rendering at all.
fn print_data(
    tx: &ParsedTransaction<'_>,
    out_val: &mut [u8],
    page_idx: u8,
) -> Result<u8, ParserError> {
    let data = tx.root_field(transaction::FIELD_DATA)?;
    let mode = tx
        .tx_type()
        .payload_mode()
        .ok_or(ParserError::UnexpectedType)?;
    let bytes = data.display_bytes();
    if bytes.is_empty() {
        utils::write_text(out_val, format_args!("Empty"))?;
        return Ok(1);
    }
    match mode {
        PayloadMode::Text => utils::page_string(out_val, bytes, page_idx),
        PayloadMode::Hex => utils::page_string_hex(out_val, bytes, page_idx),
    }
}

/// Per-recipient rows: `To [i]`, `Amount [i]`, `Payload [i]`.
fn print_extra_to(
    tx: &ParsedTransaction<'_>,
    display_idx: u8,
    out_key: &mut [u8],
    out_val: &mut [u8],
    page_idx: u8,
) -> Result<u8, ParserError> {
    let rel = (display_idx - FIXED_DISPLAY_COUNT) as usize;
    let group_idx = rel / EXTRA_TO_FIELD_COUNT;
    let field_idx = rel % EXTRA_TO_FIELD_COUNT;

    let (group, count) = rlp::read_list::<EXTRA_TO_FIELD_COUNT>(tx.extra_to_group(group_idx)?)?;
    if count != EXTRA_TO_FIELD_COUNT {
        return Err(ParserError::UnexpectedValue);
    }
    let field = &group[field_idx];

    let pages = match field_idx {
        0 => {
            utils::write_text(out_key, format_args!("To [{}]", group_idx))?;
            utils::page_string(out_val, field.display_bytes(), page_idx)?
        }
        1 => {
            utils::write_text(out_key, format_args!("Amount [{}]", group_idx))?;
            print_decimal(&field.as_u256()?, out_val)?;
            1
        }
        _ => {
            utils::write_text(out_key, format_args!("Payload [{}]", group_idx))?;
            utils::page_string(out_val, field.display_bytes(), page_idx)?
        }
    };

    // A display-empty field reads as "Empty" whatever its position,
    // including a zero amount carried as an empty string.
    if field.display_bytes().is_empty() {
        utils::write_text(out_val, format_args!("Empty"))?;
        return Ok(1);
    }
    Ok(pages)
}
