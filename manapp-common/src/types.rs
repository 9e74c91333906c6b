//! Schema constants and the transaction subtype enumeration.
//!
//! The MAN transaction schema is fixed: field counts at every nesting
//! level are protocol constants, which is what lets the parser run on
//! fixed-capacity arrays with no heap growth.

use crate::error::ParserError;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

/// Fields in the root transaction list.
pub const ROOT_FIELD_COUNT: usize = 13;

/// Fields in the nested extra-fields list.
pub const EXTRA_FIELD_COUNT: usize = 3;

/// Maximum number of extra recipient groups.
pub const EXTRA_TO_GROUP_MAX: usize = 10;

/// Fields in each recipient group sub-list.
pub const EXTRA_TO_FIELD_COUNT: usize = 3;

/// Fixed display rows before the per-recipient rows.
pub const FIXED_DISPLAY_COUNT: u8 = 12;

/// Conventional capacity of a label buffer, terminator included.
pub const KEY_BUFFER_LEN: usize = 40;

/// Conventional capacity of a value buffer, terminator included.
pub const VALUE_BUFFER_LEN: usize = 40;

/// Capacity of an encoded-address buffer, terminator included.
pub const ADDRESS_BUFFER_LEN: usize = 50;

/// Uncompressed secp256k1 public key length (0x04 prefix included).
pub const PUBKEY_LEN: usize = 65;

/// Raw account address length (last 20 bytes of the pubkey hash).
pub const RAW_ADDRESS_LEN: usize = 20;

/// Transaction subtype carried in the extra-fields list.
///
/// The code space is sparse: 7, 8 and 15..=121 are unassigned and must
/// be rejected even though they sit inside the numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum TxType {
    Normal = 0,
    Broadcast = 1,
    MinerReward = 2,
    Scheduled = 3,
    Revert = 4,
    Authorized = 5,
    CancelAuth = 6,
    CreateCurrency = 9,
    VerifyReward = 10,
    InterestReward = 11,
    TxFeeReward = 12,
    LotteryReward = 13,
    SetBlacklist = 14,
    SuperBlock = 122,
}

/// Every assigned subtype code, sorted for membership search.
pub const KNOWN_TX_CODES: [u8; 14] = [0, 1, 2, 3, 4, 5, 6, 9, 10, 11, 12, 13, 14, 122];

/// How a subtype renders the payload/data fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Payload characters are copied as-is.
    Text,
    /// Payload bytes are rendered as hex.
    Hex,
}

impl TxType {
    /// Validates a raw subtype code and converts it.
    ///
    /// Codes above the highest assigned code are out of range; codes
    /// inside the range but absent from [`KNOWN_TX_CODES`] are
    /// rejected as unexpected. This is a membership check, not a
    /// range check.
    pub fn from_code(code: u8) -> Result<Self, ParserError> {
        if code > TxType::SuperBlock as u8 {
            return Err(ParserError::ValueOutOfRange);
        }
        if KNOWN_TX_CODES.binary_search(&code).is_err() {
            return Err(ParserError::UnexpectedValue);
        }
        TxType::from_u8(code).ok_or(ParserError::UnexpectedError)
    }

    /// Display name, for the subtypes the device is able to review.
    pub fn display_name(self) -> Option<&'static str> {
        match self {
            TxType::Normal => Some("Normal"),
            TxType::Scheduled => Some("Scheduled"),
            TxType::Revert => Some("Revert"),
            TxType::Authorized => Some("Authorize"),
            TxType::CancelAuth => Some("Cancel Auth"),
            TxType::CreateCurrency => Some("Create curr"),
            _ => None,
        }
    }

    /// Data-field rendering mode, for the reviewable subtypes.
    pub fn payload_mode(self) -> Option<PayloadMode> {
        match self {
            TxType::Authorized | TxType::CreateCurrency | TxType::CancelAuth => {
                Some(PayloadMode::Text)
            }
            TxType::Normal | TxType::Scheduled | TxType::Revert => Some(PayloadMode::Hex),
            _ => None,
        }
    }
}
