//! Error type for transaction decoding and display.
//!
//! Every error cause is a deterministic function of the input bytes,
//! so no error is ever retried. Messages are intentionally terse: the
//! only user-visible behavior downstream is "reject this transaction,
//! show error class".

use core::fmt;
use num_derive::{FromPrimitive, ToPrimitive};

/// Error codes for the decode-validate-display pipeline.
///
/// A parse either returns a fully validated field table or one of
/// these; there is no partial recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum ParserError {
    /// Input exhausted while an element was still expected.
    NoData = 0x01,

    /// Empty or missing input buffer supplied to parse.
    InitContextEmpty = 0x02,

    /// A declared element length extends past the buffer end.
    UnexpectedBufferEnd = 0x03,

    /// The root element did not consume the whole input.
    UnexpectedUnparsedBytes = 0x04,

    /// Element kind differs from what the schema requires.
    UnexpectedType = 0x05,

    /// A list did not unpack to its schema-mandated cardinality.
    UnexpectedNumberItems = 0x06,

    /// A value is structurally valid but not an accepted one
    /// (e.g. a subtype code absent from the known set).
    UnexpectedValue = 0x07,

    /// An integer field exceeds its representable range.
    ValueOutOfRange = 0x08,

    /// Requested logical display index is past the item count.
    DisplayIdxOutOfRange = 0x09,

    /// Rendering target cannot hold the formatted value.
    BufferTooSmall = 0x0A,

    /// Internal invariant violation.
    UnexpectedError = 0x0B,
}

impl ParserError {
    /// Returns the error code as a u32.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::NoData => write!(f, "No more data"),
            ParserError::InitContextEmpty => write!(f, "Initialized empty context"),
            ParserError::UnexpectedBufferEnd => write!(f, "Unexpected buffer end"),
            ParserError::UnexpectedUnparsedBytes => write!(f, "Unexpected unparsed bytes"),
            ParserError::UnexpectedType => write!(f, "Unexpected type"),
            ParserError::UnexpectedNumberItems => write!(f, "Unexpected number of items"),
            ParserError::UnexpectedValue => write!(f, "Unexpected value"),
            ParserError::ValueOutOfRange => write!(f, "Value out of range"),
            ParserError::DisplayIdxOutOfRange => write!(f, "Display index out of range"),
            ParserError::BufferTooSmall => write!(f, "Output buffer too small"),
            ParserError::UnexpectedError => write!(f, "Unexpected error"),
        }
    }
}
