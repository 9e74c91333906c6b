//! Transaction parsing.
//!
//! This module provides:
//! - RLP (Recursive Length Prefix) element decoding
//! - The schema walk producing the fixed field table
//!
//! # Security
//!
//! All parsing happens on untrusted input. Parsers must:
//! - Validate all length fields before access
//! - Fail closed on any malformed data
//! - Never copy payload bytes; elements are borrowed views

pub mod rlp;
pub mod transaction;

pub use rlp::{RlpElem, RlpKind};
pub use transaction::{parse, ParsedTransaction};
