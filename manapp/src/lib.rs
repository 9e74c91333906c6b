//! Transaction decoding and display core for MAN network signing.
//!
//! Untrusted transaction bytes arrive over a constrained channel; this
//! crate decodes them into a fixed-size field table, validates every
//! structural and semantic constraint, and renders each field as a
//! bounded, paginated string for a review screen.
//!
//! # Architecture
//!
//! 1. [`parse`] walks the RLP structure once and fills a
//!    [`ParsedTransaction`] of borrowed views into the input buffer.
//! 2. [`display::validate`] renders every logical item once; if any
//!    field cannot be shown the transaction must not be signed.
//! 3. The caller then requests item/page pairs with
//!    [`display::get_item`] to drive the review screens.
//!
//! # Security Model
//!
//! - All length fields are validated before any slice access
//! - Fixed-capacity tables, no heap allocation anywhere in the core
//! - Fail closed on any malformed data; no partial results
//! - Output buffers are cleared before rendering so a mid-render
//!   failure never leaves stale data visible

#![cfg_attr(not(test), no_std)]

pub mod crypto;
pub mod display;
pub mod parsing;
pub mod uint256;
pub mod utils;

pub use manapp_common::{ParserError, TxType};
pub use parsing::{parse, ParsedTransaction};
pub use uint256::Uint256;
