//! Common types for the MAN transaction decoding core.
//!
//! This crate provides the error enum and schema constants shared by
//! the parser and by any front end that drives the review screens.
//!
//! # Security Note
//!
//! Transaction bytes cross a trust boundary. All validation happens in
//! the `manapp` parser; nothing in this crate inspects input data.

#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod types;

pub use error::ParserError;
pub use types::*;
