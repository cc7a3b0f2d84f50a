//! # minihub-primitives
//!
//! Primitive types shared by the MiniHub SDK and CLI.
//!
//! Accounts and objects on the network share one 32-byte address space, so a
//! single [`Address`] type covers both. [`ObjectId`] is provided as an alias to
//! keep call sites readable.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;

pub use address::{Address, AddressError};

/// Identifier of an on-chain object
pub type ObjectId = Address;

/// Milliseconds since the Unix epoch, as stored by the on-chain clock
pub type TimestampMs = u64;
