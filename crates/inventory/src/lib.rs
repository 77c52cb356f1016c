//! Toy inventory domain module.
//!
//! This crate contains the catalog rules for the toy store: the serial number
//! scheme, the four toy variants and their validation, the line-oriented
//! record codec, and the in-memory inventory. It performs no IO.

pub mod codec;
pub mod serial;
pub mod store;
pub mod toy;

pub use codec::ParseError;
pub use serial::{SerialNumber, ToyKind};
pub use store::Inventory;
pub use toy::{Classification, PlayerRange, Price, PuzzleType, Size, Toy, ToyDetails, ToyDraft};

#[cfg(test)]
pub(crate) mod testing;
