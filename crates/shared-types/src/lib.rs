//! # Shared Types Crate
//!
//! Ledger layouts on top of the `tonlib_core` cell codec. Cells, builders,
//! parsers and bag-of-cells serialization come from the library; this crate
//! adds the account address, the state init, the external inbound message
//! and a screened entry point for untrusted bag-of-cells bytes.
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `cell` | Hash bytes, empty cell, 256-bit and coin fields |
//! | `address` | Standard internal address |
//! | `boc` | Screened bag-of-cells parsing and serialization |
//! | `state_init` | Contract code/data pair and address derivation |
//! | `message` | External inbound message layout |
//!
//! ## Design Principles
//!
//! - **Immutable once built**: a [`CellBuilder`] is the only mutable form.
//! - **Content addressed**: identity is the representation hash.
//! - **No panics on input**: every layout violation is a [`CellError`].

pub mod address;
pub mod boc;
pub mod cell;
pub mod errors;
pub mod message;
pub mod state_init;

pub use address::Address;
pub use boc::{from_boc, from_boc_hex, to_boc};
pub use cell::{
    empty_cell, load_coins, load_u256, store_coins, store_u256, CellExt, CellHash, MAX_CELL_BITS,
    MAX_CELL_REFS, MAX_COINS,
};
pub use errors::{CellError, CellResult};
pub use message::ExternalMessage;
pub use state_init::StateInit;
pub use tonlib_core::cell::{ArcCell, Cell, CellBuilder, CellParser, TonCellError};
