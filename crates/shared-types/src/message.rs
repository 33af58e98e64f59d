//! # External Inbound Message
//!
//! Message from outside the ledger addressed to a contract. It has no
//! sender and carries no value; it is authenticated by whatever its body
//! proves (for a wallet, a signature).
//!
//! ```text
//! ext_in_msg_info$10 src:MsgAddressExt dest:MsgAddressInt import_fee:Grams
//! init:(Maybe (Either StateInit ^StateInit))
//! body:(Either X ^X)
//! ```
//!
//! `init` and `body` are stored inline whenever the header cell still has
//! room for them, and by reference otherwise.

use crate::address::Address;
use crate::boc::{from_boc, to_boc};
use crate::cell::{load_coins, store_coins, MAX_CELL_BITS, MAX_CELL_REFS};
use crate::errors::{CellError, CellResult};
use crate::state_init::StateInit;
use std::sync::Arc;
use tonlib_core::cell::{ArcCell, Cell, CellBuilder};

/// Constructor tag of `ext_in_msg_info`.
const EXT_IN_MSG_TAG: u8 = 0b10;

/// Tag, `addr_none` source, destination and a zero import fee.
const HEADER_BITS: usize = 2 + 2 + Address::BIT_LEN + 4;

/// External inbound message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalMessage {
    pub dest: Address,
    pub init: Option<StateInit>,
    pub body: ArcCell,
}

impl ExternalMessage {
    pub fn new(dest: Address, init: Option<StateInit>, body: ArcCell) -> Self {
        Self { dest, init, body }
    }

    /// Serialize into a cell.
    pub fn to_cell(&self) -> CellResult<Cell> {
        let mut b = CellBuilder::new();
        b.store_u8(2, EXT_IN_MSG_TAG)?;
        Address::write_none(&mut b)?;
        self.dest.write_to(&mut b)?;
        store_coins(&mut b, 0)?;

        let mut used_bits = HEADER_BITS + 1;
        let mut used_refs = 0;
        match &self.init {
            Some(init) => {
                b.store_bit(true)?;
                let init_cell = init.to_cell()?;
                // two marker bits stay reserved: init's Either and body's Either
                let inline = used_bits + 2 + init_cell.bit_len() + self.body.bit_len()
                    <= MAX_CELL_BITS
                    && init_cell.references().len() <= MAX_CELL_REFS;
                used_bits += 1;
                if inline {
                    b.store_bit(false)?;
                    init.write_to(&mut b)?;
                    used_bits += init_cell.bit_len();
                    used_refs += init_cell.references().len();
                } else {
                    b.store_bit(true)?.store_child(init_cell)?;
                    used_refs += 1;
                }
            }
            None => {
                b.store_bit(false)?;
            }
        }

        let inline = used_bits + 1 + self.body.bit_len() <= MAX_CELL_BITS
            && used_refs + self.body.references().len() <= MAX_CELL_REFS;
        if inline {
            b.store_bit(false)?.store_cell(&self.body)?;
        } else {
            b.store_bit(true)?.store_reference(&self.body)?;
        }

        Ok(b.build()?)
    }

    /// Parse a message cell.
    pub fn parse(cell: &Cell) -> CellResult<Self> {
        let mut p = cell.parser();
        let tag = p.load_u8(2)?;
        if tag != EXT_IN_MSG_TAG {
            return Err(CellError::UnexpectedTag {
                expected: u64::from(EXT_IN_MSG_TAG),
                found: u64::from(tag),
            });
        }
        if p.load_u8(2)? != 0 {
            return Err(CellError::Unsupported("external source address".to_string()));
        }
        let dest = Address::read(&mut p)?;
        load_coins(&mut p)?;

        let init = if p.load_bit()? {
            if p.load_bit()? {
                let init_cell = p.next_reference()?;
                Some(StateInit::read(&mut init_cell.parser())?)
            } else {
                Some(StateInit::read(&mut p)?)
            }
        } else {
            None
        };

        let body = if p.load_bit()? {
            p.next_reference()?
        } else {
            Arc::new(p.load_remaining()?)
        };

        Ok(Self { dest, init, body })
    }

    /// Serialize as a bag of cells, ready for submission.
    pub fn to_boc(&self) -> CellResult<Vec<u8>> {
        to_boc(&self.to_cell()?)
    }

    /// Parse from a bag of cells.
    pub fn from_boc(bytes: &[u8]) -> CellResult<Self> {
        Self::parse(&from_boc(bytes)?)
    }
}
