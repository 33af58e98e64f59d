//! # State Init
//!
//! Code and data a contract starts from. The hash of its cell is the
//! contract's account id, which makes deployment addresses deterministic.
//!
//! ```text
//! split_depth:(Maybe (## 5)) special:(Maybe TickTock)
//! code:(Maybe ^Cell) data:(Maybe ^Cell) library:(HashmapE 256 SimpleLib)
//! ```
//!
//! Only plain code/data pairs are produced; split depth, tick-tock and
//! libraries are always absent.

use crate::address::Address;
use crate::cell::CellExt;
use crate::errors::{CellError, CellResult};
use tonlib_core::cell::{ArcCell, Cell, CellBuilder, CellParser};

/// Initial code and data of a contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateInit {
    pub code: Option<ArcCell>,
    pub data: Option<ArcCell>,
}

impl StateInit {
    pub fn new(code: ArcCell, data: ArcCell) -> Self {
        Self {
            code: Some(code),
            data: Some(data),
        }
    }

    /// Append the wire form to `builder`.
    pub fn write_to(&self, builder: &mut CellBuilder) -> CellResult<()> {
        builder.store_bit(false)?.store_bit(false)?;
        store_maybe_ref(builder, self.code.as_ref())?;
        store_maybe_ref(builder, self.data.as_ref())?;
        builder.store_bit(false)?;
        Ok(())
    }

    /// Read the wire form from `parser`.
    pub fn read(parser: &mut CellParser) -> CellResult<Self> {
        if parser.load_bit()? {
            return Err(CellError::Unsupported("state init split depth".to_string()));
        }
        if parser.load_bit()? {
            return Err(CellError::Unsupported("state init tick-tock".to_string()));
        }
        let code = load_maybe_ref(parser)?;
        let data = load_maybe_ref(parser)?;
        if parser.load_bit()? {
            return Err(CellError::Unsupported("state init libraries".to_string()));
        }
        Ok(Self { code, data })
    }

    /// Serialize into a standalone cell.
    pub fn to_cell(&self) -> CellResult<Cell> {
        let mut builder = CellBuilder::new();
        self.write_to(&mut builder)?;
        Ok(builder.build()?)
    }

    /// Address of a contract deployed from this state in `workchain`.
    pub fn address(&self, workchain: i32) -> CellResult<Address> {
        let address = Address::new(workchain, self.to_cell()?.repr_hash());
        address.workchain_i8()?;
        Ok(address)
    }
}

fn store_maybe_ref(builder: &mut CellBuilder, cell: Option<&ArcCell>) -> CellResult<()> {
    match cell {
        Some(cell) => {
            builder.store_bit(true)?.store_reference(cell)?;
        }
        None => {
            builder.store_bit(false)?;
        }
    }
    Ok(())
}

fn load_maybe_ref(parser: &mut CellParser) -> CellResult<Option<ArcCell>> {
    if parser.load_bit()? {
        Ok(Some(parser.next_reference()?))
    } else {
        Ok(None)
    }
}
