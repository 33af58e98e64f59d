//! # Address
//!
//! Standard internal account address: workchain id plus the 256-bit hash of
//! the account's initial state. The textual form is the raw
//! `<workchain>:<64 hex digits>` notation.
//!
//! ```text
//! addr_std$10 anycast:(Maybe Anycast) workchain_id:int8 address:bits256
//! ```

use crate::cell::{load_u256, store_u256};
use crate::errors::{CellError, CellResult};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use tonlib_core::cell::{CellBuilder, CellParser};

/// Constructor tag of `addr_std`.
const ADDR_STD_TAG: u8 = 0b10;

/// Account address on the ledger.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr,
)]
pub struct Address {
    /// Workchain id (encoded as a signed 8-bit integer on the wire).
    pub workchain: i32,
    /// Account id.
    pub hash: [u8; 32],
}

impl Address {
    /// Bit length of the `addr_std` wire form without anycast.
    pub const BIT_LEN: usize = 2 + 1 + 8 + 256;

    /// Create an address.
    pub fn new(workchain: i32, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Workchain id narrowed to its wire width.
    pub fn workchain_i8(&self) -> CellResult<i8> {
        i8::try_from(self.workchain).map_err(|_| {
            CellError::InvalidAddress(format!(
                "workchain {} does not fit in 8 bits",
                self.workchain
            ))
        })
    }

    /// Append the `addr_std` wire form.
    pub fn write_to(&self, builder: &mut CellBuilder) -> CellResult<()> {
        let workchain = self.workchain_i8()?;
        builder
            .store_u8(2, ADDR_STD_TAG)?
            .store_bit(false)?
            .store_u8(8, workchain as u8)?;
        store_u256(builder, &self.hash)
    }

    /// Append `addr_none`.
    pub fn write_none(builder: &mut CellBuilder) -> CellResult<()> {
        builder.store_u8(2, 0)?;
        Ok(())
    }

    /// Read an `addr_std` without anycast.
    pub fn read(parser: &mut CellParser) -> CellResult<Self> {
        let tag = parser.load_u8(2)?;
        if tag != ADDR_STD_TAG {
            return Err(CellError::UnexpectedTag {
                expected: u64::from(ADDR_STD_TAG),
                found: u64::from(tag),
            });
        }
        if parser.load_bit()? {
            return Err(CellError::Unsupported("anycast address".to_string()));
        }
        let workchain = parser.load_u8(8)? as i8;
        let hash = load_u256(parser)?;
        Ok(Self::new(i32::from(workchain), hash))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, hex::encode(self.hash))
    }
}

impl FromStr for Address {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (workchain, hash) = s
            .split_once(':')
            .ok_or_else(|| CellError::InvalidAddress(format!("missing ':' in {s:?}")))?;

        let workchain: i32 = workchain
            .parse()
            .map_err(|_| CellError::InvalidAddress(format!("bad workchain {workchain:?}")))?;

        let bytes = hex::decode(hash)
            .map_err(|e| CellError::InvalidAddress(format!("bad account id: {e}")))?;
        let hash: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            CellError::InvalidAddress(format!("account id is {} bytes, expected 32", b.len()))
        })?;

        let address = Self::new(workchain, hash);
        address.workchain_i8()?;
        Ok(address)
    }
}
