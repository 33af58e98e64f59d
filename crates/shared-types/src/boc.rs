//! # Bag of Cells
//!
//! Byte serialization of a cell DAG through `tonlib_core`'s `BagOfCells`.
//! Writing produces a single root with a CRC-32C trailer.
//!
//! ```text
//! magic:u32 | flags+size:u8 | off_bytes:u8 | cells | roots | absent | tot_cells_size
//! root_list | [index] | cell_data | [crc32c]
//! ```
//!
//! Incoming bytes are screened before the library sees them: the header's
//! cell count must be backed by enough bytes to hold that many cells, and a
//! declared checksum must match.

use crate::errors::{CellError, CellResult};
use crc::{Crc, CRC_32_ISCSI};
use tonlib_core::cell::{ArcCell, BagOfCells, Cell};

const BOC_GENERIC_MAGIC: [u8; 4] = [0xb5, 0xee, 0x9c, 0x72];

const FLAG_HAS_CRC32C: u8 = 0x40;
const SIZE_MASK: u8 = 0x07;

/// A serialized cell takes at least its two descriptor bytes.
const MIN_CELL_BYTES: u64 = 2;

const CASTAGNOLI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

fn invalid(msg: impl Into<String>) -> CellError {
    CellError::InvalidBoc(msg.into())
}

/// Reject headers whose declared sizes the payload cannot back, and
/// payloads whose checksum does not match.
fn screen(bytes: &[u8]) -> CellResult<()> {
    if bytes.len() < 6 || bytes[..4] != BOC_GENERIC_MAGIC {
        return Err(invalid("missing bag-of-cells magic"));
    }
    let flags = bytes[4];
    let size = usize::from(flags & SIZE_MASK);
    if size == 0 || size > 4 {
        return Err(invalid(format!("reference size {size} out of range")));
    }

    let count = bytes
        .get(6..6 + size)
        .ok_or_else(|| invalid("truncated header"))?;
    let cell_count = count
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
    if cell_count.saturating_mul(MIN_CELL_BYTES) > bytes.len() as u64 {
        return Err(invalid(format!(
            "header declares {cell_count} cells in {} bytes",
            bytes.len()
        )));
    }

    if flags & FLAG_HAS_CRC32C != 0 {
        let (payload, trailer) = bytes.split_at(bytes.len() - 4);
        let stored = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let computed = CASTAGNOLI.checksum(payload);
        if stored != computed {
            return Err(invalid(format!(
                "checksum mismatch: stored {stored:#010x}, computed {computed:#010x}"
            )));
        }
    }
    Ok(())
}

/// Parse a bag of cells with exactly one root.
pub fn from_boc(bytes: &[u8]) -> CellResult<ArcCell> {
    screen(bytes)?;
    let boc = BagOfCells::parse(bytes)?;
    Ok(boc.single_root()?)
}

/// Parse a hex-encoded bag of cells with exactly one root.
pub fn from_boc_hex(text: &str) -> CellResult<ArcCell> {
    let bytes = hex::decode(text.trim()).map_err(|e| invalid(format!("bad hex: {e}")))?;
    from_boc(&bytes)
}

/// Serialize `cell` and its subtree as a single-root bag of cells.
pub fn to_boc(cell: &Cell) -> CellResult<Vec<u8>> {
    Ok(BagOfCells::from_root(cell.clone()).serialize(true)?)
}
