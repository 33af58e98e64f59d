//! # Action Encoding
//!
//! Each action becomes a fragment of bits and references that the wallet
//! contract interprets after the signature check.
//!
//! ```text
//! transfer: op:u32 = 0x0ec3c86d | mode:u8 | ^internal_message
//! set code: op:u32 = 0xad4de08e | ^code
//!
//! internal_message:
//!   0x18:6 | dest:addr_std | value:Coins | 0:105
//!   init: 11 ^StateInit | 0
//!   body: 1 ^Cell | 0
//! ```
//!
//! The 6-bit prefix selects an internal message that may bounce, and the
//! 105 zero bits leave every field the ledger rewrites (source, extra
//! currencies, fees, logical time, creation time) for it to fill in.

use crate::domain::entities::{Action, OutAction, TransferIntent};
use crate::domain::errors::WalletError;
use shared_types::{
    load_coins, store_coins, Address, ArcCell, Cell, CellBuilder, CellError, CellParser,
    CellResult, StateInit,
};

/// Opcode of the send-message action.
pub const OP_SEND_MSG: u32 = 0x0ec3_c86d;

/// Opcode of the replace-code action.
pub const OP_SET_CODE: u32 = 0xad4d_e08e;

/// Pay transfer fees separately from the value.
pub const SEND_MODE_PAY_FEES_SEPARATELY: u8 = 1;

/// Ignore errors raised while the action phase sends the message.
pub const SEND_MODE_IGNORE_ERRORS: u8 = 2;

/// Mode used for every transfer this client emits.
pub const DEFAULT_SEND_MODE: u8 = SEND_MODE_PAY_FEES_SEPARATELY | SEND_MODE_IGNORE_ERRORS;

/// `int_msg_info$0 ihr_disabled:1 bounce:1 bounced:0 src:addr_none`
const INT_MSG_PREFIX: u8 = 0x18;
const INT_MSG_PREFIX_BITS: usize = 6;

/// extra currencies, ihr fee, forward fee, created_lt, created_at
const INT_MSG_RESERVED_BITS: usize = 1 + 4 + 4 + 64 + 32;

/// Internal message carrying `intent`.
pub fn internal_message(intent: &TransferIntent) -> CellResult<Cell> {
    let mut b = CellBuilder::new();
    b.store_u8(INT_MSG_PREFIX_BITS, INT_MSG_PREFIX)?;
    intent.recipient.write_to(&mut b)?;
    store_coins(&mut b, intent.value)?;
    for _ in 0..INT_MSG_RESERVED_BITS {
        b.store_bit(false)?;
    }

    match &intent.init {
        Some(init) => {
            b.store_bit(true)?
                .store_bit(true)?
                .store_child(init.to_cell()?)?;
        }
        None => {
            b.store_bit(false)?;
        }
    }

    match &intent.body {
        Some(body) => {
            b.store_bit(true)?.store_reference(body)?;
        }
        None => {
            b.store_bit(false)?;
        }
    }

    Ok(b.build()?)
}

/// Encode a transfer with the given send mode.
///
/// A fragment is a cell whose bits and references are later spliced into a
/// chain link.
pub fn encode_transfer(intent: &TransferIntent, mode: u8) -> CellResult<Cell> {
    let message = internal_message(intent)?;
    let mut b = CellBuilder::new();
    b.store_u32(32, OP_SEND_MSG)?
        .store_u8(8, mode)?
        .store_child(message)?;
    Ok(b.build()?)
}

/// Encode a code replacement.
pub fn encode_set_code(code: &ArcCell) -> CellResult<Cell> {
    let mut b = CellBuilder::new();
    b.store_u32(32, OP_SET_CODE)?.store_reference(code)?;
    Ok(b.build()?)
}

impl Action {
    /// Encode as a chain fragment. Transfers use [`DEFAULT_SEND_MODE`].
    pub fn encode(&self) -> CellResult<Cell> {
        match self {
            Action::Transfer(intent) => encode_transfer(intent, DEFAULT_SEND_MODE),
            Action::SetCode(code) => encode_set_code(code),
        }
    }
}

/// Encode every action, tagging a failure with the action's position.
pub fn encode_actions(actions: &[Action]) -> Result<Vec<Cell>, WalletError> {
    actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            action.encode().map_err(|source| WalletError::Capacity {
                action: index,
                source,
            })
        })
        .collect()
}

// =============================================================================
// Decoding
// =============================================================================

/// Read one action fragment from `parser`.
pub fn decode_action(parser: &mut CellParser) -> Result<OutAction, WalletError> {
    match parser.load_u32(32).map_err(CellError::from)? {
        OP_SEND_MSG => {
            let mode = parser.load_u8(8).map_err(CellError::from)?;
            let message = parser.next_reference().map_err(CellError::from)?;
            Ok(OutAction::SendMessage { mode, message })
        }
        OP_SET_CODE => Ok(OutAction::SetCode {
            code: parser.next_reference().map_err(CellError::from)?,
        }),
        opcode => Err(WalletError::UnknownAction { opcode }),
    }
}

/// Recover the transfer an internal message was built from.
pub fn decode_internal_message(message: &Cell) -> CellResult<TransferIntent> {
    let mut p = message.parser();
    let prefix = p.load_u8(INT_MSG_PREFIX_BITS)?;
    if prefix != INT_MSG_PREFIX {
        return Err(CellError::UnexpectedTag {
            expected: u64::from(INT_MSG_PREFIX),
            found: u64::from(prefix),
        });
    }
    let recipient = Address::read(&mut p)?;
    let value = load_coins(&mut p)?;
    p.skip_bits(INT_MSG_RESERVED_BITS)?;

    let init = if p.load_bit()? {
        if p.load_bit()? {
            let cell = p.next_reference()?;
            Some(StateInit::read(&mut cell.parser())?)
        } else {
            Some(StateInit::read(&mut p)?)
        }
    } else {
        None
    };

    let body = if p.load_bit()? {
        Some(p.next_reference()?)
    } else {
        None
    };

    Ok(TransferIntent {
        recipient,
        value,
        init,
        body,
    })
}
