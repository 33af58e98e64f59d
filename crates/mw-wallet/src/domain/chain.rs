//! # Action Chain
//!
//! Actions are linked into a right-leaning list terminated by the empty
//! cell. Each link holds a reference to everything submitted before it,
//! followed by its own fragment:
//!
//! ```text
//! link_n = cell{ ^link_(n-1) | fragment_n }      link_0 = empty cell
//! ```
//!
//! The contract walks the list from the root, so the last action appended
//! sits on top.

use crate::domain::actions::decode_action;
use crate::domain::entities::OutAction;
use crate::domain::errors::WalletError;
use shared_types::{
    empty_cell, ArcCell, Cell, CellBuilder, CellError, CellExt, TonCellError,
};
use std::sync::Arc;

/// Maximum number of actions one message may carry.
pub const MAX_ACTIONS: usize = 255;

/// Link encoded action fragments, in submission order, into a chain.
pub fn build_action_chain(fragments: &[Cell]) -> Result<ArcCell, WalletError> {
    if fragments.len() > MAX_ACTIONS {
        return Err(WalletError::TooManyActions {
            count: fragments.len(),
            max: MAX_ACTIONS,
        });
    }

    let mut chain = Arc::new(empty_cell());
    for (index, fragment) in fragments.iter().enumerate() {
        let capacity = |source: TonCellError| WalletError::Capacity {
            action: index,
            source: CellError::from(source),
        };
        let mut link = CellBuilder::new();
        link.store_reference(&chain)
            .and_then(|b| b.store_cell(fragment))
            .map_err(capacity)?;
        chain = Arc::new(link.build().map_err(capacity)?);
    }
    Ok(chain)
}

/// Walk a chain back to its terminator and return the actions in the
/// order they were submitted.
pub fn decode_action_chain(root: &ArcCell) -> Result<Vec<OutAction>, WalletError> {
    let mut actions = Vec::new();
    let mut link = Arc::clone(root);

    while !link.is_empty_cell() {
        if actions.len() == MAX_ACTIONS {
            return Err(WalletError::TooManyActions {
                count: actions.len() + 1,
                max: MAX_ACTIONS,
            });
        }
        let previous = {
            let mut parser = link.parser();
            let previous = parser.next_reference().map_err(CellError::from)?;
            actions.push(decode_action(&mut parser)?);
            previous
        };
        link = previous;
    }

    actions.reverse();
    Ok(actions)
}
