//! # Ports Layer
//!
//! Inbound (driving) and outbound (driven) port definitions.

pub mod inbound;
pub mod outbound;
