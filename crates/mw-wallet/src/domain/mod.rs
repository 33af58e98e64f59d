//! # Domain Layer
//!
//! Pure encoding and signing logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod actions;
pub mod chain;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod program;
pub mod state;
