//! Adapters - Implementations of port interfaces.
//!
//! - `clock` - system and fixed clocks
//! - `storage` - in-memory and file snapshot repositories
//! - `scheduler` - background timer for the renewal check

pub mod clock;
pub mod scheduler;
pub mod storage;
