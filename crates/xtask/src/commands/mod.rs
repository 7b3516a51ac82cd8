//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect;
mod simulate;

pub use inspect::Inspect;
pub use simulate::Simulate;
