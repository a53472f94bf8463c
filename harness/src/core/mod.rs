//! Deterministic, pure lifecycle logic for the engine.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! state and return deterministic outputs; the facade feeds in clock
//! readings and routes events out.

pub mod stack;
pub mod status;
pub mod test;
pub mod totals;
