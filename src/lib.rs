//! Leitner spaced-repetition engine for vocabulary study.
//!
//! The crate separates pure scheduling decisions from everything around
//! them: the item catalog is read-only input, card states live behind a
//! storage trait, and "now" is supplied by the caller on every operation,
//! so the scheduler stays deterministic under test.

pub mod catalog;
pub mod error;
pub mod scheduler;

pub use error::{Error, Result};
