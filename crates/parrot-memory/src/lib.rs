//! # parrot-memory
//!
//! Append-only interaction log (SQLite-backed).

pub mod store;

pub use store::Store;
