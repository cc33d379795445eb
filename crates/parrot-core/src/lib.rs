//! # parrot-core
//!
//! Core types, traits, configuration, and error handling for Parrot.

pub mod config;
pub mod error;
pub mod language;
pub mod message;
pub mod reply;
pub mod secrets;
pub mod traits;

pub use config::shellexpand;
