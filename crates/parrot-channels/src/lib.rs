//! # parrot-channels
//!
//! Social network reply posting for Parrot.

pub mod dry_run;
pub mod twitter;

pub use dry_run::DryRunPoster;
pub use twitter::TwitterChannel;
