//! Subcommand modules for the `pafgtf` binary.

pub mod filter;
pub mod make;
