//! Subcommands of the `rps` binary

pub mod compare;
pub mod train;
