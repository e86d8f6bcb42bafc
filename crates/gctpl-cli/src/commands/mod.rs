//! CLI command implementations for gctpl.
//!
//! Each module corresponds to a subcommand (`gctpl <command>`).

pub mod generate;
pub mod inspect;
