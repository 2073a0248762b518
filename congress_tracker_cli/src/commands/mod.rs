//! CLI subcommand implementations.

pub mod legislator;
pub mod lookup;
pub mod status;
