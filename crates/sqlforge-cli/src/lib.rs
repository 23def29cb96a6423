//! sqlforge command line library
//!
//! Argument parsing, logging setup and the subcommand implementations behind
//! the `sqlforge` binary.

pub mod cli;
pub mod commands;
pub mod logging;
