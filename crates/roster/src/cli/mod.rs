//! Command-line interface for roster.
//!
//! This module provides the CLI structure for the `roster` binary. It is a
//! thin front end: every command goes through [`crate::RosterStore`].

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, ListCommand, OutputFormat, ProgramArg, ResetCommand, StatusCommand,
};
pub use render::{render_plain, render_table};

use crate::logging::Verbosity;

/// roster - Keep track of your students
///
/// Adds students to a roster and lists them. The roster is saved to a local
/// database after every change; a bundled dataset is used the first time.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List students in display order
    List(ListCommand),

    /// Add a student
    Add(AddCommand),

    /// Show roster and storage status
    Status(StatusCommand),

    /// Delete the stored roster so the next run starts from the seed
    Reset(ResetCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
