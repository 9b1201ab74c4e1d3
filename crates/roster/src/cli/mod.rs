//! Command-line interface for roster.
//!
//! This module provides the CLI structure for the `roster` binary and the
//! interactive menu it runs by default.

mod commands;
pub mod menu;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, EditCommand, ListCommand, RemoveCommand, SearchCommand,
    StatsCommand,
};
pub use menu::Menu;

/// roster - Keep track of students, roll numbers and grades
///
/// Runs an interactive menu by default. Subcommands perform single
/// operations for use from scripts.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Roster file to use instead of the configured one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive menu
    Menu,

    /// Add a student
    Add(AddCommand),

    /// Change a student's name and grade
    Edit(EditCommand),

    /// Remove a student
    Remove(RemoveCommand),

    /// Look up a student by roll number
    Search(SearchCommand),

    /// List all students
    List(ListCommand),

    /// Show roster file statistics
    Stats(StatsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
