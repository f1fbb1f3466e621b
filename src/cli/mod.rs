//! Command-line interface for droidsync.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    AddArgs, AgentsArgs, AgentsCommand, AndroidArgs, AndroidCommand, Cli, Commands,
    CompletionsArgs, ListArgs, RemoveArgs, TemplatesArgs, TemplatesCheckArgs, TemplatesCommand,
    TemplatesSyncArgs, WorkspaceIdArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, EXIT_UNKNOWN_WORKSPACE};
