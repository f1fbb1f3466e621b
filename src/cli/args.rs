//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::templates::SyncMode;

/// droidsync - Android workspace detection and template sync.
#[derive(Debug, Parser)]
#[command(name = "droidsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.droidsync/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a workspace (default: the project directory)
    Add(AddArgs),

    /// List registered workspaces (default if no command specified)
    List(ListArgs),

    /// Forget a registered workspace
    Remove(RemoveArgs),

    /// Check or sync general templates in the project directory
    Templates(TemplatesArgs),

    /// Check or generate the Android scaffold of a workspace
    Android(AndroidArgs),

    /// Show or replace the shared AGENTS.md template
    Agents(AgentsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Workspace root to register
    pub path: Option<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `remove` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RemoveArgs {
    /// Workspace id
    pub id: String,
}

/// Arguments for the `templates` command.
#[derive(Debug, Clone, clap::Args)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,
}

/// `templates` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum TemplatesCommand {
    /// Show which general templates are present
    Check(TemplatesCheckArgs),

    /// Copy general templates into the project directory
    Sync(TemplatesSyncArgs),
}

/// Arguments for `templates check`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplatesCheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `templates sync`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplatesSyncArgs {
    /// Which templates to copy: missing, all, or single
    /// (default: single when files are given, else missing)
    #[arg(short, long)]
    pub mode: Option<SyncMode>,

    /// Template paths for single mode
    pub files: Vec<String>,
}

impl TemplatesSyncArgs {
    /// The mode in effect.
    pub fn effective_mode(&self) -> SyncMode {
        match self.mode {
            Some(mode) => mode,
            None if !self.files.is_empty() => SyncMode::Single,
            None => SyncMode::Missing,
        }
    }
}

/// Arguments for the `android` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AndroidArgs {
    #[command(subcommand)]
    pub command: AndroidCommand,
}

/// `android` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum AndroidCommand {
    /// Count scaffold files present in a workspace
    Check(WorkspaceIdArgs),

    /// Render every Android template into a workspace
    Generate(WorkspaceIdArgs),
}

/// A workspace id argument.
#[derive(Debug, Clone, clap::Args)]
pub struct WorkspaceIdArgs {
    /// Workspace id (see `droidsync list`)
    pub id: String,
}

/// Arguments for the `agents` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AgentsArgs {
    #[command(subcommand)]
    pub command: AgentsCommand,
}

/// `agents` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum AgentsCommand {
    /// Print the shared AGENTS.md
    Show,

    /// Replace the shared AGENTS.md with a file's contents
    Save(AgentsSaveArgs),
}

/// Arguments for `agents save`.
#[derive(Debug, Clone, clap::Args)]
pub struct AgentsSaveArgs {
    /// File to read
    pub file: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
