use clap::Subcommand;

use crate::cli::subcommands::{CaseCommands, CommentCommands, ProjectCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Projects that own cases.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Cases and their lifecycle.
    Case {
        #[command(subcommand)]
        action: CaseCommands,
    },
    /// Case comments.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
}
