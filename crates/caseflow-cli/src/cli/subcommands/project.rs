use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        name: String,
    },
    /// Get a project by ID.
    Get { id: String },
    /// List projects.
    List,
    /// Delete a project and every case it owns.
    Delete { id: String },
}
