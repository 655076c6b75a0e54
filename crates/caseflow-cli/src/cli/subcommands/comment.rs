use clap::Subcommand;

/// Case comment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// Add a free-form comment to a case.
    Add {
        case_id: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        text: String,
    },
    /// List a case's comments, oldest first.
    List {
        case_id: String,
        #[arg(long)]
        project: String,
    },
}
