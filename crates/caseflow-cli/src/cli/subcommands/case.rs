use clap::Subcommand;

/// Case entity and lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CaseCommands {
    /// Create a draft case.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        title: String,
        /// basic, intermediate, advanced
        #[arg(long, default_value = "basic")]
        complexity: String,
    },
    /// Get a case by ID.
    Get {
        id: String,
        #[arg(long)]
        project: String,
    },
    /// List a project's cases.
    List {
        #[arg(long)]
        project: String,
        #[arg(long)]
        status: Option<String>,
    },
    /// Show the workflow status of a case.
    Status {
        id: String,
        #[arg(long)]
        project: String,
    },
    /// Record an externally computed validation score.
    Validate {
        id: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        score: f64,
        /// Mark the run as failed validation.
        #[arg(long)]
        invalid: bool,
        /// Scorer report as a JSON document.
        #[arg(long)]
        report: Option<String>,
    },
    /// Submit a draft for review.
    Submit {
        id: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Approve a case under review.
    Approve {
        id: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Send a case under review back to draft.
    Reject {
        id: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        suggestion: Vec<String>,
    },
    /// Publish an approved case.
    Publish {
        id: String,
        #[arg(long)]
        project: String,
    },
    /// Archive a case.
    Archive {
        id: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Fold a user rating into the case average.
    Rate {
        id: String,
        #[arg(long)]
        project: String,
        #[arg(long, allow_negative_numbers = true)]
        rating: i64,
    },
    /// Show the ranked approval queue of a project.
    Queue {
        #[arg(long)]
        project: String,
    },
}
