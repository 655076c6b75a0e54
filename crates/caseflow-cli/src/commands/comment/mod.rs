mod add;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommentCommands;
use crate::context::AppContext;

/// Handle `caseflow comment`.
pub async fn handle(
    action: &CommentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommentCommands::Add {
            case_id,
            project,
            author,
            text,
        } => add::run(case_id, project, author, text, ctx, flags).await,
        CommentCommands::List { case_id, project } => {
            list::run(case_id, project, ctx, flags).await
        }
    }
}
