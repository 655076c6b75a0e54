mod create;
mod delete;
mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;

/// Handle `caseflow project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create { name } => create::run(name, ctx, flags).await,
        ProjectCommands::Get { id } => get::run(id, ctx, flags).await,
        ProjectCommands::List => list::run(ctx, flags).await,
        ProjectCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}
