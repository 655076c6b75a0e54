mod create;
mod get;
mod list;
mod queue;
mod rate;
mod status;
mod transition;
mod validate;

use caseflow_core::workflow::TransitionRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CaseCommands;
use crate::context::AppContext;

/// Handle `caseflow case`.
pub async fn handle(
    action: &CaseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CaseCommands::Create {
            project,
            title,
            complexity,
        } => create::run(project, title, complexity, ctx, flags).await,
        CaseCommands::Get { id, project } => get::run(id, project, ctx, flags).await,
        CaseCommands::List { project, status } => {
            list::run(project, status.as_deref(), ctx, flags).await
        }
        CaseCommands::Status { id, project } => status::run(id, project, ctx, flags).await,
        CaseCommands::Validate {
            id,
            project,
            score,
            invalid,
            report,
        } => validate::run(id, project, *score, !*invalid, report.as_deref(), ctx, flags).await,
        CaseCommands::Submit {
            id,
            project,
            actor,
            comment,
        } => {
            let request = TransitionRequest::SubmitForReview {
                actor: actor.clone(),
                comment: comment.clone(),
            };
            transition::run(id, project, request, ctx, flags).await
        }
        CaseCommands::Approve {
            id,
            project,
            actor,
            comment,
        } => {
            let request = TransitionRequest::Approve {
                actor: actor.clone(),
                comment: comment.clone(),
            };
            transition::run(id, project, request, ctx, flags).await
        }
        CaseCommands::Reject {
            id,
            project,
            actor,
            reason,
            suggestion,
        } => {
            let request = TransitionRequest::Reject {
                actor: actor.clone(),
                reason: reason.clone(),
                suggestions: suggestion.clone(),
            };
            transition::run(id, project, request, ctx, flags).await
        }
        CaseCommands::Publish { id, project } => {
            transition::run(id, project, TransitionRequest::Publish, ctx, flags).await
        }
        CaseCommands::Archive {
            id,
            project,
            actor,
            reason,
        } => {
            let request = TransitionRequest::Archive {
                actor: actor.clone(),
                reason: reason.clone(),
            };
            transition::run(id, project, request, ctx, flags).await
        }
        CaseCommands::Rate {
            id,
            project,
            rating,
        } => rate::run(id, project, *rating, ctx, flags).await,
        CaseCommands::Queue { project } => queue::run(project, ctx, flags).await,
    }
}
