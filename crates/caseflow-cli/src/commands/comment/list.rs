use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    case_id: &str,
    project_id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let comments = ctx.service.list_comments(case_id, project_id).await?;
    output(&comments, flags.format)
}
