use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    project_id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx.service.find_case_by_id_and_project(id, project_id).await?;
    output(&case, flags.format)
}
