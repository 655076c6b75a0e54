use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    project_id: &str,
    rating: i64,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let summary = ctx.service.record_rating(id, project_id, rating).await?;
    output(&summary, flags.format)
}
