use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(name: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.service.create_project(name).await?;
    output(&project, flags.format)
}
