use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(project_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let queue = ctx.service.approval_queue(project_id, Utc::now()).await?;
    output(&queue, flags.format)
}
