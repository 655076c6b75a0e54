use caseflow_core::workflow::TransitionRequest;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    project_id: &str,
    request: TransitionRequest,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx.service.transition(id, project_id, request).await?;
    output(&case, flags.format)
}
