use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    case_id: &str,
    project_id: &str,
    author: &str,
    text: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let comment = ctx
        .service
        .add_comment(case_id, project_id, author, text)
        .await?;
    output(&comment, flags.format)
}
