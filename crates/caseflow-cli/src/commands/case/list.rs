use caseflow_core::enums::CaseStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project_id: &str,
    status: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status
        .map(|raw| parse_enum::<CaseStatus>(raw, "status"))
        .transpose()?;
    let cases = ctx.service.list_cases(project_id, status).await?;
    output(&cases, flags.format)
}
