use caseflow_core::enums::CaseComplexity;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project_id: &str,
    title: &str,
    complexity: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let complexity: CaseComplexity = parse_enum(complexity, "complexity")?;
    let case = ctx
        .service
        .create_case(project_id, title, complexity)
        .await?;
    output(&case, flags.format)
}
