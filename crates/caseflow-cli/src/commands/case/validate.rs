use caseflow_core::validation::{ScorerError, ValidationOutcome};
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_json_arg;
use crate::context::AppContext;
use crate::output::output;

/// Record a score produced by an out-of-process scorer. The report doubles
/// as the scored content.
pub async fn run(
    id: &str,
    project_id: &str,
    score: f64,
    is_valid: bool,
    report: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let report = parse_json_arg(report, "report")?;
    let outcome = ValidationOutcome {
        score,
        is_valid,
        report: report.clone(),
    };
    let scorer = move |_: &Value| -> Result<ValidationOutcome, ScorerError> { Ok(outcome.clone()) };

    let result = ctx
        .service
        .validate(id, project_id, &report, &scorer)
        .await?;
    output(&result, flags.format)
}
