//! Business-metrics analysis.

use diligence_core::{validate, ProcedureError, ProfileSet, QuantitativeVerdict, Transcript, Verdict};
use tracing::debug;

use crate::backend::LanguageBackend;

/// Extract business metrics and judge their plausibility.
pub async fn run_quantitative(
    backend: &dyn LanguageBackend,
    profiles: &ProfileSet,
    transcript: &Transcript,
) -> Result<QuantitativeVerdict, ProcedureError> {
    let response = backend
        .complete(&profiles.quantitative, &transcript.to_prompt_text())
        .await?;
    let mut verdict: QuantitativeVerdict =
        validate::parse_verdict(profiles.quantitative.name, response)?;

    // The backend scores the pitch; these consistency rules are enforced
    // locally and can only tighten the verdict.
    if let Some(reason) = plausibility_failure(&verdict) {
        debug!("quantitative plausibility override: {reason}");
        verdict.verdict = Verdict::Fail;
        if !verdict.reasoning.is_empty() {
            verdict.reasoning.push(' ');
        }
        verdict
            .reasoning
            .push_str(&format!("Metrics failed the plausibility check: {reason}."));
    }

    Ok(verdict)
}

fn plausibility_failure(v: &QuantitativeVerdict) -> Option<String> {
    if v.team_size == Some(0) {
        return Some("a going concern cannot run with a team of zero".into());
    }
    if v.monthly_revenue == Some(0) && v.team_size.is_none() {
        return Some("zero revenue with no team behind the venture".into());
    }
    if let (Some(stage), Some(0)) = (v.stage.as_deref(), v.monthly_revenue) {
        if is_post_seed(stage) {
            return Some(format!("a {stage} company reporting zero monthly revenue"));
        }
    }
    None
}

fn is_post_seed(stage: &str) -> bool {
    let s = stage.to_ascii_lowercase();
    s.contains("series") || s.contains("growth")
}
