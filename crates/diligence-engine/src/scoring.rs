//! Founder-fit and strategic-fit scoring.
//!
//! Both procedures share the same shape: one backend call with a fixed
//! profile, then strict parsing into the typed verdict. Neither observes
//! the other's output, which is what allows the aggregator to dispatch
//! them in parallel.

use diligence_core::{validate, ProcedureError, ProfileSet, QualitativeVerdict, StrategicVerdict, Transcript};

use crate::backend::LanguageBackend;

/// Score founder fit: conviction, clarity, passion, coachability, pedigree.
pub async fn run_qualitative(
    backend: &dyn LanguageBackend,
    profiles: &ProfileSet,
    transcript: &Transcript,
) -> Result<QualitativeVerdict, ProcedureError> {
    let response = backend
        .complete(&profiles.qualitative, &transcript.to_prompt_text())
        .await?;
    validate::parse_verdict(profiles.qualitative.name, response)
}

/// Score strategic fit: business model, market originality, pitch strength.
pub async fn run_strategic(
    backend: &dyn LanguageBackend,
    profiles: &ProfileSet,
    transcript: &Transcript,
) -> Result<StrategicVerdict, ProcedureError> {
    let response = backend
        .complete(&profiles.strategic, &transcript.to_prompt_text())
        .await?;
    validate::parse_verdict(profiles.strategic.name, response)
}
