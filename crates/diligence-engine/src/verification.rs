//! Claim verification: extract checkable claims from the transcript,
//! gather web evidence for each, and score consistency.
//!
//! This procedure degrades rather than fails: an unconfigured or
//! unreachable backend (either phase) produces a SKIP verdict with an
//! explanatory reasoning string, never an error to the aggregator. Only
//! schema-malformed backend output surfaces as a procedure failure.

use diligence_core::{
    validate, Claim, Confidence, ProcedureError, ProfileSet, SearchHit, Transcript, Verdict,
    VerificationVerdict,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::{LanguageBackend, SearchBackend};

/// Search queries issued per analysis; claims beyond this go unchecked.
const MAX_CLAIM_QUERIES: usize = 4;

/// Run both verification phases over one transcript.
pub async fn run_verification(
    language: &dyn LanguageBackend,
    search: &dyn SearchBackend,
    profiles: &ProfileSet,
    transcript: &Transcript,
) -> Result<VerificationVerdict, ProcedureError> {
    if !search.is_configured() {
        return Ok(VerificationVerdict::skipped(
            "the web-search backend is not configured; claims were not checked",
        ));
    }

    // Phase 1: claim extraction.
    let claims = match extract_claims(language, profiles, transcript).await {
        Ok(claims) => claims,
        Err(ProcedureError::Backend(e)) => {
            warn!("claim extraction unavailable: {e}");
            return Ok(VerificationVerdict::skipped(format!(
                "claim extraction was unavailable: {e}"
            )));
        }
        Err(e) => return Err(e),
    };

    if claims.is_empty() {
        debug!("transcript makes no verifiable claims");
        return Ok(VerificationVerdict::skipped(
            "the transcript makes no verifiable biographical or organizational claims",
        ));
    }

    // Phase 2: evidence gathering.
    let mut evidence: Vec<ClaimEvidence> = Vec::new();
    let mut sources_found = 0u32;
    for claim in claims.iter().take(MAX_CLAIM_QUERIES) {
        match search.search(&claim.query()).await {
            Ok(hits) => {
                debug!(query = %claim.query(), hits = hits.len(), "evidence retrieved");
                sources_found += hits.len() as u32;
                evidence.push(ClaimEvidence {
                    claim: claim.clone(),
                    hits,
                });
            }
            Err(e) => {
                warn!("search backend failed while gathering evidence: {e}");
                return Ok(VerificationVerdict::skipped(format!(
                    "the web-search backend failed while gathering evidence: {e}"
                )));
            }
        }
    }

    let mut verdict = match assess_evidence(language, profiles, &evidence).await {
        Ok(verdict) => verdict,
        Err(ProcedureError::Backend(e)) => {
            warn!("evidence assessment unavailable: {e}");
            return Ok(VerificationVerdict::skipped(format!(
                "evidence assessment was unavailable: {e}"
            )));
        }
        Err(e) => return Err(e),
    };

    verdict.claims_checked = evidence.len() as u32;
    verdict.sources_found = sources_found;
    apply_confidence_rules(&mut verdict);
    Ok(verdict)
}

/// Phase 1: ask the language backend for the verifiable claims.
pub async fn extract_claims(
    language: &dyn LanguageBackend,
    profiles: &ProfileSet,
    transcript: &Transcript,
) -> Result<Vec<Claim>, ProcedureError> {
    let response = language
        .complete(&profiles.claim_extraction, &transcript.to_prompt_text())
        .await?;
    validate::parse_claims(profiles.claim_extraction.name, response)
}

#[derive(Debug, Clone, Serialize)]
struct ClaimEvidence {
    claim: Claim,
    hits: Vec<SearchHit>,
}

/// Phase 2 scoring: hand claims and their evidence back to the language
/// backend for a consistency judgement.
async fn assess_evidence(
    language: &dyn LanguageBackend,
    profiles: &ProfileSet,
    evidence: &[ClaimEvidence],
) -> Result<VerificationVerdict, ProcedureError> {
    let dossier = serde_json::to_string_pretty(evidence)
        .map_err(|e| ProcedureError::Malformed {
            profile: profiles.evidence_assessment.name.to_string(),
            detail: format!("could not serialize evidence: {e}"),
        })?;
    let response = language
        .complete(&profiles.evidence_assessment, &dossier)
        .await?;
    validate::parse_verdict(profiles.evidence_assessment.name, response)
}

/// Confidence is bounded by how much evidence actually came back, and a
/// claim that did not verify can never keep a PASS verdict.
fn apply_confidence_rules(v: &mut VerificationVerdict) {
    if v.sources_found == 0 {
        v.confidence = Confidence::VeryLow;
    } else if v.sources_found < 3 && v.confidence > Confidence::Medium {
        v.confidence = Confidence::Medium;
    }
    if !v.verified && v.verdict == Verdict::Pass {
        v.verdict = Verdict::Fail;
    }
}
