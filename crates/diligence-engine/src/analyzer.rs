//! The aggregation layer: run all four procedures concurrently against the
//! same normalized transcript and fold their verdicts into one report.
//!
//! Isolation is the contract here. A procedure that fails becomes a FAIL
//! verdict carrying the error message as reasoning; the other three run to
//! completion unaffected. Only an exceeded deadline aborts the whole
//! analysis, with no partial report.

use std::sync::Arc;
use std::time::Duration;

use diligence_core::{
    AnalysisError, DueDiligenceReport, ProfileSet, QualitativeVerdict, QuantitativeVerdict,
    StrategicVerdict, Transcript, VerificationVerdict,
};
use tracing::{info, warn};

use crate::backend::{LanguageBackend, SearchBackend};
use crate::quantitative::run_quantitative;
use crate::scoring::{run_qualitative, run_strategic};
use crate::verification::run_verification;

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

/// Stateless analysis orchestrator. Each `analyze` call is independent and
/// cacheless; the only shared state is the immutable profile set and the
/// backend handles.
pub struct Analyzer {
    language: Arc<dyn LanguageBackend>,
    search: Arc<dyn SearchBackend>,
    profiles: Arc<ProfileSet>,
    deadline: Duration,
}

impl Analyzer {
    pub fn new(language: Arc<dyn LanguageBackend>, search: Arc<dyn SearchBackend>) -> Self {
        Self {
            language,
            search,
            profiles: Arc::new(ProfileSet::builtin()),
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Run the full due-diligence pipeline over one transcript.
    pub async fn analyze(
        &self,
        transcript: &Transcript,
    ) -> Result<DueDiligenceReport, AnalysisError> {
        info!(lines = transcript.len(), "starting due-diligence analysis");

        let run = async {
            let (quantitative, qualitative, strategic, verification) = tokio::join!(
                run_quantitative(self.language.as_ref(), &self.profiles, transcript),
                run_qualitative(self.language.as_ref(), &self.profiles, transcript),
                run_strategic(self.language.as_ref(), &self.profiles, transcript),
                run_verification(
                    self.language.as_ref(),
                    self.search.as_ref(),
                    &self.profiles,
                    transcript
                ),
            );

            let quantitative = quantitative.unwrap_or_else(|e| {
                warn!("quantitative analysis failed: {e}");
                QuantitativeVerdict::failed(format!("quantitative analysis failed: {e}"))
            });
            let qualitative = qualitative.unwrap_or_else(|e| {
                warn!("qualitative analysis failed: {e}");
                QualitativeVerdict::failed(format!("qualitative analysis failed: {e}"))
            });
            let strategic = strategic.unwrap_or_else(|e| {
                warn!("strategic analysis failed: {e}");
                StrategicVerdict::failed(format!("strategic analysis failed: {e}"))
            });
            let verification = verification.unwrap_or_else(|e| {
                warn!("verification failed: {e}");
                VerificationVerdict::failed(format!("verification failed: {e}"))
            });

            DueDiligenceReport::assemble(quantitative, qualitative, strategic, verification)
        };

        let report = tokio::time::timeout(self.deadline, run)
            .await
            .map_err(|_| AnalysisError::Timeout(self.deadline))?;

        info!(accept = report.accept, "analysis complete");
        Ok(report)
    }

    /// Normalize raw `speaker: message` text and analyze it.
    pub async fn analyze_text(&self, raw: &str) -> Result<DueDiligenceReport, AnalysisError> {
        let transcript = Transcript::from_text(raw)?;
        self.analyze(&transcript).await
    }
}
