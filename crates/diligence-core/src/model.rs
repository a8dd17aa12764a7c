use serde::{Deserialize, Serialize};
use std::fmt;

/// PASS/FAIL/SKIP classification emitted by one analysis procedure.
///
/// Serialized in the uppercase wire format the verdicts are stored in
/// downstream (`"PASS"`, `"FAIL"`, `"SKIP"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    Fail,
    Skip,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Skip => "SKIP",
        };
        f.write_str(s)
    }
}

/// Evidence confidence, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::VeryLow => "very_low",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
            Confidence::VeryHigh => "very_high",
        };
        f.write_str(s)
    }
}

/// Business-metrics verdict. Absent fields mean the pitch never stated the
/// metric, which is legitimate; the plausibility rules in the engine decide
/// what absence implies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitativeVerdict {
    #[serde(default)]
    pub founder_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Funding stage as stated, e.g. "seed" or "series a".
    #[serde(default)]
    pub stage: Option<String>,
    /// Monthly recurring revenue in whole dollars.
    #[serde(default)]
    pub monthly_revenue: Option<u64>,
    #[serde(default)]
    pub team_size: Option<u32>,
    #[serde(default)]
    pub region: Option<String>,
    pub verdict: Verdict,
    pub reasoning: String,
}

impl QuantitativeVerdict {
    pub fn failed(reasoning: impl Into<String>) -> Self {
        Self {
            founder_name: None,
            industry: None,
            stage: None,
            monthly_revenue: None,
            team_size: None,
            region: None,
            verdict: Verdict::Fail,
            reasoning: reasoning.into(),
        }
    }
}

/// Founder-fit verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitativeVerdict {
    pub conviction: String,
    pub clarity: String,
    pub passion: String,
    pub coachability: String,
    /// Notable background (schools, prior employers) as pitched, unverified.
    #[serde(default)]
    pub pedigree: Option<String>,
    #[serde(default)]
    pub repeat_founder: bool,
    pub verdict: Verdict,
    pub reasoning: String,
}

impl QualitativeVerdict {
    pub fn failed(reasoning: impl Into<String>) -> Self {
        Self {
            conviction: String::new(),
            clarity: String::new(),
            passion: String::new(),
            coachability: String::new(),
            pedigree: None,
            repeat_founder: false,
            verdict: Verdict::Fail,
            reasoning: reasoning.into(),
        }
    }
}

/// Strategic-fit verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicVerdict {
    pub business_model: String,
    pub market_originality: String,
    pub pitch_strength: String,
    pub verdict: Verdict,
    pub reasoning: String,
}

impl StrategicVerdict {
    pub fn failed(reasoning: impl Into<String>) -> Self {
        Self {
            business_model: String::new(),
            market_originality: String::new(),
            pitch_strength: String::new(),
            verdict: Verdict::Fail,
            reasoning: reasoning.into(),
        }
    }
}

/// Fact-check verdict. `sources_found` and `claims_checked` are counted by
/// the verification procedure itself, never taken from a backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationVerdict {
    pub verified: bool,
    pub confidence: Confidence,
    #[serde(default)]
    pub sources_found: u32,
    #[serde(default)]
    pub claims_checked: u32,
    #[serde(default)]
    pub details: String,
    pub verdict: Verdict,
    pub reasoning: String,
}

impl VerificationVerdict {
    /// Nothing to verify, or no way to verify it. Non-blocking for
    /// acceptance.
    pub fn skipped(reasoning: impl Into<String>) -> Self {
        Self {
            verified: false,
            confidence: Confidence::VeryLow,
            sources_found: 0,
            claims_checked: 0,
            details: String::new(),
            verdict: Verdict::Skip,
            reasoning: reasoning.into(),
        }
    }

    pub fn failed(reasoning: impl Into<String>) -> Self {
        Self {
            verified: false,
            confidence: Confidence::VeryLow,
            sources_found: 0,
            claims_checked: 0,
            details: String::new(),
            verdict: Verdict::Fail,
            reasoning: reasoning.into(),
        }
    }
}

/// What kind of assertion a claim makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Education,
    Employment,
    Credential,
}

/// A verifiable biographical or organizational assertion extracted from a
/// transcript, e.g. "Sarah Chen graduated from Stanford".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Person or company the claim is about.
    pub subject: String,
    pub kind: ClaimKind,
    /// Institution or organization named by the claim.
    pub entity: String,
    /// Supporting quote from the transcript.
    #[serde(default)]
    pub quote: String,
}

impl Claim {
    /// Web-search query built from the claim's key entities.
    pub fn query(&self) -> String {
        format!("{} {}", self.subject, self.entity)
    }
}

/// One web-search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// The combined output of all four procedures plus the accept/reject
/// decision. Assembled once per analysis invocation, then immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueDiligenceReport {
    pub quantitative: QuantitativeVerdict,
    pub qualitative: QualitativeVerdict,
    pub strategic: StrategicVerdict,
    pub verification: VerificationVerdict,
    pub accept: bool,
}

impl DueDiligenceReport {
    pub fn assemble(
        quantitative: QuantitativeVerdict,
        qualitative: QualitativeVerdict,
        strategic: StrategicVerdict,
        verification: VerificationVerdict,
    ) -> Self {
        let accept = accept_rule(
            quantitative.verdict,
            qualitative.verdict,
            strategic.verdict,
            verification.verdict,
        );
        Self {
            quantitative,
            qualitative,
            strategic,
            verification,
            accept,
        }
    }
}

/// Acceptance rule: the three analysis procedures must PASS outright; the
/// verification slot may also be SKIP, because "nothing to verify" is not
/// evidence of fraud. SKIP anywhere else blocks acceptance.
pub fn accept_rule(
    quantitative: Verdict,
    qualitative: Verdict,
    strategic: Verdict,
    verification: Verdict,
) -> bool {
    quantitative == Verdict::Pass
        && qualitative == Verdict::Pass
        && strategic == Verdict::Pass
        && matches!(verification, Verdict::Pass | Verdict::Skip)
}
