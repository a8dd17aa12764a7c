//! Integration tests for the aggregator, driven by scripted backends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diligence_core::{
    AnalysisError, AnalysisProfile, BackendError, Confidence, SearchHit, Transcript, Verdict,
};
use diligence_engine::backend::{LanguageBackend, SearchBackend};
use diligence_engine::Analyzer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Language backend scripted per profile name.
#[derive(Default)]
struct ScriptedLanguage {
    responses: HashMap<&'static str, Value>,
    outages: Vec<&'static str>,
    delay: Option<Duration>,
}

impl ScriptedLanguage {
    fn respond(mut self, profile: &'static str, response: Value) -> Self {
        self.responses.insert(profile, response);
        self
    }

    fn outage(mut self, profile: &'static str) -> Self {
        self.outages.push(profile);
        self
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl LanguageBackend for ScriptedLanguage {
    async fn complete(
        &self,
        profile: &AnalysisProfile,
        _input: &str,
    ) -> Result<Value, BackendError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.outages.contains(&profile.name) {
            return Err(BackendError::Unavailable("scripted outage".into()));
        }
        self.responses
            .get(profile.name)
            .cloned()
            .ok_or_else(|| BackendError::Decode(format!("no script for {}", profile.name)))
    }
}

/// Search backend with a fixed hit list and a call counter.
struct ScriptedSearch {
    hits: Vec<SearchHit>,
    configured: bool,
    fail: bool,
    calls: AtomicUsize,
}

impl ScriptedSearch {
    fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            configured: true,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::with_hits(vec![])
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_hits(vec![])
        }
    }
}

#[async_trait]
impl SearchBackend for ScriptedSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(BackendError::Unavailable("scripted search outage".into()));
        }
        Ok(self.hits.clone())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

fn hit(title: &str, snippet: &str) -> SearchHit {
    SearchHit {
        title: title.into(),
        snippet: snippet.into(),
        url: "https://example.com".into(),
    }
}

fn quant_pass() -> Value {
    json!({
        "founder_name": "Sarah Chen",
        "industry": "developer tools",
        "stage": "seed",
        "monthly_revenue": 120_000,
        "team_size": 5,
        "region": "San Francisco",
        "verdict": "PASS",
        "reasoning": "Strong seed-stage metrics."
    })
}

fn qual_pass() -> Value {
    json!({
        "conviction": "High, personal connection to the problem.",
        "clarity": "Articulates the value proposition cleanly.",
        "passion": "Evident throughout the pitch.",
        "coachability": "Mentions learning from customer feedback.",
        "pedigree": "Stanford CS, Google Search team",
        "repeat_founder": false,
        "verdict": "PASS",
        "reasoning": "Fundable founder profile."
    })
}

fn strat_pass() -> Value {
    json!({
        "business_model": "Enterprise SaaS with developer-led adoption.",
        "market_originality": "Crowded market but credible differentiation.",
        "pitch_strength": "Coherent, metrics-backed narrative.",
        "verdict": "PASS",
        "reasoning": "Strategy holds together."
    })
}

fn no_claims() -> Value {
    json!({ "claims": [] })
}

fn stanford_claim() -> Value {
    json!({
        "claims": [{
            "subject": "Sarah Chen",
            "kind": "education",
            "entity": "Stanford University",
            "quote": "I graduated from Stanford with a Computer Science degree"
        }]
    })
}

/// Scripted passes for the three analysis procedures plus empty claims.
fn all_passing() -> ScriptedLanguage {
    ScriptedLanguage::default()
        .respond("quantitative", quant_pass())
        .respond("qualitative", qual_pass())
        .respond("strategic", strat_pass())
        .respond("claim_extraction", no_claims())
}

fn pitch() -> Transcript {
    Transcript::from_text(
        "INTERVIEWER: Tell me about your startup.\n\
         FOUNDER: We're at $120,000 in monthly recurring revenue with a team of 5.",
    )
    .unwrap()
}

fn analyzer(language: ScriptedLanguage, search: ScriptedSearch) -> Analyzer {
    Analyzer::new(Arc::new(language), Arc::new(search))
}

#[tokio::test]
async fn accepts_when_all_procedures_pass() {
    let analyzer = analyzer(all_passing(), ScriptedSearch::with_hits(vec![]));
    let report = analyzer.analyze(&pitch()).await.unwrap();

    assert!(report.accept);
    assert_eq!(report.quantitative.verdict, Verdict::Pass);
    assert_eq!(report.qualitative.verdict, Verdict::Pass);
    assert_eq!(report.strategic.verdict, Verdict::Pass);
    // No checkable claims: SKIP, and non-blocking.
    assert_eq!(report.verification.verdict, Verdict::Skip);
    assert_eq!(report.verification.sources_found, 0);
}

#[tokio::test]
async fn no_claims_never_touches_the_search_backend() {
    let search = Arc::new(ScriptedSearch::with_hits(vec![hit("a", "b")]));
    let analyzer = Analyzer::new(Arc::new(all_passing()), search.clone());

    let report = analyzer.analyze(&pitch()).await.unwrap();
    assert_eq!(report.verification.verdict, Verdict::Skip);
    assert_eq!(report.verification.sources_found, 0);
    assert_eq!(report.verification.claims_checked, 0);
    assert_eq!(search.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn verification_pass_with_consistent_evidence() {
    let language = all_passing()
        .respond("claim_extraction", stanford_claim())
        .respond(
            "evidence_assessment",
            json!({
                "verified": true,
                "confidence": "very_high",
                "details": "Three independent sources confirm the Stanford degree.",
                "verdict": "PASS",
                "reasoning": "Claims are consistent with public records."
            }),
        );
    let search = ScriptedSearch::with_hits(vec![
        hit("Sarah Chen - Stanford CS 2022", "Graduated from Stanford"),
        hit("LinkedIn: Sarah Chen", "Stanford University, Google"),
        hit("Stanford Daily", "Sarah Chen among 2022 graduates"),
    ]);

    let report = analyzer(language, search).analyze(&pitch()).await.unwrap();
    assert!(report.accept);
    assert_eq!(report.verification.verdict, Verdict::Pass);
    assert!(report.verification.verified);
    assert_eq!(report.verification.sources_found, 3);
    assert_eq!(report.verification.claims_checked, 1);
    assert_eq!(report.verification.confidence, Confidence::VeryHigh);
}

#[tokio::test]
async fn contradicted_claim_fails_verification_and_rejects() {
    let language = all_passing()
        .respond("claim_extraction", stanford_claim())
        .respond(
            "evidence_assessment",
            json!({
                "verified": false,
                "confidence": "high",
                "details": "Multiple sources consistently show UC Berkeley, not Stanford.",
                "verdict": "FAIL",
                "reasoning": "Educational credentials do not match the claim."
            }),
        );
    let search = ScriptedSearch::with_hits(vec![
        hit("Sarah Chen - UC Berkeley EECS Graduate", "Class of 2022"),
        hit("LinkedIn: Sarah Chen", "UC Berkeley, Google Engineer"),
        hit("Berkeley Engineering News", "Sarah Chen graduates"),
    ]);

    let report = analyzer(language, search).analyze(&pitch()).await.unwrap();
    assert!(!report.accept);
    assert_eq!(report.verification.verdict, Verdict::Fail);
    assert!(!report.verification.verified);
    assert!(report.verification.confidence >= Confidence::High);
    assert_eq!(report.verification.sources_found, 3);
}

#[tokio::test]
async fn single_fail_verdict_rejects() {
    let language = all_passing().respond(
        "strategic",
        json!({
            "business_model": "Unclear monetization.",
            "market_originality": "Me-too product.",
            "pitch_strength": "Weak narrative.",
            "verdict": "FAIL",
            "reasoning": "Strategy does not hold together."
        }),
    );
    let report = analyzer(language, ScriptedSearch::with_hits(vec![]))
        .analyze(&pitch())
        .await
        .unwrap();

    assert!(!report.accept);
    assert_eq!(report.strategic.verdict, Verdict::Fail);
    assert_eq!(report.quantitative.verdict, Verdict::Pass);
}

#[tokio::test]
async fn procedure_outage_is_isolated() {
    let language = all_passing().outage("quantitative");
    let report = analyzer(language, ScriptedSearch::with_hits(vec![]))
        .analyze(&pitch())
        .await
        .unwrap();

    // The failed slot carries the error as reasoning...
    assert_eq!(report.quantitative.verdict, Verdict::Fail);
    assert!(report.quantitative.reasoning.contains("unreachable"));
    // ...and the other three are untouched.
    assert_eq!(report.qualitative.verdict, Verdict::Pass);
    assert_eq!(report.strategic.verdict, Verdict::Pass);
    assert_eq!(report.verification.verdict, Verdict::Skip);
    assert!(!report.accept);
}

#[tokio::test]
async fn malformed_response_becomes_fail() {
    let language = all_passing().respond("qualitative", json!({"vibes": "good"}));
    let report = analyzer(language, ScriptedSearch::with_hits(vec![]))
        .analyze(&pitch())
        .await
        .unwrap();

    assert_eq!(report.qualitative.verdict, Verdict::Fail);
    assert!(report.qualitative.reasoning.contains("schema"));
    assert!(!report.accept);
}

#[tokio::test]
async fn unconfigured_search_degrades_to_skip() {
    let language = all_passing().respond("claim_extraction", stanford_claim());
    let report = analyzer(language, ScriptedSearch::unconfigured())
        .analyze(&pitch())
        .await
        .unwrap();

    assert_eq!(report.verification.verdict, Verdict::Skip);
    assert!(report.verification.reasoning.contains("not configured"));
    // An unverifiable pitch is not a rejected pitch.
    assert!(report.accept);
}

#[tokio::test]
async fn search_outage_degrades_to_skip() {
    let language = all_passing().respond("claim_extraction", stanford_claim());
    let report = analyzer(language, ScriptedSearch::failing())
        .analyze(&pitch())
        .await
        .unwrap();

    assert_eq!(report.verification.verdict, Verdict::Skip);
    assert!(report.accept);
}

#[tokio::test]
async fn claim_extraction_outage_degrades_to_skip() {
    let language = all_passing().outage("claim_extraction");
    let report = analyzer(language, ScriptedSearch::with_hits(vec![]))
        .analyze(&pitch())
        .await
        .unwrap();

    assert_eq!(report.verification.verdict, Verdict::Skip);
    assert!(report.verification.reasoning.contains("unavailable"));
}

#[tokio::test]
async fn zero_revenue_with_no_team_fails_quantitative() {
    let transcript = Transcript::from_text("Caller: We have $0 revenue and no team.").unwrap();
    // The backend is lenient; the local plausibility rule is not.
    let language = all_passing().respond(
        "quantitative",
        json!({
            "monthly_revenue": 0,
            "verdict": "PASS",
            "reasoning": "Early but promising."
        }),
    );
    let report = analyzer(language, ScriptedSearch::with_hits(vec![]))
        .analyze(&transcript)
        .await
        .unwrap();

    assert_eq!(report.quantitative.verdict, Verdict::Fail);
    assert_eq!(report.quantitative.monthly_revenue, Some(0));
    assert_eq!(report.quantitative.team_size, None);
    assert!(report.quantitative.reasoning.contains("plausibility"));
    assert!(!report.accept);
}

#[tokio::test]
async fn identical_inputs_produce_identical_reports() {
    let transcript = pitch();
    let analyzer = analyzer(all_passing(), ScriptedSearch::with_hits(vec![]));

    let first = analyzer.analyze(&transcript).await.unwrap();
    let second = analyzer.analyze(&transcript).await.unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test(start_paused = true)]
async fn exceeding_the_deadline_returns_no_partial_report() {
    let language = all_passing().delayed(Duration::from_secs(120));
    let analyzer = analyzer(language, ScriptedSearch::with_hits(vec![]))
        .with_deadline(Duration::from_secs(5));

    let err = analyzer.analyze(&pitch()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Timeout(_)));
}

#[tokio::test]
async fn empty_raw_text_is_rejected_before_dispatch() {
    let analyzer = analyzer(ScriptedLanguage::default(), ScriptedSearch::with_hits(vec![]));
    let err = analyzer.analyze_text("").await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidTranscript(_)));
}
